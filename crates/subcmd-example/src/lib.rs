//! The `tool` demo application.
//!
//! Commands:
//!
//! - `build`: no flags and no action, so it only prints its usage
//! - `greet`: prints a greeting, configured by flags
//! - `sum`: adds its positional arguments

use anyhow::Context;
use subcmd::{action, flags, App, FlagSet};

/// Builds the demo application.
pub fn build_app() -> App {
    let mut app = App::new("tool", "a small demo of subcommand dispatch");

    app.add_command("build", "builds the project", []);

    app.add_command("greet", "prints a greeting", [
        flags(|f| {
            f.string("name", "world", "who to greet")
                .int("times", 1, "how many times to greet")
                .bool("shout", false, "uppercase the greeting");
        }),
        action(|flags| {
            for line in greet(flags) {
                println!("{line}");
            }
            Ok(())
        }),
    ]);

    app.add_command("sum", "adds numbers given as arguments", [
        flags(|f| {
            f.int("precision", 2, "decimal places in the result");
        }),
        action(|flags| {
            println!("{}", sum(flags)?);
            Ok(())
        }),
    ]);

    app
}

/// The lines `greet` prints.
pub fn greet(flags: &FlagSet) -> Vec<String> {
    let name = flags.get_str("name").unwrap_or("world");
    let times = flags.get_int("times").unwrap_or(1).max(0);

    let mut line = format!("hello, {name}!");
    if flags.get_bool("shout").unwrap_or(false) {
        line = line.to_uppercase();
    }
    (0..times).map(|_| line.clone()).collect()
}

/// The formatted total `sum` prints.
pub fn sum(flags: &FlagSet) -> anyhow::Result<String> {
    let precision = usize::try_from(flags.get_int("precision").unwrap_or(2))
        .context("precision must not be negative")?;

    let mut total = 0.0;
    for arg in flags.args() {
        let value: f64 = arg
            .parse()
            .with_context(|| format!("not a number: {arg}"))?;
        total += value;
    }
    tracing::debug!(count = flags.nargs(), total, "summed arguments");

    Ok(format!("{total:.precision$}"))
}
