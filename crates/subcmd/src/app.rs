//! The application: command registry, top-level usage, and dispatch.
//!
//! # Dispatch Flow
//!
//! ```text
//! args[0]
//!   ├── "", help, -h, --help   → app usage + hint            (AppHelp, 2)
//!   ├── no such command        → app usage + unknown command (UnknownCommand, 2)
//!   └── command
//!         reset flag set, parse args[1..]
//!           ├── help requested → command usage + blank line  (CommandHelp, 0)
//!           ├── parse error    → command usage + error       (FlagError, 2)
//!           ├── no action      → command usage               (NoAction, 0)
//!           └── action(flags)                                (Executed)
//! ```
//!
//! Every diagnostic goes to the writer passed to [`App::dispatch_to`]
//! (stderr for [`App::run`] and [`App::run_with`]), never to stdout.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use crate::command::Command;
use crate::flags::ParseOutcome;
use crate::option::CommandOption;
use crate::outcome::{Outcome, EXIT_FAILURE};
use crate::usage::render_rows;

/// First arguments that request the application's usage.
const HELP_NAMES: [&str; 4] = ["", "help", "-h", "--help"];

/// Returns true if the first argument asks for top-level help.
pub fn is_help_request(name: &str) -> bool {
    HELP_NAMES.contains(&name)
}

/// Splits arguments into the command name (empty if there are none) and the
/// rest.
pub fn split_command(args: &[String]) -> (&str, &[String]) {
    match args.split_first() {
        Some((name, rest)) => (name.as_str(), rest),
        None => ("", args),
    }
}

/// Converts process arguments to strings, replacing invalid UTF-8 with
/// U+FFFD.
fn lossy_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.into_string() {
            Ok(arg) => arg,
            Err(raw) => {
                let lossy = raw.to_string_lossy().into_owned();
                tracing::warn!(arg = %lossy, "argument is not valid UTF-8");
                lossy
            }
        })
        .collect()
}

/// A command-line application made of named subcommands.
///
/// # Example
///
/// ```rust
/// use subcmd::{action, flags, App, Outcome};
///
/// let mut app = App::new("tool", "demo");
/// app.add_command("greet", "says hello", [
///     flags(|f| {
///         f.string("name", "world", "who to greet");
///     }),
///     action(|flags| {
///         println!("hello {}", flags.get_str("name").unwrap_or_default());
///         Ok(())
///     }),
/// ]);
///
/// let mut stderr = Vec::new();
/// let outcome = app.dispatch_to(["greet", "--name", "ferris"], &mut stderr)?;
/// assert!(matches!(outcome, Outcome::Executed(Ok(()))));
/// assert!(stderr.is_empty());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct App {
    name: String,
    description: String,
    commands: Vec<Command>,
}

impl App {
    /// Creates an application with no commands.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Registered commands, in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// The first command registered under `name`.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name() == name)
    }

    /// Mutable access to the first command registered under `name`.
    pub fn command_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.commands.iter_mut().find(|c| c.name() == name)
    }

    /// Registers a command and returns it for further configuration.
    ///
    /// Options are applied in order. Names are not checked for uniqueness;
    /// dispatch uses the first command registered under a name.
    pub fn add_command<I>(
        &mut self,
        name: impl Into<String>,
        usage: impl Into<String>,
        options: I,
    ) -> &mut Command
    where
        I: IntoIterator<Item = CommandOption>,
    {
        let mut cmd = Command::new(&self.name, name.into(), usage.into());
        for option in options {
            option.apply(&mut cmd);
        }

        if self.command(cmd.name()).is_some() {
            tracing::warn!(
                app = %self.name,
                command = %cmd.name(),
                "duplicate command name; it will be unreachable"
            );
        }
        tracing::trace!(app = %self.name, command = %cmd.name(), "registered command");

        self.commands.push(cmd);
        let last = self.commands.len() - 1;
        &mut self.commands[last]
    }

    /// Renders the application's usage.
    ///
    /// ```text
    /// tool - demo
    ///
    /// Usage:
    ///   tool [Command] [...Options] [...Args]
    ///
    /// Commands:
    ///   build  builds the project
    ///   greet  says hello
    /// ```
    pub fn usage(&self) -> String {
        let rows: Vec<(&str, &str)> = self
            .commands
            .iter()
            .map(|c| (c.name(), c.usage_text()))
            .collect();

        format!(
            "{name} - {description}\n\n\
             Usage:\n  {name} [Command] [...Options] [...Args]\n\n\
             Commands:\n{commands}",
            name = self.name,
            description = self.description,
            commands = render_rows(&rows),
        )
    }

    /// Dispatches `args` (without the program name), writing diagnostics to
    /// `err`.
    ///
    /// The only errors are failures to write to `err`.
    pub fn dispatch_to<I, S, W>(&mut self, args: I, err: &mut W) -> io::Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        W: Write,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let (name, rest) = split_command(&args);

        if is_help_request(name) {
            tracing::debug!(app = %self.name, "top-level help requested");
            writeln!(err, "{}", self.usage())?;
            writeln!(err)?;
            writeln!(
                err,
                "Run '{} COMMAND --help' for more information on a command.",
                self.name
            )?;
            return Ok(Outcome::AppHelp);
        }

        let Some(index) = self.commands.iter().position(|c| c.name() == name) else {
            tracing::debug!(app = %self.name, command = %name, "unknown command");
            writeln!(err, "{}", self.usage())?;
            writeln!(err, "unknown command {}", name)?;
            writeln!(err)?;
            return Ok(Outcome::UnknownCommand(name.to_string()));
        };

        let display_name = format!("{} {}", self.name, name);
        let cmd = &mut self.commands[index];
        let handling = cmd.flags().error_handling();
        cmd.flags_mut().init(display_name, handling);

        match cmd.flags_mut().parse(rest.iter().cloned()) {
            ParseOutcome::Parsed => {}
            ParseOutcome::HelpRequested => {
                writeln!(err, "{}", cmd.usage())?;
                writeln!(err)?;
                return Ok(Outcome::CommandHelp);
            }
            ParseOutcome::Failed(flag_err) => {
                writeln!(err, "{}", cmd.usage())?;
                writeln!(err)?;
                writeln!(err, "{}", flag_err)?;
                return Ok(Outcome::FlagError(flag_err));
            }
        }

        match cmd.run_action() {
            Some(result) => {
                tracing::debug!(command = %cmd.name(), ok = result.is_ok(), "action finished");
                Ok(Outcome::Executed(result))
            }
            None => {
                tracing::debug!(command = %cmd.name(), "command has no action");
                writeln!(err, "{}", cmd.usage())?;
                writeln!(err)?;
                Ok(Outcome::NoAction)
            }
        }
    }

    /// Dispatches `args` with diagnostics on stderr.
    pub fn run_with<I, S>(&mut self, args: I) -> io::Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stderr = io::stderr();
        let mut lock = stderr.lock();
        self.dispatch_to(args, &mut lock)
    }

    /// Dispatches the process arguments and returns the exit status.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    ///
    /// ```rust,no_run
    /// use std::process::ExitCode;
    ///
    /// fn main() -> ExitCode {
    ///     let mut app = subcmd::App::new("tool", "demo");
    ///     app.add_command("build", "builds the project", []);
    ///     app.run()
    /// }
    /// ```
    pub fn run(&mut self) -> ExitCode {
        match self.run_with(lossy_args(std::env::args_os().skip(1))) {
            Ok(outcome) => std::process::Termination::report(outcome),
            Err(e) => {
                tracing::error!(error = %e, "failed to write diagnostics");
                ExitCode::from(EXIT_FAILURE)
            }
        }
    }
}
