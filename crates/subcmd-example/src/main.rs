use std::process::ExitCode;

use anyhow::Result;

/// Installs a stderr log subscriber filtered by `RUST_LOG` (default `warn`).
fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("{e}");
    }

    subcmd_example::build_app().run()
}
