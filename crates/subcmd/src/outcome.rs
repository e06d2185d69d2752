//! Dispatch outcomes and exit codes.
//!
//! Dispatch never terminates the process itself. It writes its diagnostics
//! and returns an [`Outcome`]; the outermost entry point turns that into a
//! process status, either by returning it from `main` (it implements
//! [`Termination`]) or by calling [`Outcome::exit`].

use std::process::{ExitCode, Termination};

use crate::error::FlagError;

/// Exit status for successful runs and command-level help.
pub const EXIT_OK: u8 = 0;
/// Exit status when an action returns an error.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for invocation errors: no command, unknown command, bad flags.
pub const EXIT_USAGE: u8 = 2;

/// How a dispatch ended.
#[derive(Debug)]
pub enum Outcome {
    /// No command, or `help`/`-h`/`--help`: application usage was printed.
    AppHelp,
    /// The first argument named no registered command.
    UnknownCommand(String),
    /// The command's flags requested help.
    CommandHelp,
    /// The command's flags failed to parse.
    FlagError(FlagError),
    /// The command has no action; its usage was printed.
    NoAction,
    /// The action ran. Its result is passed through untouched.
    Executed(anyhow::Result<()>),
}

impl Outcome {
    /// The process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::AppHelp | Outcome::UnknownCommand(_) | Outcome::FlagError(_) => EXIT_USAGE,
            Outcome::CommandHelp | Outcome::NoAction | Outcome::Executed(Ok(())) => EXIT_OK,
            Outcome::Executed(Err(_)) => EXIT_FAILURE,
        }
    }

    /// Returns true if the exit status is zero.
    pub fn is_success(&self) -> bool {
        self.exit_code() == EXIT_OK
    }

    /// Returns true if dispatch already wrote usage or errors.
    ///
    /// Only an executed action leaves the diagnostic stream to the action.
    pub fn emitted_usage(&self) -> bool {
        !matches!(self, Outcome::Executed(_))
    }

    /// Returns true if an action ran (successfully or not).
    pub fn is_executed(&self) -> bool {
        matches!(self, Outcome::Executed(_))
    }

    /// Terminates the process with this outcome's status.
    ///
    /// An action error is reported on stderr first, as [`Termination`] does.
    pub fn exit(self) -> ! {
        std::process::exit(i32::from(self.report_error()))
    }

    /// Prints an action error the way anyhow's `main` does and returns the
    /// exit status.
    fn report_error(&self) -> u8 {
        if let Outcome::Executed(Err(err)) = self {
            eprintln!("Error: {err:?}");
        }
        self.exit_code()
    }
}

impl Termination for Outcome {
    fn report(self) -> ExitCode {
        ExitCode::from(self.report_error())
    }
}
