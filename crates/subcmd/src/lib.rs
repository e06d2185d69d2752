//! Minimal subcommand dispatch for command-line applications.
//!
//! `subcmd` lets a program declare an application name and description,
//! register named subcommands (each with its own flag set and action), and
//! dispatch process arguments to the right one. Flag parsing is done by clap;
//! this crate owns command lookup, usage text, and exit statuses.
//!
//! # Features
//!
//! - **Command registry**: [`App::add_command`] with composable [`CommandOption`]s
//! - **Flag sets**: string, bool, int and float flags with defaults ([`FlagSet`])
//! - **Usage text**: aligned command and flag listings
//! - **Testable dispatch**: [`App::dispatch_to`] writes to any `io::Write` and
//!   returns an [`Outcome`] instead of exiting
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::process::ExitCode;
//! use subcmd::{action, flags, App};
//!
//! fn main() -> ExitCode {
//!     let mut app = App::new("tool", "demo");
//!     app.add_command("build", "builds the project", []);
//!     app.add_command("greet", "says hello", [
//!         flags(|f| {
//!             f.string("name", "world", "who to greet")
//!                 .bool("shout", false, "uppercase the greeting");
//!         }),
//!         action(|flags| {
//!             let name = flags.get_str("name").unwrap_or_default();
//!             println!("hello {name}");
//!             Ok(())
//!         }),
//!     ]);
//!     app.run()
//! }
//! ```
//!
//! # Exit Statuses
//!
//! | Invocation | Outcome | Status |
//! |------------|---------|--------|
//! | no command, `help`, `-h`, `--help` | [`Outcome::AppHelp`] | 2 |
//! | unknown command | [`Outcome::UnknownCommand`] | 2 |
//! | `<command> --help` | [`Outcome::CommandHelp`] | 0 |
//! | bad flags | [`Outcome::FlagError`] | 2 |
//! | command without action | [`Outcome::NoAction`] | 0 |
//! | action ran | [`Outcome::Executed`] | 0, or 1 on error |

mod action;
mod app;
mod command;
mod error;
mod flags;
mod option;
mod outcome;
mod usage;

pub use action::{Action, FnAction};
pub use app::{is_help_request, split_command, App};
pub use command::Command;
pub use error::FlagError;
pub use flags::{ErrorHandling, FlagSet, FlagValue, ParseOutcome};
pub use option::{action, error_handling, flags, handler, CommandOption};
pub use outcome::{Outcome, EXIT_FAILURE, EXIT_OK, EXIT_USAGE};
pub use usage::render_rows;
