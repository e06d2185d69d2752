//! Command configuration options.
//!
//! A [`CommandOption`] is a function applied to a freshly built [`Command`]
//! during [`App::add_command`](crate::App::add_command). Options run in the
//! order given, so when two options touch the same setting the later one
//! wins:
//!
//! ```rust
//! use subcmd::{action, flags, App};
//!
//! let mut app = App::new("tool", "demo");
//! app.add_command("greet", "says hello", [
//!     flags(|f| {
//!         f.string("name", "world", "who to greet");
//!     }),
//!     action(|_| Ok(())),
//!     // Replaces the action above.
//!     action(|flags| {
//!         println!("hello {}", flags.get_str("name").unwrap_or_default());
//!         Ok(())
//!     }),
//! ]);
//! ```
//!
//! Custom options wrap any `FnOnce(&mut Command)`:
//!
//! ```rust
//! use subcmd::{App, CommandOption};
//!
//! let hidden_debug = CommandOption::new(|cmd| {
//!     cmd.flags_mut().bool("debug", false, "debug output");
//! });
//!
//! let mut app = App::new("tool", "demo");
//! let cmd = app.add_command("build", "builds the project", [hidden_debug]);
//! assert!(cmd.flags().has_flag("debug"));
//! ```

use std::fmt;

use crate::action::{Action, FnAction};
use crate::command::Command;
use crate::flags::{ErrorHandling, FlagSet};

/// A configuration function applied to a [`Command`].
pub struct CommandOption(Box<dyn FnOnce(&mut Command)>);

impl CommandOption {
    /// Wraps a configuration function.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut Command) + 'static,
    {
        Self(Box::new(f))
    }

    /// Applies the option to a command.
    pub fn apply(self, cmd: &mut Command) {
        (self.0)(cmd)
    }
}

impl fmt::Debug for CommandOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandOption").finish_non_exhaustive()
    }
}

/// Sets the command's action to a closure.
pub fn action<F>(f: F) -> CommandOption
where
    F: FnMut(&FlagSet) -> anyhow::Result<()> + 'static,
{
    CommandOption::new(move |cmd| cmd.set_action(FnAction::new(f)))
}

/// Sets the command's action to an [`Action`] implementation.
pub fn handler<A>(action: A) -> CommandOption
where
    A: Action + 'static,
{
    CommandOption::new(move |cmd| cmd.set_action(action))
}

/// Declares flags on the command's flag set.
pub fn flags<F>(declare: F) -> CommandOption
where
    F: FnOnce(&mut FlagSet) + 'static,
{
    CommandOption::new(move |cmd| declare(cmd.flags_mut()))
}

/// Sets how the command's flag set reacts to parse errors.
///
/// Dispatch keeps this mode when it resets the flag set before parsing.
pub fn error_handling(mode: ErrorHandling) -> CommandOption {
    CommandOption::new(move |cmd| cmd.flags_mut().set_error_handling(mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn command() -> Command {
        Command::new("tool", "build".into(), "builds".into())
    }

    #[test]
    fn test_later_action_wins() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let first = calls.clone();
        let second = calls.clone();

        let mut cmd = command();
        cmd.apply(action(move |_| {
            first.borrow_mut().push("first");
            Ok(())
        }))
        .apply(action(move |_| {
            second.borrow_mut().push("second");
            Ok(())
        }));

        assert!(matches!(cmd.run_action(), Some(Ok(()))));
        assert_eq!(*calls.borrow(), vec!["second"]);
    }

    #[test]
    fn test_flags_options_compose() {
        let mut cmd = command();
        cmd.apply(flags(|f| {
            f.string("out", "dist", "output directory");
        }))
        .apply(flags(|f| {
            f.bool("release", false, "optimized build");
        }));

        assert!(cmd.flags().has_flag("out"));
        assert!(cmd.flags().has_flag("release"));
    }

    #[test]
    fn test_handler_option() {
        struct Noop;
        impl Action for Noop {
            fn run(&mut self, _flags: &FlagSet) -> anyhow::Result<()> {
                Ok(())
            }
        }

        let mut cmd = command();
        cmd.apply(handler(Noop));
        assert!(cmd.has_action());
    }

    #[test]
    fn test_error_handling_option() {
        let mut cmd = command();
        cmd.apply(error_handling(ErrorHandling::PanicOnError));
        assert_eq!(cmd.flags().error_handling(), ErrorHandling::PanicOnError);
    }
}
