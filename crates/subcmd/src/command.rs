//! Registered subcommands.

use std::fmt;

use crate::action::Action;
use crate::flags::{ErrorHandling, FlagSet};
use crate::option::CommandOption;

/// A named subcommand: one-line usage, its own flag set, and an optional
/// action.
///
/// Commands are created by [`App::add_command`](crate::App::add_command),
/// which names the flag set `"<app> <command>"`.
pub struct Command {
    name: String,
    usage: String,
    flags: FlagSet,
    action: Option<Box<dyn Action>>,
}

impl Command {
    pub(crate) fn new(app_name: &str, name: String, usage: String) -> Self {
        let flags = FlagSet::new(
            format!("{} {}", app_name, name),
            ErrorHandling::ContinueOnError,
        );
        Self {
            name,
            usage,
            flags,
            action: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The one-line description shown in the application's command listing.
    pub fn usage_text(&self) -> &str {
        &self.usage
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut FlagSet {
        &mut self.flags
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Sets the action, replacing any previous one.
    pub fn set_action<A: Action + 'static>(&mut self, action: A) {
        self.action = Some(Box::new(action));
    }

    /// Applies an option after registration.
    pub fn apply(&mut self, option: CommandOption) -> &mut Self {
        option.apply(self);
        self
    }

    /// Renders the command's usage block.
    ///
    /// ```text
    /// Usage:
    ///   tool greet [...options]
    ///
    /// Options:
    ///   --name string  who to greet (default "world")
    /// ```
    pub fn usage(&self) -> String {
        let mut out = format!(
            "Usage:\n  {} [...options]\n\nOptions:\n{}",
            self.flags.name(),
            self.flags.flag_usages()
        );
        if out.ends_with('\n') {
            out.pop();
        }
        out
    }

    /// Runs the action against the current flag values, if there is one.
    pub(crate) fn run_action(&mut self) -> Option<anyhow::Result<()>> {
        let flags = &self.flags;
        self.action.as_mut().map(|action| action.run(flags))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("flags", &self.flags)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{action, flags};

    #[test]
    fn test_flag_set_named_after_app_and_command() {
        let cmd = Command::new("tool", "build".into(), "builds".into());
        assert_eq!(cmd.flags().name(), "tool build");
        assert_eq!(cmd.flags().error_handling(), ErrorHandling::ContinueOnError);
        assert!(!cmd.has_action());
    }

    #[test]
    fn test_usage_without_flags() {
        let cmd = Command::new("tool", "build".into(), "builds".into());
        assert_eq!(
            cmd.usage(),
            "Usage:\n  tool build [...options]\n\nOptions:"
        );
    }

    #[test]
    fn test_usage_with_flags_trims_one_newline() {
        let mut cmd = Command::new("tool", "greet".into(), "says hello".into());
        cmd.apply(flags(|f| {
            f.string("name", "world", "who to greet")
                .bool("shout", false, "uppercase");
        }));

        assert_eq!(
            cmd.usage(),
            concat!(
                "Usage:\n",
                "  tool greet [...options]\n",
                "\n",
                "Options:\n",
                "  --name string  who to greet (default \"world\")\n",
                "  --shout        uppercase",
            )
        );
    }

    #[test]
    fn test_apply_sets_action() {
        let mut cmd = Command::new("tool", "build".into(), "builds".into());
        cmd.apply(action(|_| Ok(())));
        assert!(cmd.has_action());
        assert!(matches!(cmd.run_action(), Some(Ok(()))));
    }

    #[test]
    fn test_run_action_without_action() {
        let mut cmd = Command::new("tool", "build".into(), "builds".into());
        assert!(cmd.run_action().is_none());
    }
}
