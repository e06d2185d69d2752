//! Command actions.
//!
//! An action is the work a command performs once its flags have parsed. It
//! receives the parsed [`FlagSet`] and returns `anyhow::Result<()>`; what an
//! error means is up to the caller of dispatch (see [`Outcome`]).
//!
//! Actions take `&mut self`. A CLI process parses arguments, runs one action
//! and exits, so stateful actions can mutate their own fields without
//! interior mutability.
//!
//! [`Outcome`]: crate::Outcome

use crate::flags::FlagSet;

/// Trait for command actions.
///
/// Closures `FnMut(&FlagSet) -> anyhow::Result<()>` implement it through
/// [`FnAction`]; implement it directly for stateful actions.
///
/// # Example
///
/// ```rust
/// use subcmd::{Action, FlagSet};
///
/// struct Counter { runs: u32 }
///
/// impl Action for Counter {
///     fn run(&mut self, _flags: &FlagSet) -> anyhow::Result<()> {
///         self.runs += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Action {
    /// Runs the action with the parsed flags.
    fn run(&mut self, flags: &FlagSet) -> anyhow::Result<()>;
}

/// Adapts a closure to [`Action`].
pub struct FnAction<F> {
    f: F,
}

impl<F> FnAction<F>
where
    F: FnMut(&FlagSet) -> anyhow::Result<()>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Action for FnAction<F>
where
    F: FnMut(&FlagSet) -> anyhow::Result<()>,
{
    fn run(&mut self, flags: &FlagSet) -> anyhow::Result<()> {
        (self.f)(flags)
    }
}
