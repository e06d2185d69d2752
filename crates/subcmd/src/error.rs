//! Error types for flag parsing.

use clap::error::ErrorKind;

/// A flag set failed to parse its arguments.
///
/// Carries the clap [`ErrorKind`] alongside the human-readable message, so
/// callers can branch on the kind while the dispatcher prints the message
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FlagError {
    /// The clap error category.
    pub kind: ErrorKind,
    /// Message without clap's `error: ` prefix, usage, or tips.
    pub message: String,
}

impl FlagError {
    /// Creates a flag error from a kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Converts a clap error, keeping only its first line.
    ///
    /// Clap renders errors as `error: <what>` followed by usage and a
    /// `--help` tip; the dispatcher prints its own usage, so the rest is noise.
    pub fn from_clap(err: &clap::Error) -> Self {
        let rendered = err.to_string();
        let first = rendered.lines().next().unwrap_or_default();
        let message = first.strip_prefix("error: ").unwrap_or(first).trim_end();
        Self::new(err.kind(), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_clap_strips_prefix_and_usage() {
        let cmd = clap::Command::new("tool build")
            .no_binary_name(true)
            .color(clap::ColorChoice::Never);
        let err = cmd.try_get_matches_from(["--bogus"]).unwrap_err();

        let flag_err = FlagError::from_clap(&err);
        assert_eq!(flag_err.kind, ErrorKind::UnknownArgument);
        assert!(flag_err.message.contains("--bogus"));
        assert!(!flag_err.message.starts_with("error:"));
        assert!(!flag_err.message.contains('\n'));
    }

    #[test]
    fn test_display_is_message() {
        let err = FlagError::new(ErrorKind::InvalidValue, "bad value");
        assert_eq!(err.to_string(), "bad value");
    }
}
