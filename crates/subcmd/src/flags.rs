//! Per-command flag sets backed by clap.
//!
//! A [`FlagSet`] is a small declarative layer over a clap [`clap::Command`]:
//! flags are declared with a name, a typed default and help text, and the
//! clap command is rebuilt from those declarations on every parse. Rebuilding
//! is what makes [`FlagSet::init`] a true reset: parse state lives only in the
//! [`ArgMatches`] captured by the last [`FlagSet::parse`].
//!
//! # Argument Syntax
//!
//! ```text
//! --name value      string/int/float flags
//! --name=value
//! --verbose         bool flags (sets true)
//! --verbose=false
//! -h, --help        help request
//! --                ends flag parsing
//! ```
//!
//! Flags and positional arguments may be interleaved: `a --name x b` sets
//! `name` and leaves `["a", "b"]` in [`FlagSet::args`]. Everything after `--`
//! is positional.

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice};

use crate::error::FlagError;
use crate::usage::render_rows;

const HELP_ID: &str = "__help";
const ARGS_ID: &str = "__args";

/// How a [`FlagSet`] reacts to a failed parse or a help request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorHandling {
    /// Return the outcome to the caller.
    #[default]
    ContinueOnError,
    /// Exit with status 0 on help, 2 on error (after printing to stderr).
    ExitOnError,
    /// Panic with the error message.
    PanicOnError,
}

/// A flag's typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl FlagValue {
    /// Short type name used in usage text.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FlagValue::Str(_) => "string",
            FlagValue::Bool(_) => "bool",
            FlagValue::Int(_) => "int",
            FlagValue::Float(_) => "float",
        }
    }

    /// Returns true for `""`, `false`, `0` and `0.0`.
    pub fn is_zero(&self) -> bool {
        match self {
            FlagValue::Str(s) => s.is_empty(),
            FlagValue::Bool(b) => !b,
            FlagValue::Int(i) => *i == 0,
            FlagValue::Float(f) => *f == 0.0,
        }
    }

    fn display_default(&self) -> String {
        match self {
            FlagValue::Str(s) => format!("{s:?}"),
            FlagValue::Bool(b) => b.to_string(),
            FlagValue::Int(i) => i.to_string(),
            FlagValue::Float(f) => f.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct FlagSpec {
    name: String,
    default: FlagValue,
    help: String,
}

impl FlagSpec {
    fn synopsis(&self) -> String {
        match self.default {
            FlagValue::Bool(_) => format!("--{}", self.name),
            _ => format!("--{} {}", self.name, self.default.kind_name()),
        }
    }

    fn description(&self) -> String {
        if self.default.is_zero() {
            self.help.clone()
        } else {
            format!("{} (default {})", self.help, self.default.display_default())
        }
    }

    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(self.help.clone())
            .action(ArgAction::Set);

        match &self.default {
            FlagValue::Str(v) => arg
                .value_name("string")
                .value_parser(value_parser!(String))
                .default_value(v.clone()),
            FlagValue::Bool(v) => arg
                .value_parser(value_parser!(bool))
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .default_value(if *v { "true" } else { "false" }),
            FlagValue::Int(v) => arg
                .value_name("int")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value(v.to_string()),
            FlagValue::Float(v) => arg
                .value_name("float")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true)
                .default_value(v.to_string()),
        }
    }
}

/// How a call to [`FlagSet::parse`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// All arguments were consumed; values are available through the getters.
    Parsed,
    /// `-h` or `--help` was given. Not an error.
    HelpRequested,
    /// Parsing failed.
    Failed(FlagError),
}

impl ParseOutcome {
    /// Returns true if parsing succeeded.
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed)
    }
}

/// A named set of flag declarations plus the state of its last parse.
///
/// # Example
///
/// ```rust
/// use subcmd::{ErrorHandling, FlagSet, ParseOutcome};
///
/// let mut flags = FlagSet::new("tool greet", ErrorHandling::ContinueOnError);
/// flags
///     .string("name", "world", "who to greet")
///     .int("times", 1, "how many greetings");
///
/// assert_eq!(flags.parse(["--name", "ferris", "extra"]), ParseOutcome::Parsed);
/// assert_eq!(flags.get_str("name"), Some("ferris"));
/// assert_eq!(flags.get_int("times"), Some(1));
/// assert_eq!(flags.args(), ["extra"]);
/// ```
#[derive(Debug, Clone)]
pub struct FlagSet {
    name: String,
    handling: ErrorHandling,
    specs: Vec<FlagSpec>,
    matches: Option<ArgMatches>,
    args: Vec<String>,
    parsed: bool,
}

impl FlagSet {
    /// Creates an empty flag set.
    pub fn new(name: impl Into<String>, handling: ErrorHandling) -> Self {
        Self {
            name: name.into(),
            handling,
            specs: Vec::new(),
            matches: None,
            args: Vec::new(),
            parsed: false,
        }
    }

    /// Resets parse state and sets the name and error handling.
    ///
    /// Declared flags are kept; getters return defaults again until the next
    /// parse.
    pub fn init(&mut self, name: impl Into<String>, handling: ErrorHandling) {
        self.name = name.into();
        self.handling = handling;
        self.matches = None;
        self.args.clear();
        self.parsed = false;
    }

    /// The display name, e.g. `"tool build"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn error_handling(&self) -> ErrorHandling {
        self.handling
    }

    pub fn set_error_handling(&mut self, handling: ErrorHandling) {
        self.handling = handling;
    }

    /// Whether [`parse`](Self::parse) has been called since the last reset.
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Declares a string flag.
    pub fn string(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
        help: impl Into<String>,
    ) -> &mut Self {
        self.declare(name.into(), FlagValue::Str(default.into()), help.into())
    }

    /// Declares a bool flag.
    pub fn bool(
        &mut self,
        name: impl Into<String>,
        default: bool,
        help: impl Into<String>,
    ) -> &mut Self {
        self.declare(name.into(), FlagValue::Bool(default), help.into())
    }

    /// Declares an integer flag.
    pub fn int(
        &mut self,
        name: impl Into<String>,
        default: i64,
        help: impl Into<String>,
    ) -> &mut Self {
        self.declare(name.into(), FlagValue::Int(default), help.into())
    }

    /// Declares a floating point flag.
    pub fn float(
        &mut self,
        name: impl Into<String>,
        default: f64,
        help: impl Into<String>,
    ) -> &mut Self {
        self.declare(name.into(), FlagValue::Float(default), help.into())
    }

    fn declare(&mut self, name: String, default: FlagValue, help: String) -> &mut Self {
        let trimmed = name.trim_start_matches('-');
        if trimmed.is_empty() {
            tracing::warn!(flag_set = %self.name, flag = %name, "empty flag name, ignored");
            return self;
        }
        if trimmed.len() != name.len() {
            tracing::warn!(
                flag_set = %self.name,
                flag = %name,
                "flag names are given without dashes; stripping them"
            );
        }
        let name = trimmed.to_string();

        tracing::trace!(
            flag_set = %self.name,
            flag = %name,
            kind = default.kind_name(),
            "declaring flag"
        );
        let spec = FlagSpec {
            name,
            default,
            help,
        };
        match self.specs.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => {
                tracing::warn!(
                    flag_set = %self.name,
                    flag = %spec.name,
                    "flag redeclared, replacing earlier declaration"
                );
                *existing = spec;
            }
            None => self.specs.push(spec),
        }
        self
    }

    /// Returns true if a flag with this name is declared.
    pub fn has_flag(&self, name: &str) -> bool {
        self.spec(name).is_some()
    }

    /// Returns the declared default of a flag.
    pub fn default_value(&self, name: &str) -> Option<&FlagValue> {
        self.spec(name).map(|s| &s.default)
    }

    fn spec(&self, name: &str) -> Option<&FlagSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    fn command(&self) -> clap::Command {
        let mut help = Arg::new(HELP_ID).short('h').action(ArgAction::Help);
        if !self.has_flag("help") {
            help = help.long("help");
        }

        let cmd = clap::Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .args_override_self(true)
            .color(ColorChoice::Never)
            .arg(help);

        self.specs
            .iter()
            .fold(cmd, |cmd, spec| cmd.arg(spec.to_arg()))
            .arg(
                Arg::new(ARGS_ID)
                    .num_args(1..)
                    .action(ArgAction::Append)
                    .allow_negative_numbers(true)
                    .value_parser(value_parser!(String))
                    .hide(true),
            )
    }

    /// Parses arguments (without a program name) against the declared flags.
    ///
    /// Under [`ErrorHandling::ContinueOnError`] the outcome is returned as is;
    /// the other modes exit or panic on anything but success.
    pub fn parse<I, S>(&mut self, args: I) -> ParseOutcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        self.parsed = true;

        let outcome = match self.command().try_get_matches_from(args) {
            Ok(matches) => {
                self.args = matches
                    .get_many::<String>(ARGS_ID)
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default();
                self.matches = Some(matches);
                ParseOutcome::Parsed
            }
            Err(err) if err.kind() == ErrorKind::DisplayHelp => ParseOutcome::HelpRequested,
            Err(err) => ParseOutcome::Failed(FlagError::from_clap(&err)),
        };
        tracing::debug!(flag_set = %self.name, ?outcome, "parsed flags");

        self.handle_outcome(outcome)
    }

    fn handle_outcome(&self, outcome: ParseOutcome) -> ParseOutcome {
        match (self.handling, outcome) {
            (ErrorHandling::ContinueOnError, outcome) | (_, outcome @ ParseOutcome::Parsed) => {
                outcome
            }
            (ErrorHandling::ExitOnError, ParseOutcome::HelpRequested) => {
                eprint!("Usage of {}:\n{}", self.name, self.flag_usages());
                std::process::exit(0)
            }
            (ErrorHandling::ExitOnError, ParseOutcome::Failed(err)) => {
                eprintln!("{err}");
                eprint!("Usage of {}:\n{}", self.name, self.flag_usages());
                std::process::exit(2)
            }
            (ErrorHandling::PanicOnError, ParseOutcome::HelpRequested) => {
                panic!("{}: help requested", self.name)
            }
            (ErrorHandling::PanicOnError, ParseOutcome::Failed(err)) => {
                panic!("{}: {err}", self.name)
            }
        }
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Value of a string flag.
    ///
    /// Returns the default before parsing, and `None` for unknown names or
    /// flags of another kind. The same applies to the other getters.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match &self.matches {
            Some(m) => m
                .try_get_one::<String>(name)
                .ok()
                .flatten()
                .map(String::as_str),
            None => match self.default_value(name)? {
                FlagValue::Str(s) => Some(s),
                _ => None,
            },
        }
    }

    /// Value of a bool flag.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match &self.matches {
            Some(m) => m.try_get_one::<bool>(name).ok().flatten().copied(),
            None => match self.default_value(name)? {
                FlagValue::Bool(b) => Some(*b),
                _ => None,
            },
        }
    }

    /// Value of an integer flag.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        match &self.matches {
            Some(m) => m.try_get_one::<i64>(name).ok().flatten().copied(),
            None => match self.default_value(name)? {
                FlagValue::Int(i) => Some(*i),
                _ => None,
            },
        }
    }

    /// Value of a floating point flag.
    pub fn get_float(&self, name: &str) -> Option<f64> {
        match &self.matches {
            Some(m) => m.try_get_one::<f64>(name).ok().flatten().copied(),
            None => match self.default_value(name)? {
                FlagValue::Float(f) => Some(*f),
                _ => None,
            },
        }
    }

    /// Returns true if the flag was given on the command line in the last
    /// parse (as opposed to holding its default).
    pub fn is_set(&self, name: &str) -> bool {
        self.has_flag(name)
            && self
                .matches
                .as_ref()
                .and_then(|m| m.value_source(name))
                .is_some_and(|source| source == ValueSource::CommandLine)
    }

    /// Positional arguments left after flag parsing.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The i'th positional argument.
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(String::as_str)
    }

    /// Number of positional arguments.
    pub fn nargs(&self) -> usize {
        self.args.len()
    }

    // =========================================================================
    // Usage
    // =========================================================================

    /// One line per declared flag, sorted by name, each ending in a newline.
    ///
    /// ```text
    ///   --name string  who to greet (default "world")
    ///   --verbose      chatty output
    /// ```
    pub fn flag_usages(&self) -> String {
        let mut specs: Vec<&FlagSpec> = self.specs.iter().collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));

        let rows: Vec<(String, String)> = specs
            .iter()
            .map(|spec| (spec.synopsis(), spec.description()))
            .collect();
        render_rows(&rows)
    }
}
