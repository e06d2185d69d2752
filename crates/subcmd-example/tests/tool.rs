use subcmd::{ErrorHandling, FlagSet, Outcome};
use subcmd_example::{build_app, greet, sum};

fn run(args: &[&str]) -> (Outcome, String) {
    let mut app = build_app();
    let mut err = Vec::new();
    let outcome = app.dispatch_to(args.iter().copied(), &mut err).unwrap();
    (outcome, String::from_utf8(err).unwrap())
}

fn greet_flags(args: &[&str]) -> FlagSet {
    let mut app = build_app();
    let cmd = app.command_mut("greet").unwrap();
    assert!(cmd.flags_mut().parse(args.iter().copied()).is_parsed());
    cmd.flags().clone()
}

#[test]
fn test_no_args_lists_commands() {
    let (outcome, err) = run(&[]);
    assert_eq!(outcome.exit_code(), 2);
    assert!(err.starts_with("tool - a small demo of subcommand dispatch\n"));
    assert!(err.contains("  build  builds the project\n"));
    assert!(err.contains("  greet  prints a greeting\n"));
    assert!(err.contains("  sum    adds numbers given as arguments\n"));
    assert!(err.ends_with("Run 'tool COMMAND --help' for more information on a command.\n"));
}

#[test]
fn test_build_prints_usage_and_succeeds() {
    let (outcome, err) = run(&["build"]);
    assert!(matches!(outcome, Outcome::NoAction));
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(err, "Usage:\n  tool build [...options]\n\nOptions:\n\n");
}

#[test]
fn test_deploy_is_unknown() {
    let (outcome, err) = run(&["deploy"]);
    assert_eq!(outcome.exit_code(), 2);
    assert!(err.contains("unknown command deploy\n"));
}

#[test]
fn test_greet_help_lists_flags() {
    let (outcome, err) = run(&["greet", "--help"]);
    assert!(matches!(outcome, Outcome::CommandHelp));
    assert!(err.contains("  --name string  who to greet (default \"world\")\n"));
    assert!(err.contains("  --shout        uppercase the greeting\n"));
    assert!(err.contains("  --times int    how many times to greet (default 1)\n"));
}

#[test]
fn test_greet_runs() {
    let (outcome, err) = run(&["greet", "--name", "ferris"]);
    assert!(matches!(outcome, Outcome::Executed(Ok(()))));
    assert!(err.is_empty());
}

#[test]
fn test_greet_lines() {
    let flags = greet_flags(&["--name", "ferris", "--times", "2", "--shout"]);
    assert_eq!(greet(&flags), vec!["HELLO, FERRIS!", "HELLO, FERRIS!"]);
}

#[test]
fn test_greet_defaults() {
    let flags = greet_flags(&[]);
    assert_eq!(greet(&flags), vec!["hello, world!"]);
}

#[test]
fn test_sum_formats_with_precision() {
    let mut flags = FlagSet::new("tool sum", ErrorHandling::ContinueOnError);
    flags.int("precision", 2, "");
    assert!(flags.parse(["--precision", "1", "1.25", "2", "-0.5"]).is_parsed());
    assert_eq!(sum(&flags).unwrap(), "2.8");
}

#[test]
fn test_sum_rejects_non_numbers() {
    let (outcome, _) = run(&["sum", "1", "two"]);
    match outcome {
        Outcome::Executed(Err(e)) => assert_eq!(e.to_string(), "not a number: two"),
        other => panic!("expected action error, got {:?}", other),
    }
}

#[test]
fn test_sum_bad_flag_value() {
    let (outcome, err) = run(&["sum", "--precision", "lots"]);
    assert!(matches!(outcome, Outcome::FlagError(_)));
    assert!(err.starts_with("Usage:\n  tool sum [...options]\n"));
    assert!(err.contains("lots"));
}
