use std::io;

use expect_test::expect;
use signet::{Command, Outcome, ParameterSpec, Registry, USAGE_EXIT_CODE, execute};

fn registry() -> Registry<u32> {
    let mut registry = Registry::new();
    registry
        .register(
            Command::new("double", |args| Ok(args.get::<u32>("n")? * 2))
                .param(ParameterSpec::new("n").typed::<u32>())
                .doc("Double a number.\n\nn: the number"),
        )
        .unwrap()
        .register(
            Command::new("zero", |_| Ok(0)).doc("Always zero."),
        )
        .unwrap();
    registry
}

struct Captured {
    outcome: Outcome<u32>,
    out: String,
    err: String,
}

fn run(registry: &Registry<u32>, argv: &[&str]) -> Captured {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let outcome = execute(registry, argv, &mut out, &mut err).unwrap();

    Captured {
        outcome,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
    }
}

#[test]
fn completed() {
    let captured = run(&registry(), &["/bin/prog", "double", "21"]);

    assert!(matches!(captured.outcome, Outcome::Completed(42)));
    assert_eq!(captured.outcome.failure_code(), None);
    assert!(captured.out.is_empty());
    assert!(captured.err.is_empty());
}

#[test]
fn help_goes_to_out() {
    let captured = run(&registry(), &["/bin/prog", "--help", "double"]);

    assert!(matches!(captured.outcome, Outcome::Help));
    assert!(captured.err.is_empty());

    expect![[r#"
        Double a number.

        Usage:
          prog double <N>

        Arguments:
          <N>  the number

        Options:
          -n, --n <N>
    "#]]
    .assert_eq(&captured.out);
}

#[test]
fn overview() {
    let captured = run(&registry(), &["/bin/prog"]);

    expect![[r#"
        Usage:
          prog <COMMAND> [ARGS]...

        Commands:
          double  Double a number.
          zero    Always zero.

        Run 'prog --help <COMMAND>' for more information on a command.
    "#]]
    .assert_eq(&captured.out);
}

#[test]
fn parsing_errors_go_to_err() {
    let captured = run(&registry(), &["/bin/prog", "double", "many"]);

    assert!(captured.out.is_empty());
    expect![[r#"
        prog: invalid value "many" for n: invalid digit found in string
        Run 'prog --help double' for usage.
    "#]]
    .assert_eq(&captured.err);

    assert_eq!(captured.outcome.failure_code(), Some(USAGE_EXIT_CODE));
}

#[test]
fn unknown_function() {
    let captured = run(&registry(), &["prog", "triple", "1"]);

    expect![[r#"
        prog: unknown function "triple"
        Run 'prog --help' for usage.
    "#]]
    .assert_eq(&captured.err);
}

#[test]
fn configuration_errors_exit_with_failure() {
    let captured = run(&Registry::new(), &["prog"]);

    expect![[r#"
        prog: no functions have been registered
    "#]]
    .assert_eq(&captured.err);
    assert_eq!(captured.outcome.failure_code(), Some(1));
}

struct Closed;

impl io::Write for Closed {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_failures_are_returned() {
    let registry = registry();

    let error = execute(&registry, &["prog", "--help"], &mut Closed, &mut Vec::<u8>::new()).unwrap_err();
    assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);

    let error = execute(&registry, &["prog", "triple"], &mut Vec::<u8>::new(), &mut Closed).unwrap_err();
    assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
}
