/*!
The invocation layer: dispatch a command line, then print help, print an
error, or call the selected function.
*/

use std::{
    io::{self, Write},
    process::{ExitCode, Termination},
};

use tracing::error;

use crate::{
    arguments::LoadedArguments,
    dispatch::Dispatch,
    errors::Error,
    printers::error_report,
    registry::Registry,
};

/// Exit code for a command line that couldn't be parsed
pub const USAGE_EXIT_CODE: u8 = 2;

/// What happened during [`execute`]
#[derive(Debug)]
pub enum Outcome<R> {
    /// The function was called and returned this
    Completed(R),

    /// Help was printed
    Help,

    /// An error was printed. The function may or may not have been called.
    Failed(Error),
}

impl<R> Outcome<R> {
    /// The exit code for a failure: [`USAGE_EXIT_CODE`] if the command line
    /// was at fault, or 1 for anything else.
    #[must_use]
    pub fn failure_code(&self) -> Option<u8> {
        match self {
            Outcome::Failed(error) if error.is_parsing_failure() => Some(USAGE_EXIT_CODE),
            Outcome::Failed(_) => Some(1),
            Outcome::Completed(_) | Outcome::Help => None,
        }
    }
}

impl<R: Termination> Termination for Outcome<R> {
    fn report(self) -> ExitCode {
        if let Some(code) = self.failure_code() {
            return ExitCode::from(code);
        }

        match self {
            Outcome::Completed(value) => value.report(),
            Outcome::Help | Outcome::Failed(_) => ExitCode::SUCCESS,
        }
    }
}

/**
Dispatch `argv` through `registry` and act on the result: help goes to
`out`, errors (with a hint about where to find help) go to `err`, and
anything else is invoked.
*/
pub fn execute<R, S: AsRef<str>>(
    registry: &Registry<R>,
    argv: &[S],
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<Outcome<R>> {
    let program = registry.program_name(argv.first().map(AsRef::as_ref));

    let error = match registry.setup(argv) {
        Ok(Dispatch::Help(text)) => {
            out.write_all(text.as_bytes())?;
            return Ok(Outcome::Help);
        }
        Ok(Dispatch::Call(call)) => match call.invoke() {
            Ok(value) => return Ok(Outcome::Completed(value)),
            Err(error) => error,
        },
        Err(error) => error,
    };

    // The function's name, if the user typed one
    let command = match registry.len() {
        0 | 1 => None,
        _ => argv
            .get(1)
            .map(AsRef::as_ref)
            .filter(|&name| registry.get(name).is_some()),
    };

    writeln!(err, "{}", error_report(program, command, &error))?;
    Ok(Outcome::Failed(error))
}

/// Run `registry` against the process's command line, returning the exit
/// code to finish with.
pub fn run<R: Termination>(registry: &Registry<R>) -> ExitCode {
    let arguments = LoadedArguments::from_env();
    let stdout = io::stdout();
    let stderr = io::stderr();

    match execute(registry, arguments.argv(), &mut stdout.lock(), &mut stderr.lock()) {
        Ok(outcome) => outcome.report(),
        Err(err) => {
            error!(error = %err, "failed to write to stdout or stderr");
            ExitCode::FAILURE
        }
    }
}
