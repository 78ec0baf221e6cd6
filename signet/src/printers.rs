use std::fmt::Display;

use lazy_format::lazy_format;

use crate::errors::{ConfigurationError, Error};

/// The line that tells the user where to find help
pub fn help_hint<'a>(program: &'a str, command: Option<&'a str>) -> impl Display + 'a {
    let invocation = lazy_format!(match (command) {
        Some(command) => "{program} --help {command}",
        None => "{program} --help",
    });

    lazy_format!("Run '{invocation}' for usage.")
}

/// The complete message for an error that stopped a call from happening
pub fn error_report<'a>(
    program: &'a str,
    command: Option<&'a str>,
    error: &'a Error,
) -> impl Display + 'a {
    lazy_format!(match (error) {
        // There's no help to point to
        Error::Configuration(ConfigurationError::NoFunctions) => "{program}: {error}",
        _ => ("{program}: {error}\n{hint}", hint = help_hint(program, command)),
    })
}
