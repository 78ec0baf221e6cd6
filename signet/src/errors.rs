/*!
The error family for everything that can go wrong between registering a
function and handing back a ready-to-invoke call.

Help requests are deliberately absent here: they're a normal outcome of
dispatch, reported through [`Dispatch::Help`][crate::Dispatch::Help].
*/

/// Any failure from registration, setup, or parsing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The registry or a parameter table is unusable. This is a bug in the
    /// program, not a mistake by the user.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Required parameters were still absent after a complete parse
    #[error("missing required {}: {}", plural(.missing), .missing.join(", "))]
    InsufficientArguments { missing: Vec<String> },

    /// The command line itself was malformed
    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

impl Error {
    /// True for the errors caused by the user's command line: malformed
    /// arguments, and missing required arguments.
    #[inline]
    #[must_use]
    pub fn is_parsing_failure(&self) -> bool {
        matches!(self, Error::Parsing(_) | Error::InsufficientArguments { .. })
    }

    /// The missing parameter names, if this is an insufficient-arguments error
    #[inline]
    #[must_use]
    pub fn missing(&self) -> Option<&[String]> {
        match self {
            Error::InsufficientArguments { missing } => Some(missing),
            _ => None,
        }
    }
}

fn plural(missing: &[String]) -> &'static str {
    match missing.len() {
        1 => "argument",
        _ => "arguments",
    }
}

/// Registration-time and setup failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("no functions have been registered")]
    NoFunctions,

    #[error("invalid parameter name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("parameter {0:?} is declared more than once")]
    DuplicateParameter(String),

    #[error("parameter {parameter:?} uses unknown cast {cast:?}")]
    UnknownCast { parameter: String, cast: String },

    #[error("can't infer a cast for parameter {0:?} from its default value")]
    UninferableDefault(String),

    #[error("boolean parameter {0:?} can only default to a boolean")]
    InvalidDefault(String),

    #[error("no value was bound for parameter {0:?}")]
    MissingValue(String),

    #[error("the value bound for parameter {parameter:?} isn't a {expected}")]
    WrongValueType {
        parameter: String,
        expected: &'static str,
    },
}

/// Failures caused by a malformed command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParsingError {
    #[error("unknown function {0:?}")]
    UnknownFunction(String),

    #[error("unrecognized option {0}")]
    UnknownSwitch(String),

    #[error("unknown parameter {0:?}")]
    UnknownParameter(String),

    #[error("unexpected argument {0:?}")]
    UnexpectedArgument(String),

    #[error("too many arguments: expected at most {max}, got {got}")]
    TooManyArguments { max: usize, got: usize },

    #[error("option {0} requires an argument")]
    NeedsArgument(String),

    #[error("option {switch} doesn't take an argument (got {value:?})")]
    FlagGotArgument { switch: String, value: String },

    #[error("option -{0} takes an argument, so it can't be bundled with other flags")]
    BundledValue(char),

    #[error("invalid value {argument:?} for {parameter}: {message}")]
    Cast {
        parameter: String,
        argument: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn insufficient_message() {
        let one = Error::InsufficientArguments {
            missing: vec!["name".to_owned()],
        };
        let two = Error::InsufficientArguments {
            missing: vec!["name".to_owned(), "age".to_owned()],
        };

        expect!["missing required argument: name"].assert_eq(&one.to_string());
        expect!["missing required arguments: name, age"].assert_eq(&two.to_string());
    }

    #[test]
    fn cast_message() {
        let error = Error::from(ParsingError::Cast {
            parameter: "count".to_owned(),
            argument: "abc".to_owned(),
            message: "invalid digit found in string".to_owned(),
        });

        expect![[r#"invalid value "abc" for count: invalid digit found in string"#]]
            .assert_eq(&error.to_string());
    }

    #[test]
    fn families() {
        assert!(Error::from(ParsingError::UnknownFunction("x".to_owned())).is_parsing_failure());
        assert!(
            Error::InsufficientArguments {
                missing: Vec::new()
            }
            .is_parsing_failure()
        );
        assert!(!Error::from(ConfigurationError::NoFunctions).is_parsing_failure());
    }
}
