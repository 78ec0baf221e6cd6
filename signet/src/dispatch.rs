/*!
Turning a complete argv into either a ready-to-invoke [`Call`] or a help
message. Nothing is invoked here; see [`run`][crate::run] for that.
*/

use std::fmt;

use tracing::debug;

use crate::{
    arguments::Arguments,
    binding::FunctionBinding,
    errors::{ConfigurationError, Error, ParsingError},
    registry::Registry,
    strategy::ParseResult,
};

/// The outcome of a successful [`setup`][Registry::setup]
pub enum Dispatch<'a, R> {
    /// A function and its parsed arguments, ready to be invoked
    Call(Call<'a, R>),

    /// The user asked for help (or supplied nothing to a function that needs
    /// something); this is the text to show them.
    Help(String),
}

/// A parsed call that hasn't happened yet
pub struct Call<'a, R> {
    binding: &'a FunctionBinding<R>,
    result: ParseResult,
}

impl<'a, R> Call<'a, R> {
    #[inline]
    #[must_use]
    pub fn binding(&self) -> &'a FunctionBinding<R> {
        self.binding
    }

    #[inline]
    #[must_use]
    pub fn result(&self) -> &ParseResult {
        &self.result
    }

    /// Bind the parsed values, along with defaults, to parameter names
    #[must_use]
    pub fn arguments(&self) -> Arguments {
        self.binding.arguments(&self.result)
    }

    pub fn invoke(&self) -> Result<R, Error> {
        self.binding.invoke(&self.arguments())
    }
}

impl<R> fmt::Debug for Call<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("function", &self.binding.name())
            .field("result", &self.result)
            .finish()
    }
}

impl<R> fmt::Debug for Dispatch<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Call(call) => f.debug_tuple("Call").field(call).finish(),
            Dispatch::Help(text) => f.debug_tuple("Help").field(text).finish(),
        }
    }
}

impl<R> Registry<R> {
    /**
    Select a function and parse its arguments from `argv`, whose first
    element is the program path.

    With one registered function, every token after the program path is an
    argument to it, unless the first is a help trigger. With several, the
    first token names the function, and every token after it is passed
    through untouched; help for a function is `prog --help <function>`.
    Calling a function that has required parameters with no arguments at
    all also produces its usage.
    */
    pub fn setup<S: AsRef<str>>(&self, argv: &[S]) -> Result<Dispatch<'_, R>, Error> {
        let argv: Vec<&str> = argv.iter().map(AsRef::as_ref).collect();
        let program = self.program_name(argv.first().copied());
        let tokens = argv.get(1..).unwrap_or(&[]);

        let (binding, command, raw) = match self.bindings() {
            [] => return Err(ConfigurationError::NoFunctions.into()),
            [binding] => {
                if let Some(&first) = tokens.first()
                    && self.is_help_trigger(first)
                {
                    return Ok(Dispatch::Help(self.usage_for(binding, program, false)));
                }

                (binding, None, tokens)
            }
            _ => {
                let Some((&selector, raw)) = tokens.split_first() else {
                    debug!("no function selected; showing the overview");
                    return Ok(Dispatch::Help(self.overview(program)));
                };

                if self.is_help_trigger(selector) {
                    return Ok(Dispatch::Help(
                        match raw.first().and_then(|&name| self.get(name)) {
                            Some(binding) => self.usage_for(binding, program, true),
                            None => self.overview(program),
                        },
                    ));
                }

                let binding = self
                    .get(selector)
                    .ok_or_else(|| ParsingError::UnknownFunction(selector.to_owned()))?;

                (binding, Some(binding.name()), raw)
            }
        };

        debug!(function = binding.name(), arguments = raw.len(), "selected function");

        match binding.parse(raw) {
            Ok(result) => Ok(Dispatch::Call(Call { binding, result })),
            Err(Error::InsufficientArguments { missing }) if raw.is_empty() => {
                debug!(
                    function = binding.name(),
                    ?missing,
                    "no arguments given; showing usage instead"
                );
                Ok(Dispatch::Help(self.usage_for(binding, program, command.is_some())))
            }
            Err(error) => Err(error),
        }
    }

    fn usage_for(&self, binding: &FunctionBinding<R>, program: &str, named: bool) -> String {
        let command = named.then(|| binding.name());
        binding.usage(program, command, self.settings().width)
    }
}
