use std::collections::BTreeMap;

use signet_parser::{ArgAccess, Scanner, Visitor};
use tracing::trace;

use crate::{
    errors::{Error, ParsingError},
    parameter::Parameter,
    signature::{Signature, cast_parameter},
    value::Value,
};

use super::{ParseResult, check_required, seed_flags};

/// The state of a mixed parse that is in progress
struct State<'s, 'arg> {
    signature: &'s Signature,
    keywords: BTreeMap<String, Value>,
    leftovers: Vec<&'arg str>,
}

impl<'arg> State<'_, 'arg> {
    /// A switch for `parameter` was found. Flags become true; everything
    /// else takes a value through `arg`.
    fn switch(
        &mut self,
        parameter: &Parameter,
        arg: impl ArgAccess<'arg>,
        switch: impl FnOnce() -> String,
    ) -> Result<(), Error> {
        trace!(parameter = parameter.name(), "switch");

        let value = match parameter.is_flag() {
            true => Value::Bool(true),
            false => {
                let raw = arg
                    .take()
                    .ok_or_else(|| ParsingError::NeedsArgument(switch()))?;
                cast_parameter(parameter, raw)?
            }
        };

        self.keywords.insert(parameter.name().to_owned(), value);
        Ok(())
    }
}

struct SwitchVisitor<'a, 's, 'arg> {
    state: &'a mut State<'s, 'arg>,
}

impl<'arg> Visitor<'arg> for SwitchVisitor<'_, '_, 'arg> {
    type Value = Result<(), Error>;

    fn visit_positional(self, argument: &'arg str) -> Self::Value {
        self.state.leftovers.push(argument);
        Ok(())
    }

    fn visit_long_option(self, option: &'arg str, argument: &'arg str) -> Self::Value {
        let parameter = lookup_long(self.state.signature, option)?;

        if parameter.is_flag() {
            return Err(ParsingError::FlagGotArgument {
                switch: format!("--{option}"),
                value: argument.to_owned(),
            }
            .into());
        }

        let value = cast_parameter(parameter, argument)?;
        self.state
            .keywords
            .insert(parameter.name().to_owned(), value);

        Ok(())
    }

    fn visit_long(self, option: &'arg str, arg: impl ArgAccess<'arg>) -> Self::Value {
        let parameter = lookup_long(self.state.signature, option)?;
        self.state.switch(parameter, arg, || format!("--{option}"))
    }

    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Self::Value {
        let parameter = self
            .state
            .signature
            .lookup_short(option)
            .ok_or_else(|| ParsingError::UnknownSwitch(format!("-{option}")))?;

        self.state.switch(parameter, arg, || format!("-{option}"))
    }
}

fn lookup_long<'s>(signature: &'s Signature, option: &str) -> Result<&'s Parameter, ParsingError> {
    signature
        .lookup_long(option)
        .ok_or_else(|| ParsingError::UnknownSwitch(format!("--{option}")))
}

/**
Switches anywhere, positionals for the rest.

Every non-boolean parameter can be given as `-n value`, `-nvalue`,
`--name value` or `--name=value`; booleans as `-d` or `--debug`, bundled as
`-dv`. After the switches are consumed, the remaining plain tokens fill the
parameters that no switch set, in declared order; a boolean filled this way
is true whatever the token. Booleans that nothing set are false. A bare `--`
makes every following token plain.
*/
pub fn parse(signature: &Signature, tokens: &[&str]) -> Result<ParseResult, Error> {
    let mut state = State {
        signature,
        keywords: BTreeMap::new(),
        leftovers: Vec::new(),
    };

    let mut scanner = Scanner::new(tokens.iter().copied());

    while let Some(result) = scanner.next_token(SwitchVisitor { state: &mut state }) {
        result?;
    }

    let State {
        mut keywords,
        leftovers,
        ..
    } = state;

    let unfilled: Vec<&Parameter> = signature
        .parameters()
        .iter()
        .filter(|parameter| !keywords.contains_key(parameter.name()))
        .collect();

    let mut leftovers = leftovers.into_iter();

    for (parameter, token) in unfilled.into_iter().zip(leftovers.by_ref()) {
        let value = cast_parameter(parameter, token)?;
        keywords.insert(parameter.name().to_owned(), value);
    }

    if let Some(extra) = leftovers.next() {
        return Err(ParsingError::UnexpectedArgument(extra.to_owned()).into());
    }

    check_required(signature, |_, parameter| {
        keywords.contains_key(parameter.name())
    })?;

    seed_flags(signature, &mut keywords);

    Ok(ParseResult {
        keywords,
        ..ParseResult::default()
    })
}
