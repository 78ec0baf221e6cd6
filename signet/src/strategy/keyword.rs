use std::collections::BTreeMap;

use tracing::trace;

use crate::{
    errors::{Error, ParsingError},
    parameter::Parameter,
    signature::{Signature, cast_parameter},
    value::Value,
};

use super::{ParseResult, check_required, seed_flags};

/**
Flag-only parsing. Every token must be a switch or a switch's value:

- `--name value` / `--name=value` for value parameters, `--name` for flags
- `-n value` for value parameters, `-d` for flags
- `-dvq`, a bundle of boolean flags, consumed as a unit

A value token is taken verbatim, even if it starts with `-`.
*/
pub fn parse(signature: &Signature, tokens: &[&str]) -> Result<ParseResult, Error> {
    let mut keywords = BTreeMap::new();
    seed_flags(signature, &mut keywords);

    let mut tokens = tokens.iter().copied();

    while let Some(token) = tokens.next() {
        if let Some(option) = token.strip_prefix("--").filter(|option| !option.is_empty()) {
            let (option, inline) = match option.split_once('=') {
                Some((option, value)) => (option, Some(value)),
                None => (option, None),
            };

            let parameter = signature
                .lookup_long(option)
                .ok_or_else(|| ParsingError::UnknownSwitch(format!("--{option}")))?;

            trace!(parameter = parameter.name(), "long switch");

            let value = match (parameter.is_flag(), inline) {
                (true, None) => Value::Bool(true),
                (true, Some(value)) => {
                    return Err(ParsingError::FlagGotArgument {
                        switch: format!("--{option}"),
                        value: value.to_owned(),
                    }
                    .into());
                }
                (false, Some(value)) => cast_parameter(parameter, value)?,
                (false, None) => take_value(parameter, tokens.next(), || format!("--{option}"))?,
            };

            keywords.insert(parameter.name().to_owned(), value);
        } else if let Some(run) = token.strip_prefix('-').filter(|run| !run.is_empty()) {
            let mut chars = run.chars();

            match (chars.next(), chars.next()) {
                (Some(option), None) => {
                    let parameter = lookup_short(signature, option)?;
                    trace!(parameter = parameter.name(), "short switch");

                    let value = match parameter.is_flag() {
                        true => Value::Bool(true),
                        false => take_value(parameter, tokens.next(), || format!("-{option}"))?,
                    };

                    keywords.insert(parameter.name().to_owned(), value);
                }
                // A bundle of flags, like `-dv`
                _ => {
                    for option in run.chars() {
                        let parameter = lookup_short(signature, option)?;

                        if !parameter.is_flag() {
                            return Err(ParsingError::BundledValue(option).into());
                        }

                        trace!(parameter = parameter.name(), "bundled switch");
                        keywords.insert(parameter.name().to_owned(), Value::Bool(true));
                    }
                }
            }
        } else {
            return Err(ParsingError::UnexpectedArgument(token.to_owned()).into());
        }
    }

    check_required(signature, |_, parameter| {
        keywords.contains_key(parameter.name())
    })?;

    Ok(ParseResult {
        keywords,
        ..ParseResult::default()
    })
}

fn lookup_short(signature: &Signature, option: char) -> Result<&Parameter, ParsingError> {
    signature
        .lookup_short(option)
        .ok_or_else(|| ParsingError::UnknownSwitch(format!("-{option}")))
}

fn take_value(
    parameter: &Parameter,
    token: Option<&str>,
    switch: impl FnOnce() -> String,
) -> Result<Value, Error> {
    match token {
        Some(token) => cast_parameter(parameter, token),
        None => Err(ParsingError::NeedsArgument(switch()).into()),
    }
}
