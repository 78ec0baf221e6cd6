/*!
The three parsing strategies. Each one consumes a list of raw tokens and a
[`Signature`], producing a [`ParseResult`] ready to be bound and invoked:

- [`Style::Positional`]: tokens map 1:1 onto parameters, in order.
- [`Style::Keyword`]: every value is given through a `-x` / `--name` switch.
- [`Style::Mixed`]: switches anywhere, with leftover plain tokens filling in
  whatever parameters the switches didn't set.
*/

mod keyword;
mod mixed;
mod positional;

use std::{collections::BTreeMap, fmt::Display};

use crate::{errors::Error, help, parameter::Parameter, signature::Signature, value::Value};

/// Which parsing strategy a function uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    Positional,
    Keyword,
    #[default]
    Mixed,
}

/**
The values produced by one parse: a positional sequence, which fills
parameters in declared order, and a name → value mapping.
*/
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    pub positional: Vec<Value>,
    pub keywords: BTreeMap<String, Value>,
}

impl Style {
    /// Parse `tokens` (excluding the program and function names)
    pub fn parse<S: AsRef<str>>(
        self,
        signature: &Signature,
        tokens: &[S],
    ) -> Result<ParseResult, Error> {
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();

        match self {
            Style::Positional => positional::parse(signature, &tokens),
            Style::Keyword => keyword::parse(signature, &tokens),
            Style::Mixed => mixed::parse(signature, &tokens),
        }
    }

    /// The one-line synopsis of `signature`'s parameters in this style
    pub fn synopsis(self, signature: &Signature) -> impl Display {
        help::synopsis(self, signature)
    }
}

/// Every boolean flag that isn't already set is false
fn seed_flags(signature: &Signature, keywords: &mut BTreeMap<String, Value>) {
    signature
        .parameters()
        .iter()
        .filter(|parameter| parameter.is_flag())
        .for_each(|parameter| {
            keywords
                .entry(parameter.name().to_owned())
                .or_insert(Value::Bool(false));
        });
}

/// Fail with every required parameter that `satisfied` rejects
fn check_required(
    signature: &Signature,
    satisfied: impl Fn(usize, &Parameter) -> bool,
) -> Result<(), Error> {
    let missing: Vec<String> = signature
        .parameters()
        .iter()
        .enumerate()
        .filter(|&(index, parameter)| parameter.is_required() && !satisfied(index, parameter))
        .map(|(_, parameter)| parameter.name().to_owned())
        .collect();

    match missing.is_empty() {
        true => Ok(()),
        false => Err(Error::InsufficientArguments { missing }),
    }
}
