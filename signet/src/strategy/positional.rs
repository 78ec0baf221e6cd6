use crate::{
    errors::{Error, ParsingError},
    signature::{Signature, cast_parameter},
};

use super::{ParseResult, check_required};

pub fn parse(signature: &Signature, tokens: &[&str]) -> Result<ParseResult, Error> {
    check_required(signature, |index, _| index < tokens.len())?;

    if tokens.len() > signature.len() {
        return Err(ParsingError::TooManyArguments {
            max: signature.len(),
            got: tokens.len(),
        }
        .into());
    }

    let positional = signature
        .parameters()
        .iter()
        .zip(tokens)
        .map(|(parameter, token)| cast_parameter(parameter, token))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParseResult {
        positional,
        ..ParseResult::default()
    })
}
