use std::{
    any::{Any, type_name},
    collections::BTreeMap,
    ffi::OsString,
};

use crate::{
    errors::{ConfigurationError, Error},
    signature::Signature,
    strategy::ParseResult,
    value::{FromValue, Value},
};

/**
The values of a single call, keyed by parameter name. Built by binding a
[`ParseResult`] against the [`Signature`] it was parsed with: every
parameter ends up with its supplied value, its default, `false` if it's a
flag, or nothing at all if it's optional.
*/
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: BTreeMap<String, Value>,
}

impl Arguments {
    #[must_use]
    pub fn bind(signature: &Signature, result: &ParseResult) -> Self {
        let mut values: BTreeMap<String, Value> = signature
            .parameters()
            .iter()
            .zip(&result.positional)
            .map(|(parameter, value)| (parameter.name().to_owned(), value.clone()))
            .collect();

        values.extend(
            result
                .keywords
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        for parameter in signature.parameters() {
            if values.contains_key(parameter.name()) {
                continue;
            }

            let fallback = match (parameter.default(), parameter.is_flag()) {
                (Some(default), _) => default.clone(),
                (None, true) => Value::Bool(false),
                (None, false) => continue,
            };

            values.insert(parameter.name().to_owned(), fallback);
        }

        Self { values }
    }

    /// The raw value bound to `name`, if any
    #[inline]
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get the typed value of a parameter that always has one: a required
    /// parameter, a flag, or a parameter with a default.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, Error> {
        self.get_opt(name)?
            .ok_or_else(|| ConfigurationError::MissingValue(name.to_owned()).into())
    }

    /// Get the typed value of an optional parameter
    pub fn get_opt<T: FromValue>(&self, name: &str) -> Result<Option<T>, Error> {
        self.values
            .get(name)
            .map(|value| T::from_value(value).ok_or_else(|| wrong_type::<T>(name)))
            .transpose()
    }

    /// Get a value produced by a special cast
    pub fn get_custom<T: Any + Clone>(&self, name: &str) -> Result<T, Error> {
        self.get_custom_opt(name)?
            .ok_or_else(|| ConfigurationError::MissingValue(name.to_owned()).into())
    }

    pub fn get_custom_opt<T: Any + Clone>(&self, name: &str) -> Result<Option<T>, Error> {
        self.values
            .get(name)
            .map(|value| {
                value
                    .downcast_ref::<T>()
                    .cloned()
                    .ok_or_else(|| wrong_type::<T>(name))
            })
            .transpose()
    }

    /// Every bound value, in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn wrong_type<T>(name: &str) -> Error {
    ConfigurationError::WrongValueType {
        parameter: name.to_owned(),
        expected: type_name::<T>(),
    }
    .into()
}

/// Helper type for loading arguments from the environment. Usually
/// [`run`][crate::run] is all you need; this is for callers that want to
/// drive [`Registry::setup`][crate::Registry::setup] themselves.
///
/// Arguments that aren't valid unicode are converted lossily.
#[derive(Debug, Clone)]
pub struct LoadedArguments {
    arguments: Vec<String>,
}

impl LoadedArguments {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::args_os())
    }

    #[must_use]
    pub fn new(arguments: impl IntoIterator<Item = OsString>) -> Self {
        Self {
            arguments: arguments
                .into_iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// The complete argv, including the program path
    #[inline]
    #[must_use]
    pub fn argv(&self) -> &[String] {
        &self.arguments
    }

    #[must_use]
    pub fn argv0(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    /// Everything after the program path
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        self.arguments.get(1..).unwrap_or(&[])
    }
}
