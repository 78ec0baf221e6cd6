/*!
Signature extraction: turning a list of [`ParameterSpec`]s into a validated,
resolved [`Signature`] with a shortcut table.
*/

use std::collections::{HashMap, hash_map::Entry};

use tracing::warn;

use crate::{
    cast::{Cast, Casts},
    errors::{ConfigurationError, Error, ParsingError},
    parameter::{Parameter, ParameterSpec},
    value::Value,
};

/**
The ordered, resolved parameters of one function.

Each parameter's shortcut is the first character of its name. If two
parameters share an initial, the one declared first keeps the shortcut and
the later one is reachable only through its long switch.
*/
#[derive(Debug, Clone, Default)]
pub struct Signature {
    parameters: Vec<Parameter>,
    shorts: HashMap<char, usize>,
}

impl Signature {
    /// Resolve `specs` against `casts`, in declared order.
    pub fn extract(
        specs: impl IntoIterator<Item = ParameterSpec>,
        casts: &Casts,
    ) -> Result<Self, Error> {
        let mut parameters: Vec<Parameter> = Vec::new();
        let mut shorts = HashMap::new();

        for spec in specs {
            check_name(&spec.name)?;

            if parameters.iter().any(|parameter| parameter.name() == spec.name) {
                return Err(ConfigurationError::DuplicateParameter(spec.name.into_owned()).into());
            }

            let cast = resolve_cast(&spec, casts)?.clone();

            if cast.is_flag()
                && let Some(ref default) = spec.default
                && !matches!(default, Value::Bool(_))
            {
                return Err(ConfigurationError::InvalidDefault(spec.name.into_owned()).into());
            }

            let short = spec.name.chars().next().and_then(|initial| {
                match shorts.entry(initial) {
                    Entry::Vacant(entry) => {
                        entry.insert(parameters.len());
                        Some(initial)
                    }
                    Entry::Occupied(entry) => {
                        warn!(
                            parameter = %spec.name,
                            shadowed_by = parameters[*entry.get()].name(),
                            "short option -{initial} is already taken; \
                            parameter is only available as a long option",
                        );
                        None
                    }
                }
            });

            parameters.push(Parameter::new(
                spec.name.into_owned(),
                short,
                cast,
                spec.default,
                spec.optional,
            ));
        }

        Ok(Self { parameters, shorts })
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|parameter| parameter.name() == name)
    }

    /// Find the parameter for a `--long` switch
    #[must_use]
    pub fn lookup_long(&self, option: &str) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|parameter| parameter.matches_long(option))
    }

    /// Find the parameter for a `-s` switch, through the shortcut table
    #[must_use]
    pub fn lookup_short(&self, option: char) -> Option<&Parameter> {
        self.shorts
            .get(&option)
            .map(|&index| &self.parameters[index])
    }

    /// The parameters that must be supplied, in declared order
    pub fn required(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.is_required())
    }

    /// The parameters that carry a default value, in declared order
    pub fn defaulted(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.default().is_some())
    }

    /**
    Convert a raw token into the declared type of the parameter `name`.

    Boolean flags ignore `raw` and always produce `true`. Conversion failures
    are reported with the parameter name, the raw token, and the underlying
    message.
    */
    pub fn cast(&self, name: &str, raw: &str) -> Result<Value, Error> {
        let parameter = self
            .get(name)
            .ok_or_else(|| ParsingError::UnknownParameter(name.to_owned()))?;

        cast_parameter(parameter, raw)
    }
}

/// Cast `raw` for a parameter that has already been looked up
pub(crate) fn cast_parameter(parameter: &Parameter, raw: &str) -> Result<Value, Error> {
    parameter.cast().apply(raw).map_err(|message| {
        ParsingError::Cast {
            parameter: parameter.name().to_owned(),
            argument: raw.to_owned(),
            message,
        }
        .into()
    })
}

fn check_name(name: &str) -> Result<(), ConfigurationError> {
    let reason = if name.is_empty() {
        "parameter names can't be empty"
    } else if name.starts_with('-') {
        "parameter names can't start with '-'; switches are derived automatically"
    } else if name.contains('=') {
        "parameter names must not include an '=', as it is the argument separator"
    } else if name.contains(char::is_whitespace) {
        "parameter names shouldn't include whitespace"
    } else {
        return Ok(());
    };

    Err(ConfigurationError::InvalidName {
        name: name.to_owned(),
        reason,
    })
}

/// Declared cast, else the default value's type, else the table default
fn resolve_cast<'c>(spec: &ParameterSpec, casts: &'c Casts) -> Result<&'c Cast, Error> {
    let tag = match (&spec.cast, &spec.default) {
        (Some(tag), _) => &**tag,
        (None, Some(default)) => default
            .type_tag()
            .ok_or_else(|| ConfigurationError::UninferableDefault(spec.name.to_string()))?,
        (None, None) => casts.default_tag(),
    };

    casts.get(tag).ok_or_else(|| {
        ConfigurationError::UnknownCast {
            parameter: spec.name.to_string(),
            cast: tag.to_owned(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(specs: impl IntoIterator<Item = ParameterSpec>) -> Result<Signature, Error> {
        Signature::extract(specs, &Casts::standard())
    }

    #[test]
    fn required_split() {
        let signature = extract([
            ParameterSpec::new("name"),
            ParameterSpec::new("times").default(1i64),
            ParameterSpec::flag("loud"),
            ParameterSpec::new("greeting").optional(),
        ])
        .unwrap();

        let required: Vec<&str> = signature.required().map(Parameter::name).collect();
        assert_eq!(required, ["name"]);

        let defaulted: Vec<&str> = signature.defaulted().map(Parameter::name).collect();
        assert_eq!(defaulted, ["times"]);
    }

    #[test]
    fn casts_are_resolved() {
        let signature = extract([
            ParameterSpec::new("name"),
            ParameterSpec::new("times").default(1i64),
            ParameterSpec::new("ratio").typed::<f32>(),
            ParameterSpec::new("verbose").default(false),
        ])
        .unwrap();

        let tags: Vec<&str> = signature
            .parameters()
            .iter()
            .map(|parameter| parameter.cast().tag())
            .collect();

        assert_eq!(tags, ["String", "i64", "f32", "bool"]);
        assert!(signature.get("verbose").unwrap().is_flag());
    }

    #[test]
    fn default_cast_is_configurable() {
        let mut casts = Casts::standard();
        casts.set_default("i64");

        let signature = Signature::extract([ParameterSpec::new("count")], &casts).unwrap();
        assert_eq!(signature.cast("count", "12"), Ok(Value::Int(12)));
    }

    #[test]
    fn cast_integer() {
        let signature = extract([ParameterSpec::new("count").typed::<i32>()]).unwrap();

        assert_eq!(signature.cast("count", "5"), Ok(Value::Int(5)));

        match signature.cast("count", "abc") {
            Err(Error::Parsing(ParsingError::Cast {
                parameter,
                argument,
                message,
            })) => {
                assert_eq!(parameter, "count");
                assert_eq!(argument, "abc");
                assert_eq!(message, "invalid digit found in string");
            }
            other => panic!("expected a cast error, got {other:?}"),
        }
    }

    #[test]
    fn cast_flag_ignores_input() {
        let signature = extract([ParameterSpec::flag("debug")]).unwrap();
        assert_eq!(signature.cast("debug", "no"), Ok(Value::Bool(true)));
    }

    #[test]
    fn cast_unknown_parameter() {
        let signature = extract([ParameterSpec::flag("debug")]).unwrap();
        assert_eq!(
            signature.cast("nope", "x"),
            Err(ParsingError::UnknownParameter("nope".to_owned()).into())
        );
    }

    #[test]
    fn short_collisions_keep_the_first() {
        let signature = extract([
            ParameterSpec::new("name"),
            ParameterSpec::new("number").typed::<i64>(),
            ParameterSpec::flag("debug"),
        ])
        .unwrap();

        assert_eq!(signature.lookup_short('n').unwrap().name(), "name");
        assert_eq!(signature.get("name").unwrap().short(), Some('n'));
        assert_eq!(signature.get("number").unwrap().short(), None);
        assert_eq!(signature.lookup_long("number").unwrap().name(), "number");
        assert_eq!(signature.lookup_short('d').unwrap().name(), "debug");
    }

    #[test]
    fn duplicate_names() {
        assert_eq!(
            extract([ParameterSpec::new("a"), ParameterSpec::new("a")]).unwrap_err(),
            ConfigurationError::DuplicateParameter("a".to_owned()).into()
        );
    }

    #[test]
    fn bad_names() {
        for name in ["", "-x", "a=b", "two words"] {
            assert!(
                matches!(
                    extract([ParameterSpec::new(name)]),
                    Err(Error::Configuration(ConfigurationError::InvalidName { .. }))
                ),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_cast() {
        assert_eq!(
            extract([ParameterSpec::new("level").cast("Level")]).unwrap_err(),
            ConfigurationError::UnknownCast {
                parameter: "level".to_owned(),
                cast: "Level".to_owned(),
            }
            .into()
        );
    }

    #[test]
    fn custom_default_needs_a_cast() {
        assert_eq!(
            extract([ParameterSpec::new("level").default(Value::custom(3u8))]).unwrap_err(),
            ConfigurationError::UninferableDefault("level".to_owned()).into()
        );
    }

    #[test]
    fn flag_with_non_boolean_default() {
        assert_eq!(
            extract([ParameterSpec::flag("debug").default(1i64)]).unwrap_err(),
            ConfigurationError::InvalidDefault("debug".to_owned()).into()
        );
    }
}
