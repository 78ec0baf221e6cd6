/*!
Parameter declarations.

A [`ParameterSpec`] is what the application writes down (by hand, or through
`#[signet::command]`): a name, an optional cast tag, an optional default. It
is resolved against a [`Casts`][crate::Casts] table into a [`Parameter`] when
its function is registered.
*/

use std::borrow::Cow;

use heck::{ToKebabCase as _, ToShoutySnakeCase as _};

use crate::{
    cast::{Cast, Castable},
    value::Value,
};

/// The declarative description of one function parameter
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub(crate) name: Cow<'static, str>,
    pub(crate) cast: Option<Cow<'static, str>>,
    pub(crate) default: Option<Value>,
    pub(crate) optional: bool,
}

impl ParameterSpec {
    /**
    A parameter with no declared cast. Unless it gets a default (whose type
    is then used), it gets the registry's default cast, which is normally
    `String`.
    */
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            cast: None,
            default: None,
            optional: false,
        }
    }

    /// Shorthand for a boolean, presence-only switch
    #[must_use]
    pub fn flag(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name).typed::<bool>()
    }

    /// Declare the cast tag, which may name a standard or special cast
    #[must_use]
    pub fn cast(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.cast = Some(tag.into());
        self
    }

    /// Declare the cast through a Rust type
    #[must_use]
    pub fn typed<T: Castable>(self) -> Self {
        self.cast(T::TAG)
    }

    /// Give this parameter a default value, making it not required
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Make this parameter not required, without giving it a default. It's
    /// simply absent from the bound arguments if it isn't given.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/**
A resolved [`ParameterSpec`], with its cast looked up and its switch names
computed. Built once per registered function and immutable afterwards.
*/
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    long: String,
    placeholder: String,
    short: Option<char>,
    cast: Cast,
    default: Option<Value>,
    optional: bool,
}

impl Parameter {
    pub(crate) fn new(
        name: String,
        short: Option<char>,
        cast: Cast,
        default: Option<Value>,
        optional: bool,
    ) -> Self {
        Self {
            long: name.to_kebab_case(),
            placeholder: name.to_shouty_snake_case(),
            name,
            short,
            cast,
            default,
            optional,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The long switch name as shown in usage text, without the `--`
    #[inline]
    #[must_use]
    pub fn long(&self) -> &str {
        &self.long
    }

    /// The name used for this parameter's value in usage text
    #[inline]
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The single-character shortcut, unless another parameter claimed it
    #[inline]
    #[must_use]
    pub fn short(&self) -> Option<char> {
        self.short
    }

    #[inline]
    #[must_use]
    pub fn cast(&self) -> &Cast {
        &self.cast
    }

    #[inline]
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Boolean flags are presence-only and never take a value
    #[inline]
    #[must_use]
    pub fn is_flag(&self) -> bool {
        self.cast.is_flag()
    }

    /// Required parameters have no default, aren't optional, and aren't
    /// flags; flags are always implicitly false.
    #[inline]
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.optional && !self.is_flag()
    }

    /// Check if `option` (from `--option`) names this parameter. Both the
    /// exact name and its kebab-case spelling are accepted.
    #[inline]
    #[must_use]
    pub fn matches_long(&self, option: &str) -> bool {
        option == self.name || option == self.long
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let parameter = Parameter::new(
            "dry_run".to_owned(),
            Some('d'),
            Cast::Flag,
            None,
            false,
        );

        assert_eq!(parameter.long(), "dry-run");
        assert_eq!(parameter.placeholder(), "DRY_RUN");
        assert!(parameter.matches_long("dry-run"));
        assert!(parameter.matches_long("dry_run"));
        assert!(!parameter.matches_long("dry"));
    }

    #[test]
    fn flags_are_never_required() {
        let flag = Parameter::new("debug".to_owned(), None, Cast::Flag, None, false);
        assert!(flag.is_flag());
        assert!(!flag.is_required());
    }

    #[test]
    fn spec_builder() {
        let spec = ParameterSpec::new("times").typed::<u32>().default(3u32);

        assert_eq!(spec.name(), "times");
        assert_eq!(spec.cast.as_deref(), Some("u32"));
        assert_eq!(spec.default, Some(Value::UInt(3)));
    }
}
