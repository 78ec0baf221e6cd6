use std::{borrow::Cow, fmt::Display};

use tracing::debug;

use crate::{
    binding::{Command, FunctionBinding},
    cast::Casts,
    errors::Error,
    help,
    strategy::Style,
};

/// The tokens that ask for help, wherever help is recognized
pub const HELP_TRIGGERS: [&str; 5] = ["-h", "--help", "/?", "?", "-?"];

/// Registry-wide settings. Everything here has a sensible default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The parsing style for functions that don't choose their own
    pub style: Style,

    /// Tokens that request help; matched exactly
    pub help_triggers: Vec<Cow<'static, str>>,

    /// The column that help text is wrapped to
    pub width: usize,

    /// Overrides the program name otherwise taken from `argv[0]`
    pub program: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: Style::default(),
            help_triggers: HELP_TRIGGERS.into_iter().map(Cow::Borrowed).collect(),
            width: 80,
            program: None,
        }
    }
}

/**
The set of functions available from the command line, in registration
order.

A registry is built up front, with [`register`][Registry::register], and is
then only ever read: [`setup`][Registry::setup] takes `&self`. Every
function in a registry returns the same type `R`.
*/
#[derive(Debug)]
pub struct Registry<R> {
    bindings: Vec<FunctionBinding<R>>,
    casts: Casts,
    settings: Settings,
}

impl<R> Default for Registry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Registry<R> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    #[must_use]
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            bindings: Vec::new(),
            casts: Casts::standard(),
            settings,
        }
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    #[inline]
    #[must_use]
    pub fn casts(&self) -> &Casts {
        &self.casts
    }

    /// The cast table that functions are resolved against when they're
    /// registered. Changes don't affect functions that are already
    /// registered.
    pub fn casts_mut(&mut self) -> &mut Casts {
        &mut self.casts
    }

    /// Add a special cast, available to every function registered after it
    pub fn special_cast<F, E>(&mut self, tag: impl Into<Cow<'static, str>>, convert: F) -> &mut Self
    where
        F: Fn(&str) -> Result<crate::Value, E> + Send + Sync + 'static,
        E: Display,
    {
        self.casts.special(tag, convert);
        self
    }

    /**
    Resolve a command's parameters and add it to the registry. A command
    with the same name as an existing one replaces it, keeping its position.
    */
    pub fn register(&mut self, command: Command<R>) -> Result<&mut Self, Error> {
        let binding = FunctionBinding::bind(command, &self.casts, self.settings.style)?;

        match self
            .bindings
            .iter_mut()
            .find(|existing| existing.name() == binding.name())
        {
            Some(existing) => {
                debug!(function = binding.name(), "replacing registered function");
                *existing = binding;
            }
            None => self.bindings.push(binding),
        }

        Ok(self)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FunctionBinding<R>> {
        self.bindings.iter().find(|binding| binding.name() == name)
    }

    /// Every registered function, in registration order
    #[inline]
    #[must_use]
    pub fn bindings(&self) -> &[FunctionBinding<R>] {
        &self.bindings
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[must_use]
    pub fn is_help_trigger(&self, token: &str) -> bool {
        self.settings
            .help_triggers
            .iter()
            .any(|trigger| trigger == token)
    }

    /// The name to show in usage text: the override from the settings, or
    /// else the final path segment of `argv0`.
    #[must_use]
    pub fn program_name<'a>(&'a self, argv0: Option<&'a str>) -> &'a str {
        if let Some(ref program) = self.settings.program {
            return program;
        }

        argv0
            .and_then(|path| path.rsplit(['/', '\\']).find(|segment| !segment.is_empty()))
            .unwrap_or("")
    }

    /// The top-level help, listing every registered function
    #[must_use]
    pub fn overview(&self, program: &str) -> String {
        let mut out = String::new();

        // Writing to a `String` can't fail
        let _ = help::write_overview(
            &mut out,
            program,
            self.bindings
                .iter()
                .map(|binding| (binding.name(), binding.docs().headline())),
            self.settings.width,
        );

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParameterSpec, errors::ConfigurationError};

    fn registry() -> Registry<&'static str> {
        let mut registry = Registry::new();

        registry
            .register(Command::new("foo", |_| Ok("foo")).doc("Do foo things.\nAt length."))
            .unwrap()
            .register(Command::new("bar", |_| Ok("bar")))
            .unwrap();

        registry
    }

    #[test]
    fn registration_order() {
        let registry = registry();
        let names: Vec<&str> = registry.bindings().iter().map(|b| b.name()).collect();

        assert_eq!(names, ["foo", "bar"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn reregistering_replaces() {
        let mut registry = registry();
        registry
            .register(Command::new("foo", |_| Ok("new foo")).param(ParameterSpec::new("x")))
            .unwrap();

        let names: Vec<&str> = registry.bindings().iter().map(|b| b.name()).collect();
        assert_eq!(names, ["foo", "bar"]);
        assert_eq!(registry.get("foo").unwrap().signature().len(), 1);
    }

    #[test]
    fn failed_registration_leaves_registry_alone() {
        let mut registry = registry();
        let error = registry
            .register(Command::new("baz", |_| Ok("")).param(ParameterSpec::new("x").cast("nope")))
            .unwrap_err();

        assert_eq!(
            error,
            ConfigurationError::UnknownCast {
                parameter: "x".to_owned(),
                cast: "nope".to_owned()
            }
            .into()
        );
        assert!(registry.get("baz").is_none());
    }

    #[test]
    fn special_casts_reach_later_registrations() {
        let mut registry: Registry<()> = Registry::new();
        registry.special_cast("even", |raw: &str| match raw.parse::<u64>() {
            Ok(n) if n % 2 == 0 => Ok(crate::Value::UInt(n)),
            _ => Err("not an even number"),
        });

        registry
            .register(Command::new("f", |_| Ok(())).param(ParameterSpec::new("n").cast("even")))
            .unwrap();

        let binding = registry.get("f").unwrap();
        assert_eq!(binding.signature().cast("n", "4").unwrap(), crate::Value::UInt(4));
        assert!(binding.signature().cast("n", "3").is_err());
    }

    #[test]
    fn program_names() {
        let registry = registry();

        assert_eq!(registry.program_name(Some("/usr/bin/prog")), "prog");
        assert_eq!(registry.program_name(Some("C:\\tools\\prog.exe")), "prog.exe");
        assert_eq!(registry.program_name(Some("prog")), "prog");
        assert_eq!(registry.program_name(None), "");

        let renamed: Registry<()> = Registry::with_settings(Settings {
            program: Some("tool".to_owned()),
            ..Settings::default()
        });
        assert_eq!(renamed.program_name(Some("/bin/x")), "tool");
    }

    #[test]
    fn help_triggers() {
        let registry = registry();

        for trigger in HELP_TRIGGERS {
            assert!(registry.is_help_trigger(trigger));
        }
        assert!(!registry.is_help_trigger("help"));
    }

    #[test]
    fn overview_lists_headlines() {
        let overview = registry().overview("prog");

        assert!(overview.contains("foo  Do foo things.\n"));
        assert!(overview.contains("  bar\n"));
        assert!(!overview.contains("At length"));
    }
}
