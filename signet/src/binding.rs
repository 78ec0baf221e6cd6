use std::{borrow::Cow, fmt, sync::OnceLock};

use tracing::debug;

use crate::{
    arguments::Arguments,
    cast::Casts,
    docstring::Docs,
    errors::Error,
    help,
    parameter::ParameterSpec,
    signature::Signature,
    strategy::{ParseResult, Style},
};

type Invoker<R> = dyn Fn(&Arguments) -> Result<R, Error> + Send + Sync;

/**
A function waiting to be registered: its name, its parameter table, its
docstring, and the closure that calls it with bound [`Arguments`].

This is usually generated by `#[signet::command]`, but it's just as easy to
build by hand:

```
use signet::{Command, ParameterSpec, Registry};

let mut registry = Registry::new();
registry
    .register(
        Command::new("add", |args| Ok(args.get::<i64>("a")? + args.get::<i64>("b")?))
            .param(ParameterSpec::new("a").typed::<i64>())
            .param(ParameterSpec::new("b").typed::<i64>())
            .doc("Add two numbers."),
    )
    .unwrap();

assert!(registry.get("add").is_some());
```
*/
pub struct Command<R> {
    name: Cow<'static, str>,
    specs: Vec<ParameterSpec>,
    doc: Option<Cow<'static, str>>,
    style: Option<Style>,
    invoker: Box<Invoker<R>>,
}

impl<R> Command<R> {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, invoker: F) -> Self
    where
        F: Fn(&Arguments) -> Result<R, Error> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            specs: Vec::new(),
            doc: None,
            style: None,
            invoker: Box::new(invoker),
        }
    }

    #[must_use]
    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.specs.push(spec);
        self
    }

    #[must_use]
    pub fn params(mut self, specs: impl IntoIterator<Item = ParameterSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Set the docstring, used for the summary and each parameter's help
    #[must_use]
    pub fn doc(mut self, doc: impl Into<Cow<'static, str>>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Override the registry's default parsing style for this function
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<R> fmt::Debug for Command<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("specs", &self.specs)
            .field("doc", &self.doc)
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

/// A registered function: its resolved [`Signature`], its parsing
/// [`Style`], its documentation, and its invoker.
pub struct FunctionBinding<R> {
    name: Cow<'static, str>,
    signature: Signature,
    style: Style,
    doc: Option<Cow<'static, str>>,
    docs: OnceLock<Docs>,
    invoker: Box<Invoker<R>>,
}

impl<R> FunctionBinding<R> {
    pub(crate) fn bind(command: Command<R>, casts: &Casts, default_style: Style) -> Result<Self, Error> {
        let Command {
            name,
            specs,
            doc,
            style,
            invoker,
        } = command;

        let signature = Signature::extract(specs, casts)?;
        let style = style.unwrap_or(default_style);

        debug!(
            function = %name,
            ?style,
            parameters = signature.len(),
            "registered function"
        );

        Ok(Self {
            name,
            signature,
            style,
            doc,
            docs: OnceLock::new(),
            invoker,
        })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }

    /// The raw docstring
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// The annotated docstring, computed the first time it's needed
    pub fn docs(&self) -> &Docs {
        self.docs.get_or_init(|| {
            Docs::annotate(
                self.doc.as_deref(),
                self.signature
                    .parameters()
                    .iter()
                    .map(|parameter| parameter.name()),
            )
        })
    }

    /// The one-line synopsis of this function's parameters
    pub fn synopsis(&self) -> impl fmt::Display {
        help::synopsis(self.style, &self.signature)
    }

    /// Render the complete usage text, as invoked by `program`, wrapped to
    /// 80 columns.
    #[must_use]
    pub fn render_usage(&self, program: &str) -> String {
        self.usage(program, None, 80)
    }

    /// Render the complete usage text. `command` is the function name as
    /// it's typed on the command line, if the registry has several.
    #[must_use]
    pub fn usage(&self, program: &str, command: Option<&str>, width: usize) -> String {
        let mut out = String::new();

        // Writing to a `String` can't fail
        let _ = help::write_usage(
            &mut out,
            program,
            command,
            self.style,
            &self.signature,
            self.docs(),
            width,
        );

        out
    }

    /// Parse this function's raw arguments with its strategy
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseResult, Error> {
        self.style.parse(&self.signature, tokens)
    }

    #[must_use]
    pub fn arguments(&self, result: &ParseResult) -> Arguments {
        Arguments::bind(&self.signature, result)
    }

    pub fn invoke(&self, arguments: &Arguments) -> Result<R, Error> {
        (self.invoker)(arguments)
    }
}

impl<R> fmt::Debug for FunctionBinding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionBinding")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("style", &self.style)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Value, errors::ConfigurationError};

    fn greet() -> FunctionBinding<String> {
        let command = Command::new("greet", |args| {
            let name: String = args.get("name")?;
            let times: u32 = args.get("times")?;
            Ok(format!("hello {name}").repeat(times as usize))
        })
        .param(ParameterSpec::new("name"))
        .param(ParameterSpec::new("times").typed::<u32>().default(1u32))
        .doc("Say hello.\n\nname: who to greet");

        FunctionBinding::bind(command, &Casts::standard(), Style::Positional).unwrap()
    }

    #[test]
    fn parse_and_invoke() {
        let binding = greet();
        let result = binding.parse(&["bob", "2"]).unwrap();
        let arguments = binding.arguments(&result);

        assert_eq!(binding.invoke(&arguments).unwrap(), "hello bobhello bob");
    }

    #[test]
    fn usage_contains_synopsis() {
        let binding = greet();
        let synopsis = binding.synopsis().to_string();

        assert_eq!(synopsis, "<NAME> [TIMES]");
        assert!(binding.render_usage("prog").contains(&synopsis));
        assert_eq!(binding.docs().summary(), "Say hello.");
        assert_eq!(binding.docs().help("name"), Some("who to greet"));
    }

    #[test]
    fn style_override() {
        let command = Command::new("f", |_| Ok(()))
            .param(ParameterSpec::flag("debug"))
            .style(Style::Keyword);
        let binding = FunctionBinding::bind(command, &Casts::standard(), Style::Mixed).unwrap();

        assert_eq!(binding.style(), Style::Keyword);
        assert_eq!(
            binding.parse(&["-d"]).unwrap().keywords["debug"],
            Value::Bool(true)
        );
    }

    #[test]
    fn bad_table() {
        let command = Command::new("f", |_| Ok(()))
            .params([ParameterSpec::new("x"), ParameterSpec::new("x")]);

        assert_eq!(
            FunctionBinding::bind(command, &Casts::standard(), Style::Mixed).unwrap_err(),
            ConfigurationError::DuplicateParameter("x".to_owned()).into()
        );
    }
}
