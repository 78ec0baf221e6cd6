/*!
Named conversions from raw command-line strings into [`Value`]s.

Every parameter resolves to a [`Cast`] through a type tag such as `"i32"` or
`"PathBuf"`. The [`Casts`] table holds the standard tags and any special casts
registered by the application.
*/

use std::{borrow::Cow, collections::HashMap, fmt, sync::Arc};

use crate::value::{FromValue, Value};

/// The signature of a conversion function. Errors are reported as messages;
/// the parameter name is attached by the caller.
pub type ConvertFn = dyn Fn(&str) -> Result<Value, String> + Send + Sync;

/**
A single named conversion.

[`Cast::Flag`] is the distinguished boolean cast: it ignores its input and
always yields `true`. Parameters with this cast are presence-only switches
that can't be set to false from the command line.
*/
#[derive(Clone)]
pub enum Cast {
    Flag,
    Convert {
        tag: Cow<'static, str>,
        convert: Arc<ConvertFn>,
    },
}

impl Cast {
    pub fn new<F>(tag: impl Into<Cow<'static, str>>, convert: F) -> Self
    where
        F: Fn(&str) -> Result<Value, String> + Send + Sync + 'static,
    {
        Cast::Convert {
            tag: tag.into(),
            convert: Arc::new(convert),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_flag(&self) -> bool {
        matches!(self, Cast::Flag)
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Cast::Flag => "bool",
            Cast::Convert { tag, .. } => tag,
        }
    }

    /// Apply this conversion to a raw string
    pub fn apply(&self, raw: &str) -> Result<Value, String> {
        match self {
            Cast::Flag => Ok(Value::Bool(true)),
            Cast::Convert { convert, .. } => convert(raw),
        }
    }
}

impl fmt::Debug for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cast::Flag => f.write_str("Flag"),
            Cast::Convert { tag, .. } => f.debug_tuple("Convert").field(tag).finish(),
        }
    }
}

/**
Rust types with a standard cast. Implemented for `bool`, `char`, [`String`],
[`PathBuf`][std::path::PathBuf] and the fixed-size integer and float types.
*/
pub trait Castable: FromValue + Into<Value> + 'static {
    /// The tag this type's cast is registered under
    const TAG: &'static str;

    /// Convert a raw command-line string into a value of this type
    fn convert(raw: &str) -> Result<Value, String>;

    /// The [`Cast`] for this type
    #[inline]
    fn cast() -> Cast {
        Cast::new(Self::TAG, Self::convert)
    }
}

/**
The cast registry: a table from type tag to [`Cast`], plus the tag used for
parameters that have neither a declared type nor a default.
*/
#[derive(Clone)]
pub struct Casts {
    table: HashMap<Cow<'static, str>, Cast>,
    default: Cow<'static, str>,
}

impl Casts {
    /// A table with every standard cast, defaulting to `String`
    #[must_use]
    pub fn standard() -> Self {
        use std::path::PathBuf;

        let mut casts = Self {
            table: HashMap::new(),
            default: Cow::Borrowed(<String as Castable>::TAG),
        };

        casts
            .register::<bool>()
            .register::<char>()
            .register::<String>()
            .register::<PathBuf>()
            .register::<i8>()
            .register::<i16>()
            .register::<i32>()
            .register::<i64>()
            .register::<isize>()
            .register::<u8>()
            .register::<u16>()
            .register::<u32>()
            .register::<u64>()
            .register::<usize>()
            .register::<f32>()
            .register::<f64>();

        casts
    }

    /// Register the standard cast for a Rust type
    pub fn register<T: Castable>(&mut self) -> &mut Self {
        self.table.insert(Cow::Borrowed(T::TAG), T::cast());
        self
    }

    /**
    Register a special cast under `tag`, replacing anything already there.
    Parameters declare it with [`ParameterSpec::cast`][crate::ParameterSpec::cast].
    */
    pub fn special<F, E>(&mut self, tag: impl Into<Cow<'static, str>>, convert: F) -> &mut Self
    where
        F: Fn(&str) -> Result<Value, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        let tag = tag.into();
        let cast = Cast::new(tag.clone(), move |raw| {
            convert(raw).map_err(|err| err.to_string())
        });

        self.table.insert(tag, cast);
        self
    }

    /// Change the tag used for untyped parameters without defaults
    pub fn set_default(&mut self, tag: impl Into<Cow<'static, str>>) -> &mut Self {
        self.default = tag.into();
        self
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Cast> {
        self.table.get(tag)
    }

    #[inline]
    #[must_use]
    pub fn default_tag(&self) -> &str {
        &self.default
    }
}

impl Default for Casts {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Casts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.table.keys().map(|tag| &**tag).collect();
        tags.sort_unstable();

        f.debug_struct("Casts")
            .field("tags", &tags)
            .field("default", &self.default)
            .finish()
    }
}
