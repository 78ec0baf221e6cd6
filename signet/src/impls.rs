use std::path::PathBuf;

use crate::{
    cast::{Cast, Castable},
    value::{FromValue, Value},
};

/// Signed and unsigned integers are widened into a single variant, and
/// narrowed back with a range check.
macro_rules! integers {
    ($($variant:ident($wide:ident): $($type:ident)*;)*) => {
        $($(
            impl From<$type> for Value {
                #[inline]
                fn from(value: $type) -> Self {
                    // Pointer-sized integers are at most 64 bits
                    Value::$variant(value as $wide)
                }
            }

            impl FromValue for $type {
                #[inline]
                fn from_value(value: &Value) -> Option<Self> {
                    match *value {
                        Value::$variant(value) => value.try_into().ok(),
                        _ => None,
                    }
                }
            }

            impl Castable for $type {
                const TAG: &'static str = stringify!($type);

                fn convert(raw: &str) -> Result<Value, String> {
                    raw.parse::<$type>()
                        .map(Value::from)
                        .map_err(|err| err.to_string())
                }
            }
        )*)*
    };
}

integers! {
    Int(i64): i8 i16 i32 i64 isize;
    UInt(u64): u8 u16 u32 u64 usize;
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}

impl FromValue for f64 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Float(value) => Some(value),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            // Values in this variant that came from an f32 cast round-trip
            // exactly
            Value::Float(value) => Some(value as f32),
            _ => None,
        }
    }
}

impl Castable for f64 {
    const TAG: &'static str = "f64";

    fn convert(raw: &str) -> Result<Value, String> {
        raw.parse::<f64>()
            .map(Value::from)
            .map_err(|err| err.to_string())
    }
}

impl Castable for f32 {
    const TAG: &'static str = "f32";

    fn convert(raw: &str) -> Result<Value, String> {
        raw.parse::<f32>()
            .map(Value::from)
            .map_err(|err| err.to_string())
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl FromValue for bool {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

/// `bool` is special: its cast is the presence-only [`Cast::Flag`]
impl Castable for bool {
    const TAG: &'static str = "bool";

    fn convert(raw: &str) -> Result<Value, String> {
        raw.parse::<bool>()
            .map(Value::Bool)
            .map_err(|err| err.to_string())
    }

    #[inline]
    fn cast() -> Cast {
        Cast::Flag
    }
}

impl From<char> for Value {
    #[inline]
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl FromValue for char {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Char(value) => Some(value),
            _ => None,
        }
    }
}

impl Castable for char {
    const TAG: &'static str = "char";

    fn convert(raw: &str) -> Result<Value, String> {
        raw.parse::<char>()
            .map(Value::Char)
            .map_err(|err| err.to_string())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl FromValue for String {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl Castable for String {
    const TAG: &'static str = "String";

    fn convert(raw: &str) -> Result<Value, String> {
        Ok(Value::Str(raw.to_owned()))
    }
}

impl From<PathBuf> for Value {
    #[inline]
    fn from(value: PathBuf) -> Self {
        Value::Path(value)
    }
}

impl FromValue for PathBuf {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Path(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl Castable for PathBuf {
    const TAG: &'static str = "PathBuf";

    fn convert(raw: &str) -> Result<Value, String> {
        Ok(Value::Path(PathBuf::from(raw)))
    }
}
