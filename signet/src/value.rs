/*!
Dynamically typed argument values. Every cast produces a [`Value`], and
invokers pull typed data back out of them with [`FromValue`].
*/

use std::{any::Any, fmt, path::PathBuf, sync::Arc};

/**
A single parsed argument value.

The standard casts produce one of the concrete variants; user-registered
special casts usually produce [`Value::Custom`], which holds any
`Send + Sync` type. Custom values compare equal only if they are the same
allocation.
*/
#[derive(Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    Path(PathBuf),
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wrap an arbitrary value produced by a special cast
    #[inline]
    #[must_use]
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Self::Custom(Arc::new(value))
    }

    /**
    The cast tag that a parameter would get if this value were its default
    and it had no declared type. Custom values don't have one.
    */
    #[must_use]
    pub fn type_tag(&self) -> Option<&'static str> {
        match self {
            Value::Bool(_) => Some("bool"),
            Value::Int(_) => Some("i64"),
            Value::UInt(_) => Some("u64"),
            Value::Float(_) => Some("f64"),
            Value::Char(_) => Some("char"),
            Value::Str(_) => Some("String"),
            Value::Path(_) => Some("PathBuf"),
            Value::Custom(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the contents of a [`Value::Custom`] as a `T`
    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom(value) => value.downcast_ref(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Path(a), Value::Path(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Value::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Value::UInt(value) => f.debug_tuple("UInt").field(value).finish(),
            Value::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Value::Char(value) => f.debug_tuple("Char").field(value).finish(),
            Value::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Value::Path(value) => f.debug_tuple("Path").field(value).finish(),
            Value::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Used to show defaults in usage text
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::UInt(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Char(value) => write!(f, "{value}"),
            Value::Str(value) => write!(f, "{value}"),
            Value::Path(value) => write!(f, "{}", value.display()),
            Value::Custom(_) => f.write_str("<custom>"),
        }
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

/**
Types that can be pulled back out of a [`Value`]. Returns [`None`] if the
value holds some other type, or if a number doesn't fit in `Self`.
*/
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}
