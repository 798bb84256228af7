//! Values stored in a configuration tree.
//!
//! [`ConfigValue`] covers every node the synthesiser, the file loader and the
//! literal parser can produce, including the [`Missing`] marker and deferred
//! [`Reference`]s.

mod de;
mod json;
mod literal;

use std::fmt;

use crate::{ConfigModel, Missing};

pub use literal::parse_literal;

/// A deferred marker resolved later by the instantiating layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Reference {
    /// Named external object, written `!ext <name>`.
    Extern(String),
    /// Filesystem path, written `!path <path>`.
    Path(String),
}

impl Reference {
    const EXTERN_TAG: &'static str = "!ext ";
    const PATH_TAG: &'static str = "!path ";

    /// Recognise the tagged textual form of a reference.
    ///
    /// ```
    /// use configue_cli::Reference;
    ///
    /// assert_eq!(
    ///     Reference::parse_tagged("!ext app.Handler"),
    ///     Some(Reference::Extern("app.Handler".into()))
    /// );
    /// assert_eq!(Reference::parse_tagged("plain"), None);
    /// ```
    #[must_use]
    pub fn parse_tagged(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Some(name) = trimmed.strip_prefix(Self::EXTERN_TAG) {
            return Some(Self::Extern(name.trim().to_owned()));
        }
        trimmed
            .strip_prefix(Self::PATH_TAG)
            .map(|path| Self::Path(path.trim().to_owned()))
    }

    /// Referenced name or path without its tag.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Extern(target) | Self::Path(target) => target,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extern(name) => write!(f, "{}{name}", Self::EXTERN_TAG),
            Self::Path(path) => write!(f, "{}{path}", Self::PATH_TAG),
        }
    }
}

/// A node of a configuration tree.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// No layer has supplied this value yet.
    Missing,
    /// Explicit null.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Integer(i64),
    /// Unsigned integer beyond the range of [`ConfigValue::Integer`].
    Unsigned(u64),
    /// Floating point scalar.
    Float(f64),
    /// String scalar.
    String(String),
    /// Deferred reference to an external object or path.
    Reference(Reference),
    /// Ordered sequence.
    List(Vec<ConfigValue>),
    /// Ordered mapping.
    Map(ConfigModel),
}

impl ConfigValue {
    /// Whether this value is the missing marker.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Whether this value is an explicit null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the nested mapping, if any.
    #[must_use]
    pub const fn as_map(&self) -> Option<&ConfigModel> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the sequence, if any.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the string scalar, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) | Self::Unsigned(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Reference(_) => "reference",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl PartialEq<Missing> for ConfigValue {
    fn eq(&self, _: &Missing) -> bool {
        self.is_missing()
    }
}

impl From<Missing> for ConfigValue {
    fn from(_: Missing) -> Self {
        Self::Missing
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ConfigValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ConfigValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Unsigned(value), Self::Integer)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for ConfigValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Reference> for ConfigValue {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

impl From<ConfigModel> for ConfigValue {
    fn from(value: ConfigModel) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for ConfigValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
