//! Runtime values handed to and produced by the traverser.

use std::any::type_name;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::{Structured, TypeRef};
use crate::{CONSTRUCTOR_KEY, ConfigModel, ConfigValue, FactoryError, Missing};

/// A concrete value: a structured record, a plain mapping or a leaf.
#[derive(Clone, Debug, PartialEq)]
pub enum Instance {
    /// Structured value with named fields.
    Record(Record),
    /// String-keyed mapping without declared fields.
    Mapping(IndexMap<String, Instance>),
    /// Opaque leaf.
    Value(ConfigValue),
}

impl Instance {
    /// Whether the instance is the missing marker.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Value(ConfigValue::Missing))
    }

    /// Borrow the leaf value, if any.
    #[must_use]
    pub const fn as_value(&self) -> Option<&ConfigValue> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the record, if any.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Configuration tree equivalent to this instance. Records gain a
    /// constructor key.
    #[must_use]
    pub fn to_config_value(&self) -> ConfigValue {
        match self {
            Self::Record(record) => {
                let mut model = ConfigModel::new();
                model.insert(CONSTRUCTOR_KEY, record.type_name());
                for (name, value) in record.fields() {
                    model.insert(name, value.to_config_value());
                }
                ConfigValue::Map(model)
            }
            Self::Mapping(entries) => ConfigValue::Map(
                entries
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.to_config_value()))
                    .collect(),
            ),
            Self::Value(value) => value.clone(),
        }
    }

    /// Deserialize the instance into `T`.
    ///
    /// # Errors
    ///
    /// [`FactoryError::Missing`] when a leaf is missing, otherwise
    /// [`FactoryError::Rejected`] when the shape does not fit `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(&self, field: &str) -> Result<T, FactoryError> {
        let json = self
            .to_config_value()
            .to_json()
            .map_err(|_| FactoryError::Missing {
                field: field.to_owned(),
            })?;
        serde_json::from_value(json).map_err(|err| FactoryError::rejected(field, err))
    }
}

impl From<Record> for Instance {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<ConfigValue> for Instance {
    fn from(value: ConfigValue) -> Self {
        Self::Value(value)
    }
}

/// Field values of a structured instance, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    type_name: Cow<'static, str>,
    fields: IndexMap<String, Instance>,
}

impl Record {
    /// Empty record named after `T`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self::named(type_name::<T>())
    }

    /// Empty record with an explicit type name.
    #[must_use]
    pub fn named(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Record holding every default `T` can compute on its own.
    ///
    /// Fields without a default hold the missing marker. Use
    /// [`Record::with`] to fill in the rest, which keeps declaration order.
    ///
    /// # Errors
    ///
    /// [`FactoryError::Rejected`] when `T`'s descriptor cannot be traversed.
    pub fn defaults<T: Structured>() -> Result<Self, FactoryError> {
        crate::traverse_type(&TypeRef::of::<T>(), None)
            .map(|(_, record)| record)
            .map_err(|err| FactoryError::rejected(type_name::<T>(), err))
    }

    /// Set `name`, replacing an existing value in place.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl ToInstance) -> Self {
        self.set(name, value.to_instance());
        self
    }

    /// Set `name`, replacing an existing value in place.
    pub fn set(&mut self, name: &str, value: Instance) {
        self.fields.insert(name.to_owned(), value);
    }

    /// Borrow the value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.fields.get(name)
    }

    /// Whether `name` is set.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Fully-qualified type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Instance)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Converts Rust values into [`Instance`]s.
pub trait ToInstance {
    /// Produce an instance describing `self`.
    fn to_instance(&self) -> Instance;
}

impl<T: ToInstance + ?Sized> ToInstance for &T {
    fn to_instance(&self) -> Instance {
        (**self).to_instance()
    }
}

impl<T: ToInstance + ?Sized> ToInstance for Box<T> {
    fn to_instance(&self) -> Instance {
        (**self).to_instance()
    }
}

impl ToInstance for Instance {
    fn to_instance(&self) -> Instance {
        self.clone()
    }
}

impl ToInstance for Record {
    fn to_instance(&self) -> Instance {
        Instance::Record(self.clone())
    }
}

impl ToInstance for ConfigValue {
    fn to_instance(&self) -> Instance {
        Instance::Value(self.clone())
    }
}

impl ToInstance for ConfigModel {
    fn to_instance(&self) -> Instance {
        Instance::Value(ConfigValue::Map(self.clone()))
    }
}

impl ToInstance for Missing {
    fn to_instance(&self) -> Instance {
        Instance::Value(ConfigValue::Missing)
    }
}

macro_rules! leaf_instance {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToInstance for $ty {
                fn to_instance(&self) -> Instance {
                    Instance::Value(ConfigValue::from(*self))
                }
            }
        )*
    };
}

leaf_instance!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64);

impl ToInstance for u64 {
    fn to_instance(&self) -> Instance {
        Instance::Value(ConfigValue::from(*self))
    }
}

macro_rules! wide_instance {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToInstance for $ty {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "values beyond 64 bits are kept as approximate floats"
                )]
                fn to_instance(&self) -> Instance {
                    let value = i64::try_from(*self)
                        .map(ConfigValue::Integer)
                        .or_else(|_| u64::try_from(*self).map(ConfigValue::Unsigned))
                        .unwrap_or(ConfigValue::Float(*self as f64));
                    Instance::Value(value)
                }
            }
        )*
    };
}

wide_instance!(usize, isize, i128, u128);

impl ToInstance for str {
    fn to_instance(&self) -> Instance {
        Instance::Value(ConfigValue::from(self))
    }
}

impl ToInstance for String {
    fn to_instance(&self) -> Instance {
        Instance::Value(ConfigValue::from(self.as_str()))
    }
}

impl ToInstance for Path {
    fn to_instance(&self) -> Instance {
        Instance::Value(ConfigValue::String(self.to_string_lossy().into_owned()))
    }
}

impl ToInstance for PathBuf {
    fn to_instance(&self) -> Instance {
        self.as_path().to_instance()
    }
}

impl ToInstance for camino::Utf8PathBuf {
    fn to_instance(&self) -> Instance {
        Instance::Value(ConfigValue::from(self.as_str()))
    }
}

impl<T: ToInstance> ToInstance for Option<T> {
    fn to_instance(&self) -> Instance {
        self.as_ref()
            .map_or(Instance::Value(ConfigValue::Null), ToInstance::to_instance)
    }
}

impl<T: ToInstance> ToInstance for Vec<T> {
    fn to_instance(&self) -> Instance {
        self.as_slice().to_instance()
    }
}

impl<T: ToInstance> ToInstance for [T] {
    fn to_instance(&self) -> Instance {
        Instance::Value(ConfigValue::List(
            self.iter()
                .map(|item| item.to_instance().to_config_value())
                .collect(),
        ))
    }
}

fn mapping<'a, T: ToInstance + 'a>(entries: impl Iterator<Item = (&'a String, &'a T)>) -> Instance {
    Instance::Mapping(
        entries
            .map(|(key, value)| (key.clone(), value.to_instance()))
            .collect(),
    )
}

impl<T: ToInstance> ToInstance for BTreeMap<String, T> {
    fn to_instance(&self) -> Instance {
        mapping(self.iter())
    }
}

impl<T: ToInstance, S: BuildHasher> ToInstance for HashMap<String, T, S> {
    fn to_instance(&self) -> Instance {
        mapping(self.iter())
    }
}

impl<T: ToInstance, S: BuildHasher> ToInstance for IndexMap<String, T, S> {
    fn to_instance(&self) -> Instance {
        mapping(self.iter())
    }
}
