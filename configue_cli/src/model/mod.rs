//! Ordered configuration mapping and its construction helpers.

mod dotlist;
mod merge;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::schema::{Structured, TypeRef};
use crate::{ConfigValue, ConfigueResult, ConfigueResultExt};

pub use merge::ListMergeMode;

/// Reserved key holding the fully-qualified name of a structured node's type.
pub const CONSTRUCTOR_KEY: &str = "()";

/// Join a dotted path prefix with one more segment.
pub(crate) fn dotted(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Insertion-ordered mapping from keys to [`ConfigValue`]s.
///
/// Structured nodes carry their type name under [`CONSTRUCTOR_KEY`]. Order
/// is preserved through merges and is the order used for rendering and
/// dumping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigModel {
    entries: IndexMap<String, ConfigValue>,
}

impl ConfigModel {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a skeleton for `T`, letting `initial` override computed
    /// defaults.
    ///
    /// # Errors
    ///
    /// Propagates traversal failures such as a reserved field name or
    /// excessive nesting.
    pub fn from_type<T: Structured>(initial: Option<&Self>) -> ConfigueResult<Self> {
        Self::from_type_ref(&TypeRef::of::<T>(), initial)
    }

    /// Build a skeleton from a type handle.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigueError::UnsupportedType`] when `ty` does not
    /// describe its fields, or any other traversal failure.
    pub fn from_type_ref(ty: &TypeRef, initial: Option<&Self>) -> ConfigueResult<Self> {
        let (skeleton, _shadow) = crate::traverse_type(ty, initial)?;
        Ok(skeleton)
    }

    /// Deserialize the finished tree into `T`.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::ConfigueError::MissingMandatoryValue`] when a
    /// leaf is still missing, or [`crate::ConfigueError::Instantiate`] when
    /// the tree does not match `T`.
    pub fn instantiate<T: DeserializeOwned>(&self) -> ConfigueResult<T> {
        serde_json::from_value(self.to_json()?).into_configue()
    }

    /// Number of keys at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `key` is present at this level.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Borrow the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// Mutably borrow the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigValue> {
        self.entries.get_mut(key)
    }

    /// Follow a dotted path through nested mappings.
    ///
    /// ```
    /// use configue_cli::{ConfigModel, ConfigValue};
    ///
    /// let config = ConfigModel::from_dotlist(["server.port=8080"])?;
    /// assert_eq!(config.get_path("server.port"), Some(&ConfigValue::Integer(8080)));
    /// assert_eq!(config.get_path("server.host"), None);
    /// # Ok::<_, std::sync::Arc<configue_cli::ConfigueError>>(())
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&ConfigValue> {
        let mut segments = path.split('.');
        let first = self.get(segments.next()?)?;
        segments.try_fold(first, |node, segment| node.as_map()?.get(segment))
    }

    /// Insert or overwrite `key`, keeping its position when it already
    /// exists.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Delete `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.entries.shift_remove(key)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Whether any leaf in the tree is the missing marker.
    #[must_use]
    pub fn has_missing(&self) -> bool {
        fn walk(value: &ConfigValue) -> bool {
            match value {
                ConfigValue::Missing => true,
                ConfigValue::List(items) => items.iter().any(walk),
                ConfigValue::Map(model) => model.has_missing(),
                _ => false,
            }
        }
        self.entries.values().any(walk)
    }

    pub(crate) fn entry_mut(&mut self, key: &str) -> &mut ConfigValue {
        self.entries
            .entry(key.to_owned())
            .or_insert(ConfigValue::Null)
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigModel {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for ConfigModel {
    type Item = (String, ConfigValue);
    type IntoIter = indexmap::map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
