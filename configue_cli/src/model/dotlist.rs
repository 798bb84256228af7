//! Construction of configuration trees from dotted `key=value` overrides.

use super::ConfigModel;
use crate::{ConfigValue, ConfigueError, ConfigueResult, parse_literal};

/// Remove one pair of matching surrounding quotes.
fn strip_quotes(raw: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| raw.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(raw)
}

impl ConfigModel {
    /// Build a tree from `path.to.key=value` entries.
    ///
    /// The key is split on the first `=`. An entry without `=` sets the key
    /// to `null`. Values lose one layer of matching quotes and are then read
    /// with [`parse_literal`]. Missing intermediate mappings are created on
    /// demand and later entries overwrite earlier ones.
    ///
    /// ```
    /// use configue_cli::{ConfigModel, ConfigValue};
    ///
    /// let config = ConfigModel::from_dotlist(["a.b.c=5", "flag"])?;
    /// assert_eq!(config.get_path("a.b.c"), Some(&ConfigValue::Integer(5)));
    /// assert_eq!(config.get("flag"), Some(&ConfigValue::Null));
    /// # Ok::<_, std::sync::Arc<configue_cli::ConfigueError>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigueError::InvalidOverride`] for keys with empty
    /// segments and [`ConfigueError::Literal`] for unparsable values.
    pub fn from_dotlist<I, S>(entries: I) -> ConfigueResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::new();
        for entry in entries {
            let raw = entry.as_ref();
            let (key, value) = match raw.split_once('=') {
                Some((key, value)) => (key, parse_literal(strip_quotes(value))?),
                None => (raw, ConfigValue::Null),
            };
            config.insert_dotted(raw, key, value)?;
        }
        Ok(config)
    }

    fn insert_dotted(&mut self, entry: &str, key: &str, value: ConfigValue) -> ConfigueResult<()> {
        let segments: Vec<&str> = key.split('.').map(str::trim).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(ConfigueError::invalid_override(entry, "empty key segment"));
        }
        let Some((leaf, parents)) = segments.split_last() else {
            return Err(ConfigueError::invalid_override(entry, "empty key"));
        };
        let mut node = self;
        for segment in parents {
            let slot = node.entry_mut(segment);
            if slot.as_map().is_none() {
                *slot = ConfigValue::Map(Self::new());
            }
            node = match slot {
                ConfigValue::Map(child) => child,
                _ => return Err(ConfigueError::invalid_override(entry, "cannot descend")),
            };
        }
        node.insert(*leaf, value);
        Ok(())
    }
}
