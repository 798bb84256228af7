//! Traversal of concrete instances.

use indexmap::IndexMap;

use crate::{CONSTRUCTOR_KEY, ConfigModel, ConfigValue, Instance};

/// Override to use in place of a whole node: present, not null and not a
/// mapping that could be merged field by field.
pub(super) fn leaf_override(overridden: Option<&ConfigValue>) -> Option<&ConfigValue> {
    overridden.filter(|value| !value.is_null() && value.as_map().is_none())
}

/// Build the skeleton of an already constructed instance.
///
/// Records keep their declared fields and gain a constructor key, mappings
/// mirror their own keys, and leaves take the override when one is present.
/// Every nested value is traversed against the matching override subtree.
///
/// ```
/// use configue_cli::{ConfigValue, Instance, Record, traverse_instance};
///
/// let handler = Instance::from(Record::named("app::Handler").with("level", 10));
/// let overrides = configue_cli::ConfigModel::from_dotlist(["level=20"])?;
/// let (skeleton, _) = traverse_instance(&handler, Some(&ConfigValue::Map(overrides)));
/// let skeleton = skeleton.as_map().cloned().unwrap_or_default();
/// assert_eq!(skeleton.get("()"), Some(&ConfigValue::from("app::Handler")));
/// assert_eq!(skeleton.get("level"), Some(&ConfigValue::Integer(20)));
/// # Ok::<_, std::sync::Arc<configue_cli::ConfigueError>>(())
/// ```
#[must_use]
pub fn traverse_instance(
    instance: &Instance,
    overridden: Option<&ConfigValue>,
) -> (ConfigValue, Instance) {
    if let Some(value) = leaf_override(overridden)
        && !matches!(instance, Instance::Value(leaf) if leaf.as_map().is_none())
    {
        return (value.clone(), Instance::Value(value.clone()));
    }
    let overrides = overridden.and_then(ConfigValue::as_map);
    match instance {
        Instance::Record(record) => {
            let mut skeleton = ConfigModel::new();
            skeleton.insert(CONSTRUCTOR_KEY, record.type_name());
            for (name, value) in record.fields() {
                let (entry, _) = traverse_instance(value, overrides.and_then(|m| m.get(name)));
                skeleton.insert(name, entry);
            }
            (ConfigValue::Map(skeleton), instance.clone())
        }
        Instance::Mapping(entries) => {
            let (skeleton, rebuilt) = traverse_entries(
                entries.iter().map(|(key, value)| (key.as_str(), value.clone())),
                overrides,
            );
            (ConfigValue::Map(skeleton), Instance::Mapping(rebuilt))
        }
        Instance::Value(ConfigValue::Map(model)) => {
            let (skeleton, rebuilt) = traverse_entries(
                model
                    .iter()
                    .map(|(key, value)| (key, Instance::Value(value.clone()))),
                overrides,
            );
            (ConfigValue::Map(skeleton), Instance::Mapping(rebuilt))
        }
        Instance::Value(value) => {
            let resolved = overridden
                .filter(|candidate| !candidate.is_null())
                .unwrap_or(value);
            (resolved.clone(), Instance::Value(resolved.clone()))
        }
    }
}

fn traverse_entries<'a>(
    entries: impl Iterator<Item = (&'a str, Instance)>,
    overrides: Option<&ConfigModel>,
) -> (ConfigModel, IndexMap<String, Instance>) {
    let mut skeleton = ConfigModel::new();
    let mut rebuilt = IndexMap::new();
    for (key, value) in entries {
        let (entry, inner) = traverse_instance(&value, overrides.and_then(|m| m.get(key)));
        skeleton.insert(key, entry);
        rebuilt.insert(key.to_owned(), inner);
    }
    (skeleton, rebuilt)
}
