//! Deep merge of configuration layers.

use tracing::debug;

use super::ConfigModel;
use crate::ConfigValue;

/// How two sequences stored under the same key combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ListMergeMode {
    /// Append the incoming sequence to the existing one.
    #[default]
    Extend,
    /// Discard the existing sequence in favour of the incoming one.
    Replace,
}

impl ConfigModel {
    /// Fold `layers` into `self` in order.
    ///
    /// - keys absent from `self` are copied in;
    /// - two mappings merge recursively with the same `mode`;
    /// - two sequences are concatenated under [`ListMergeMode::Extend`];
    /// - every other pairing is replaced by the incoming value, unless both
    ///   sides are already equal.
    ///
    /// ```
    /// use configue_cli::{ConfigModel, ListMergeMode};
    ///
    /// let mut base = ConfigModel::from_dotlist(["handlers=[a]", "level=10"])?;
    /// let layer = ConfigModel::from_dotlist(["handlers=[b]", "level=20"])?;
    /// base.merge([&layer], ListMergeMode::Extend);
    /// assert_eq!(base, ConfigModel::from_dotlist(["handlers=[a, b]", "level=20"])?);
    /// # Ok::<_, std::sync::Arc<configue_cli::ConfigueError>>(())
    /// ```
    pub fn merge<'a, I>(&mut self, layers: I, mode: ListMergeMode)
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut count = 0_usize;
        for layer in layers {
            merge_into(self, layer, mode);
            count += 1;
        }
        debug!(layers = count, ?mode, "merged configuration layers");
    }
}

fn merge_into(destination: &mut ConfigModel, source: &ConfigModel, mode: ListMergeMode) {
    for (key, incoming) in source.iter() {
        match destination.entries.get_mut(key) {
            Some(current) => merge_value(current, incoming, mode),
            None => {
                destination.entries.insert(key.to_owned(), incoming.clone());
            }
        }
    }
}

fn merge_value(current: &mut ConfigValue, incoming: &ConfigValue, mode: ListMergeMode) {
    match (current, incoming) {
        (ConfigValue::Map(existing), ConfigValue::Map(layer)) => merge_into(existing, layer, mode),
        (ConfigValue::List(existing), ConfigValue::List(layer)) if mode == ListMergeMode::Extend => {
            existing.extend(layer.iter().cloned());
        }
        (slot, value) => {
            if slot != value {
                *slot = value.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn list(items: &[i32]) -> ConfigValue {
        ConfigValue::List(items.iter().copied().map(ConfigValue::from).collect())
    }

    #[fixture]
    fn base() -> ConfigModel {
        let mut nested = ConfigModel::new();
        nested.insert("depth", 1);
        nested.insert("items", list(&[1]));
        let mut model = ConfigModel::new();
        model.insert("name", "base");
        model.insert("nested", nested);
        model.insert("items", list(&[1, 2]));
        model
    }

    #[rstest]
    #[case::extend(ListMergeMode::Extend, list(&[1, 2, 3]), list(&[1, 9]))]
    #[case::replace(ListMergeMode::Replace, list(&[3]), list(&[9]))]
    fn combines_sequences_by_mode(
        base: ConfigModel,
        #[case] mode: ListMergeMode,
        #[case] top: ConfigValue,
        #[case] nested: ConfigValue,
    ) {
        let mut merged = base;
        let mut inner = ConfigModel::new();
        inner.insert("items", list(&[9]));
        let mut layer = ConfigModel::new();
        layer.insert("items", list(&[3]));
        layer.insert("nested", inner);

        merged.merge([&layer], mode);

        assert_eq!(merged.get("items"), Some(&top));
        assert_eq!(merged.get_path("nested.items"), Some(&nested));
        assert_eq!(merged.get_path("nested.depth"), Some(&ConfigValue::Integer(1)));
    }

    #[rstest]
    fn applies_layers_left_to_right(base: ConfigModel) {
        let mut merged = base;
        let first: ConfigModel = [("name", "first"), ("extra", "x")].into_iter().collect();
        let second: ConfigModel = [("name", "second")].into_iter().collect();
        merged.merge([&first, &second], ListMergeMode::Replace);
        assert_eq!(merged.get("name"), Some(&ConfigValue::from("second")));
        assert_eq!(merged.get("extra"), Some(&ConfigValue::from("x")));
        assert_eq!(merged.keys().collect::<Vec<_>>(), ["name", "nested", "items", "extra"]);
    }

    #[rstest]
    fn missing_is_replaced_outright() {
        let mut merged: ConfigModel = [("port", ConfigValue::Missing)].into_iter().collect();
        let mut server = ConfigModel::new();
        server.insert("port", 80);
        let layer: ConfigModel = [("port", server.clone())].into_iter().collect();
        merged.merge([&layer], ListMergeMode::Extend);
        assert_eq!(merged.get("port"), Some(&ConfigValue::Map(server)));
    }

    #[rstest]
    fn mapping_over_scalar_replaces_it() {
        let mut merged: ConfigModel = [("a", 1)].into_iter().collect();
        let layer: ConfigModel = [("a", list(&[1]))].into_iter().collect();
        merged.merge([&layer], ListMergeMode::Extend);
        assert_eq!(merged.get("a"), Some(&list(&[1])));
    }

    #[rstest]
    #[case::replace(ListMergeMode::Replace)]
    #[case::extend(ListMergeMode::Extend)]
    fn merging_a_copy_of_itself_is_idempotent(#[case] mode: ListMergeMode) {
        let mut nested = ConfigModel::new();
        nested.insert("x", ConfigValue::Missing);
        nested.insert("y", "text");
        let mut model = ConfigModel::new();
        model.insert("nested", nested);
        model.insert("flag", true);
        if mode == ListMergeMode::Replace {
            model.insert("items", list(&[1, 2]));
        }

        let snapshot = model.clone();
        model.merge([&snapshot], mode);
        assert_eq!(model, snapshot);
    }

    #[rstest]
    fn no_layers_leave_the_model_untouched(base: ConfigModel) {
        let mut merged = base.clone();
        merged.merge(std::iter::empty(), ListMergeMode::Extend);
        assert_eq!(merged, base);
    }
}
