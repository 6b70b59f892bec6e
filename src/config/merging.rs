use std::collections::BTreeMap;

/// A configuration value: either a plain string or a nested table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// Leaf value.
    Text(String),
    /// Nested mapping of names to values.
    Table(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// An empty table.
    pub fn empty_table() -> Self {
        ConfigValue::Table(BTreeMap::new())
    }

    /// Returns the text of a leaf value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(text) => Some(text),
            ConfigValue::Table(_) => None,
        }
    }

    /// Returns the entries of a table value.
    pub fn as_table(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Table(table) => Some(table),
            ConfigValue::Text(_) => None,
        }
    }

    /// Looks up a direct child of a table value.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_table().and_then(|table| table.get(key))
    }
}

/// How two tables are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Overlay entries replace base entries of the same name wholesale.
    Shallow,
    /// Tables present on both sides are merged recursively.
    Deep,
}

/// Merges `overlay` on top of `base`.
///
/// Overlay values always win. With [`MergeStrategy::Deep`] keys the overlay
/// does not define are kept from the base at every level; for non-table
/// values the overlay completely replaces the base.
pub fn merge(base: ConfigValue, overlay: ConfigValue, strategy: MergeStrategy) -> ConfigValue {
    match (base, overlay) {
        (ConfigValue::Table(base_table), ConfigValue::Table(overlay_table)) => {
            let mut merged_table = overlay_table;

            for (key, base_value) in base_table {
                match merged_table.remove(&key) {
                    None => {
                        merged_table.insert(key, base_value);
                    }
                    Some(overlay_value) => {
                        let merged_value = match strategy {
                            MergeStrategy::Deep => merge(base_value, overlay_value, strategy),
                            MergeStrategy::Shallow => overlay_value,
                        };
                        merged_table.insert(key, merged_value);
                    }
                }
            }

            ConfigValue::Table(merged_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merges values given in priority order, highest priority first.
pub fn merge_all<I>(values: I, strategy: MergeStrategy) -> ConfigValue
where
    I: IntoIterator<Item = ConfigValue>,
    I::IntoIter: DoubleEndedIterator,
{
    values
        .into_iter()
        .rev()
        .fold(ConfigValue::empty_table(), |accumulated, value| {
            merge(accumulated, value, strategy)
        })
}
