//! Shapes for returning and exporting the full prompt configuration.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::Timestamp;

/// Full configuration document: the config row, its sections keyed by
/// `section_key`, its rules keyed by `rule_key`, and options per rule key.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigData<C, S, R, O> {
    pub config: C,
    pub sections: BTreeMap<String, S>,
    pub rules: BTreeMap<String, R>,
    pub rule_options: BTreeMap<String, Vec<O>>,
}

/// Downloadable export wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct ExportEnvelope<T> {
    pub export_date: Timestamp,
    pub config_data: T,
}

impl<T> ExportEnvelope<T> {
    pub fn new(config_data: T, export_date: Timestamp) -> Self {
        Self {
            export_date,
            config_data,
        }
    }
}

/// Key items by a string field. Later items with the same key win.
pub fn key_by<T, F>(items: Vec<T>, key: F) -> BTreeMap<String, T>
where
    F: Fn(&T) -> &str,
{
    items
        .into_iter()
        .map(|item| (key(&item).to_string(), item))
        .collect()
}

/// Group items by a string field, preserving input order within each group.
///
/// Every key in `keys` is present in the result, with an empty list when no
/// item matched.
pub fn group_by<'k, T, F>(
    keys: impl IntoIterator<Item = &'k str>,
    items: Vec<T>,
    key: F,
) -> BTreeMap<String, Vec<T>>
where
    F: Fn(&T) -> &str,
{
    let mut groups: BTreeMap<String, Vec<T>> =
        keys.into_iter().map(|k| (k.to_string(), Vec::new())).collect();
    for item in items {
        groups.entry(key(&item).to_string()).or_default().push(item);
    }
    groups
}
