//! Key/value data applied to a template.

use std::collections::BTreeMap;

use docfill_token::TokenTable;
use serde::{Deserialize, Serialize};

/// A mapping from token key to string value.
///
/// Missing keys are "unfilled", never an error; an empty string value counts
/// as unfilled too, so a half-completed form behaves the same as an untouched
/// one. Interactive mode uses a single `ValueSet`; batch mode uses one per
/// row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueSet {
    values: BTreeMap<String, String>,
}

impl ValueSet {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a value set from key/value pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { values }
    }

    /// Sets a value, replacing any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the filled value for a key.
    ///
    /// Absent keys and empty-string values both return `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Number of stored entries, including empty-string values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys from the table that have no filled value, in document order.
    ///
    /// This feeds the pre-export confirmation gate ("N fields are empty").
    pub fn unfilled_keys<'t>(&self, table: &'t TokenTable) -> Vec<&'t str> {
        table
            .keys()
            .filter(|key| self.get(key).is_none())
            .collect()
    }

    /// Returns true if every token in the table has a filled value.
    pub fn is_complete(&self, table: &TokenTable) -> bool {
        !table.is_empty() && self.unfilled_keys(table).is_empty()
    }
}
