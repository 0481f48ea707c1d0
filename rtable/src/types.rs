//! Keyed-row value structures produced by ingestion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Row key -> column name -> cell value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table(BTreeMap<String, BTreeMap<String, Value>>);

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_cell(&mut self, row: impl Into<String>, column: impl Into<String>, value: Value) {
        self.0.entry(row.into()).or_default().insert(column.into(), value);
    }

    pub fn rows(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Value>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, BTreeMap<String, Value>>> for Table {
    fn from(rows: BTreeMap<String, BTreeMap<String, Value>>) -> Self {
        Self(rows)
    }
}

/// Row key -> value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(BTreeMap<String, Value>);

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, row: impl Into<String>, value: Value) {
        self.0.insert(row.into(), value);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for Series {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self(entries)
    }
}
