//! Records and record sets.
//!
//! A [`Record`] is a flat mapping from field name to [`Value`]. A
//! [`RecordSet`] is an ordered collection of records; its order is the order
//! in which spells end up in the rendered document.
//!
//! Record sets are treated as immutable values: every transformation in the
//! pipeline takes `&RecordSet` and builds a new one.

use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single record (one spell).
pub type Record = BTreeMap<String, Value>;

/// An ordered collection of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Creates a new empty record set.
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Creates a record set from records, keeping their order.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Returns the records as a slice.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Gets a specific record by index.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Consumes the set and returns its records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Returns the union of field names present in any record.
    pub fn columns(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .flat_map(|record| record.keys().cloned())
            .collect()
    }

    /// Returns the field names present in every record.
    ///
    /// An empty set has no columns.
    pub fn columns_in_every_record(&self) -> BTreeSet<String> {
        let mut records = self.records.iter();
        let Some(first) = records.next() else {
            return BTreeSet::new();
        };

        let mut common: BTreeSet<String> = first.keys().cloned().collect();
        for record in records {
            common.retain(|column| record.contains_key(column));
        }
        common
    }

    /// Returns the indices of records where `column` holds a non-null value.
    pub fn non_null_rows(&self, column: &str) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.get(column).is_some_and(|value| !value.is_null()))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Returns the indices of records that do not carry `column` at all.
    pub fn absent_rows(&self, column: &str) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| !record.contains_key(column))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Builds a new set with the records that satisfy `predicate`.
    ///
    /// Surviving records keep their relative order.
    pub fn filtered<F>(&self, mut predicate: F) -> RecordSet
    where
        F: FnMut(&Record) -> bool,
    {
        self.records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    /// Builds a new set by transforming every record.
    pub fn map_records<F>(&self, transform: F) -> RecordSet
    where
        F: FnMut(&Record) -> Record,
    {
        self.records.iter().map(transform).collect()
    }

    /// Builds a new set from the records at `indices`, in the given order.
    ///
    /// Indices out of bounds are ignored.
    pub fn select(&self, indices: &[usize]) -> RecordSet {
        indices
            .iter()
            .filter_map(|&idx| self.records.get(idx))
            .cloned()
            .collect()
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
