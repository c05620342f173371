//! Row structure for Tabula.
//!
//! A `Row` is an opaque keyed record owned by the caller. The view pipeline
//! never mutates input rows; stages produce derived copies that keep the
//! source row's id so identity survives sorting, filtering and paging.

use crate::value::Value;
use alloc::string::String;
use core::sync::atomic::{AtomicU64, Ordering};
use hashbrown::HashMap;

/// Unique identifier for a row.
pub type RowId = u64;

/// Global row ID counter for generating unique row IDs.
static NEXT_ROW_ID: AtomicU64 = AtomicU64::new(0);

/// Gets the next unique row ID.
pub fn next_row_id() -> RowId {
    NEXT_ROW_ID.fetch_add(1, Ordering::SeqCst)
}

/// Sets the next row ID.
pub fn set_next_row_id(id: RowId) {
    NEXT_ROW_ID.store(id, Ordering::SeqCst);
}

/// A keyed record of field values.
#[derive(Clone, Debug, Default)]
pub struct Row {
    /// Unique identifier for this row.
    id: RowId,
    /// Field values keyed by column key.
    fields: HashMap<String, Value>,
}

impl Row {
    /// Creates a new row with the given ID and fields.
    pub fn new(id: RowId, fields: HashMap<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Creates a row from `(key, value)` pairs.
    pub fn from_pairs<K, V, I>(id: RowId, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { id, fields }
    }

    /// Creates a row with an automatically assigned ID.
    pub fn create<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_pairs(next_row_id(), pairs)
    }

    /// Returns the row ID.
    #[inline]
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Gets the value stored under `key`, or None when the key is missing.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Sets a field, returning the previous value if there was one.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    /// Builder-style variant of [`Row::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns a reference to the fields.
    #[inline]
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if this row has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.fields == other.fields
    }
}
