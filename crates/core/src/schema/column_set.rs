//! Normalized column sets.
//!
//! A `ColumnSet` is the schema every pipeline stage reads: the visible columns
//! in schema order plus the single active sort key. It is an immutable value;
//! every state transition returns a new set, so a retained reset snapshot can
//! never observe later sort or filter changes.

use super::column::Column;
use crate::error::{Error, Result};
use crate::types::{Direction, FilterType};
use crate::value::Value;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// The active sort: one column key and a direction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    pub key: String,
    pub direction: Direction,
}

impl SortKey {
    pub fn new(key: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }
}

/// The normalized, visible column set with at most one active sort.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSet {
    columns: Vec<Column>,
    sort: Option<SortKey>,
}

impl ColumnSet {
    /// Normalizes a caller-supplied schema.
    ///
    /// Invisible columns are dropped, duplicate visible keys are rejected and
    /// the first sortable column carrying an initial direction becomes the
    /// active sort. The input columns are cloned, never modified.
    pub fn normalize(columns: &[Column]) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut visible = Vec::with_capacity(columns.len());
        let mut sort: Option<SortKey> = None;

        for column in columns.iter().filter(|c| c.is_visible()) {
            if !seen.insert(column.key()) {
                return Err(Error::duplicate_column(column.key()));
            }

            let mut column = column.clone();
            if let Some(direction) = column.sorted() {
                if !column.is_sortable() {
                    tracing::warn!(column = column.key(), "ignoring initial sort on non-sortable column");
                } else if let Some(active) = &sort {
                    tracing::warn!(
                        column = column.key(),
                        active = active.key.as_str(),
                        "ignoring initial sort, another column is already sorted"
                    );
                } else {
                    sort = Some(SortKey::new(column.key(), direction));
                }
                // The set's sort key is the only place the active sort lives.
                column.clear_sorted();
            }
            visible.push(column);
        }

        tracing::debug!(
            columns = visible.len(),
            dropped = columns.len() - visible.len(),
            "normalized column set"
        );

        Ok(Self {
            columns: visible,
            sort,
        })
    }

    /// Returns the visible columns in schema order.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Gets a column by key.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key() == key)
    }

    /// Gets a column position by key.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key() == key)
    }

    /// Gets a column by key, failing if it is not part of this set.
    pub fn require(&self, key: &str) -> Result<&Column> {
        self.get(key).ok_or_else(|| Error::column_not_found(key))
    }

    /// Returns the active sort key.
    #[inline]
    pub fn sort_key(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    /// Returns the sorted column together with its direction.
    pub fn sort_column(&self) -> Option<(&Column, Direction)> {
        let sort = self.sort.as_ref()?;
        self.get(&sort.key).map(|c| (c, sort.direction))
    }

    /// Returns the direction of `key` if it is the sorted column.
    pub fn direction_of(&self, key: &str) -> Option<Direction> {
        self.sort
            .as_ref()
            .filter(|s| s.key == key)
            .map(|s| s.direction)
    }

    /// Returns the columns carrying a filter spec.
    pub fn filterable(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.filter().is_some())
    }

    /// Returns the columns carrying a footer aggregate.
    pub fn aggregated(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.aggregate().is_some())
    }

    /// Applies the sort cycling rule to `key`.
    ///
    /// A different sortable column becomes the only sort key with `Asc`;
    /// the already sorted column flips direction. Returns `None` when `key`
    /// is unknown or not sortable.
    pub fn with_sort_toggled(&self, key: &str) -> Option<Self> {
        let column = self.get(key)?;
        if !column.is_sortable() {
            return None;
        }

        let direction = match self.direction_of(key) {
            Some(current) => current.toggled(),
            None => Direction::Asc,
        };

        Some(Self {
            columns: self.columns.clone(),
            sort: Some(SortKey::new(key, direction)),
        })
    }

    /// Replaces the filter values and mode of `key`.
    ///
    /// Returns `None` when `key` is unknown or has no filter spec; the set of
    /// filterable columns is fixed at normalization.
    pub fn with_filter(&self, key: &str, values: Vec<Value>, filter_type: FilterType) -> Option<Self> {
        self.updated(key, |column| match column.filter_mut() {
            Some(spec) => {
                spec.values = values;
                spec.filter_type = filter_type;
                true
            }
            None => false,
        })
    }

    /// Empties the filter values of `key`, keeping its mode.
    pub fn with_filter_cleared(&self, key: &str) -> Option<Self> {
        self.updated(key, |column| match column.filter_mut() {
            Some(spec) => {
                spec.values.clear();
                true
            }
            None => false,
        })
    }

    /// Adds `value` to the selection of `key`, or removes it if already selected.
    pub fn with_filter_value_toggled(&self, key: &str, value: &Value) -> Option<Self> {
        self.updated(key, |column| match column.filter_mut() {
            Some(spec) => {
                if let Some(pos) = spec.values.iter().position(|v| v == value) {
                    spec.values.remove(pos);
                } else {
                    spec.values.push(value.clone());
                }
                true
            }
            None => false,
        })
    }

    /// Flips the filter mode of `key` between `equal` and `not-equal`.
    pub fn with_filter_mode_toggled(&self, key: &str) -> Option<Self> {
        self.updated(key, |column| match column.filter_mut() {
            Some(spec) => {
                spec.filter_type = spec.filter_type.toggled();
                true
            }
            None => false,
        })
    }

    fn updated<F>(&self, key: &str, update: F) -> Option<Self>
    where
        F: FnOnce(&mut Column) -> bool,
    {
        let pos = self.position(key)?;
        let mut columns = self.columns.clone();
        if !update(&mut columns[pos]) {
            return None;
        }
        Some(Self {
            columns,
            sort: self.sort.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FilterSpec;
    use crate::types::SortType;
    use alloc::vec;

    fn schema() -> Vec<Column> {
        vec![
            Column::new("n", "Number").with_sort_type(SortType::Number),
            Column::new("name", "Name").with_filter(FilterSpec::new()),
            Column::new("secret", "Secret").visible(false),
            Column::new("id", "ID").sortable(false),
        ]
    }

    #[test]
    fn test_normalize_drops_invisible() {
        let set = ColumnSet::normalize(&schema()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.get("secret").is_none());
        assert_eq!(set.position("id"), Some(2));
        assert!(set.sort_key().is_none());
    }

    #[test]
    fn test_normalize_duplicate_keys() {
        let columns = vec![Column::new("a", "A"), Column::new("a", "Other A")];
        assert_eq!(
            ColumnSet::normalize(&columns),
            Err(Error::duplicate_column("a"))
        );

        // Hidden duplicates never participate.
        let columns = vec![Column::new("a", "A"), Column::new("a", "Hidden").visible(false)];
        assert!(ColumnSet::normalize(&columns).is_ok());
    }

    #[test]
    fn test_normalize_single_initial_sort() {
        let columns = vec![
            Column::new("a", "A").with_sorted(Direction::Desc),
            Column::new("b", "B").with_sorted(Direction::Asc),
        ];
        let set = ColumnSet::normalize(&columns).unwrap();
        assert_eq!(set.sort_key(), Some(&SortKey::new("a", Direction::Desc)));
        assert_eq!(set.direction_of("b"), None);
        assert!(set.columns().iter().all(|c| c.sorted().is_none()));
    }

    #[test]
    fn test_normalize_leaves_input_untouched() {
        let columns = vec![Column::new("a", "A").with_sorted(Direction::Asc).sortable(false)];
        let _ = ColumnSet::normalize(&columns).unwrap();
        assert_eq!(columns[0].sorted(), Some(Direction::Asc));
    }

    #[test]
    fn test_sort_cycle() {
        let set = ColumnSet::normalize(&schema()).unwrap();

        let asc = set.with_sort_toggled("n").unwrap();
        assert_eq!(asc.direction_of("n"), Some(Direction::Asc));

        let desc = asc.with_sort_toggled("n").unwrap();
        assert_eq!(desc.direction_of("n"), Some(Direction::Desc));

        let other = desc.with_sort_toggled("name").unwrap();
        assert_eq!(other.direction_of("name"), Some(Direction::Asc));
        assert_eq!(other.direction_of("n"), None);

        assert!(other.with_sort_toggled("id").is_none());
        assert!(other.with_sort_toggled("missing").is_none());

        // The original value is untouched.
        assert!(set.sort_key().is_none());
    }

    #[test]
    fn test_filter_updates() {
        let set = ColumnSet::normalize(&schema()).unwrap();

        let filtered = set
            .with_filter("name", vec!["a".into(), "b".into()], FilterType::NotEqual)
            .unwrap();
        let spec = filtered.get("name").unwrap().filter().unwrap();
        assert_eq!(spec.values.len(), 2);
        assert_eq!(spec.filter_type, FilterType::NotEqual);

        let cleared = filtered.with_filter_cleared("name").unwrap();
        let spec = cleared.get("name").unwrap().filter().unwrap();
        assert!(spec.values.is_empty());
        assert_eq!(spec.filter_type, FilterType::NotEqual);

        assert!(set.with_filter_cleared("n").is_none());
        assert!(set.get("name").unwrap().filter().unwrap().values.is_empty());
    }

    #[test]
    fn test_filter_requires_spec() {
        let set = ColumnSet::normalize(&schema()).unwrap();
        assert!(set.with_filter("n", vec![Value::Int64(1)], FilterType::Equal).is_none());
        assert!(set.with_filter("missing", vec![], FilterType::Equal).is_none());

        let keys: Vec<&str> = set.filterable().map(Column::key).collect();
        assert_eq!(keys, vec!["name"]);
    }

    #[test]
    fn test_filter_toggles() {
        let set = ColumnSet::normalize(&schema()).unwrap();
        let a = Value::from("a");

        let on = set.with_filter_value_toggled("name", &a).unwrap();
        assert_eq!(on.get("name").unwrap().filter().unwrap().values, vec![a.clone()]);

        let off = on.with_filter_value_toggled("name", &a).unwrap();
        assert!(off.get("name").unwrap().filter().unwrap().values.is_empty());

        let mode = set.with_filter_mode_toggled("name").unwrap();
        assert_eq!(
            mode.get("name").unwrap().filter().unwrap().filter_type,
            FilterType::NotEqual
        );
        assert!(set.with_filter_mode_toggled("n").is_none());
    }

    #[test]
    fn test_require() {
        let set = ColumnSet::normalize(&schema()).unwrap();
        assert!(set.require("n").is_ok());
        assert_eq!(set.require("secret").unwrap_err(), Error::column_not_found("secret"));
    }
}
