//! Distinct value executor.
//!
//! Collects the unique display values of every filterable column. The input
//! is the sorted, unfiltered row collection, so options are listed in
//! first-seen sort order and never shrink when another column is filtered.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::{HashMap, HashSet};
use tabula_core::schema::ColumnSet;
use tabula_core::{Row, Value};

/// Unique display values per filterable column key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistinctValues {
    values: HashMap<String, Vec<Value>>,
    /// Keys whose option list can be narrowed by a needle.
    searchable: HashSet<String>,
}

impl DistinctValues {
    /// Returns the distinct values of `key` in first-seen order.
    ///
    /// Columns without a filter spec have no entry.
    pub fn get(&self, key: &str) -> Option<&[Value]> {
        self.values.get(key).map(Vec::as_slice)
    }

    /// Returns the distinct values of `key` whose text form contains `needle`,
    /// ignoring case. An empty needle, or a column whose filter is not
    /// searchable, keeps every value.
    pub fn options(&self, key: &str, needle: &str) -> Vec<Value> {
        let Some(values) = self.values.get(key) else {
            return Vec::new();
        };
        if needle.is_empty() || !self.is_searchable(key) {
            return values.clone();
        }
        let needle = needle.to_lowercase();
        values
            .iter()
            .filter(|v| v.to_string().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Returns true if the option list of `key` accepts a search needle.
    #[inline]
    pub fn is_searchable(&self, key: &str) -> bool {
        self.searchable.contains(key)
    }

    /// Returns the keys that carry a value set.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Distinct executor - extracts filter options from display rows.
pub struct DistinctExecutor<'a> {
    columns: &'a ColumnSet,
}

impl<'a> DistinctExecutor<'a> {
    /// Creates a new distinct executor.
    pub fn new(columns: &'a ColumnSet) -> Self {
        Self { columns }
    }

    /// Executes the extraction on the input rows.
    ///
    /// An empty input yields no entries at all, matching a table with no
    /// data to filter.
    pub fn execute(&self, input: &[Row]) -> DistinctValues {
        let mut distinct = DistinctValues::default();
        if input.is_empty() {
            return distinct;
        }

        for column in self.columns.filterable() {
            let key = column.key();
            if column.filter().map_or(false, |spec| spec.searchable) {
                distinct.searchable.insert(key.to_string());
            }
            let mut seen: HashSet<&Value> = HashSet::new();
            let mut ordered = Vec::new();
            for row in input {
                let value = row.get(key).unwrap_or(&Value::Null);
                if seen.insert(value) {
                    ordered.push(value.clone());
                }
            }
            distinct.values.insert(key.to_string(), ordered);
        }

        distinct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use tabula_core::schema::{Column, FilterSpec};

    fn columns() -> ColumnSet {
        ColumnSet::normalize(&[
            Column::new("city", "City").with_filter(FilterSpec::new().searchable(true)),
            Column::new("n", "N"),
            Column::new("flag", "Flag").with_filter(FilterSpec::new().searchable(true)),
        ])
        .unwrap()
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::from_pairs(1, [("city", Value::from("Berlin")), ("n", Value::Int64(1)), ("flag", true.into())]),
            Row::from_pairs(2, [("city", Value::from("Athens")), ("n", Value::Int64(2)), ("flag", false.into())]),
            Row::from_pairs(3, [("city", Value::from("Berlin")), ("n", Value::Int64(3)), ("flag", true.into())]),
        ]
    }

    #[test]
    fn test_distinct_first_seen_order() {
        let set = columns();
        let distinct = DistinctExecutor::new(&set).execute(&rows());

        assert_eq!(distinct.len(), 2);
        assert_eq!(
            distinct.get("city"),
            Some(&[Value::from("Berlin"), Value::from("Athens")][..])
        );
        assert_eq!(
            distinct.get("flag"),
            Some(&[Value::Boolean(true), Value::Boolean(false)][..])
        );
        // Unfiltered columns are not collected.
        assert_eq!(distinct.get("n"), None);
    }

    #[test]
    fn test_distinct_empty_input() {
        let set = columns();
        let distinct = DistinctExecutor::new(&set).execute(&[]);
        assert!(distinct.is_empty());
        assert!(distinct.options("city", "").is_empty());
    }

    #[test]
    fn test_distinct_options_search() {
        let set = columns();
        let distinct = DistinctExecutor::new(&set).execute(&rows());

        assert_eq!(distinct.options("city", "ATH"), vec![Value::from("Athens")]);
        assert_eq!(distinct.options("city", "").len(), 2);
        assert_eq!(distinct.options("flag", "tru"), vec![Value::Boolean(true)]);
        assert!(distinct.options("city", "rome").is_empty());
        assert!(distinct.options("missing", "").is_empty());
    }

    #[test]
    fn test_options_without_searchable_filter() {
        let set = ColumnSet::normalize(&[
            Column::new("city", "City").with_filter(FilterSpec::new()),
        ])
        .unwrap();
        let distinct = DistinctExecutor::new(&set).execute(&rows());

        assert!(!distinct.is_searchable("city"));
        assert_eq!(
            distinct.options("city", "ath"),
            vec![Value::from("Berlin"), Value::from("Athens")]
        );
    }
}
