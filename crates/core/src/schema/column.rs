//! Column definition for Tabula view schemas.

use crate::row::Row;
use crate::types::{AggregateOp, Direction, FilterType, SortType};
use crate::value::Value;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Placeholder shown for missing, null and empty display values.
pub const CELL_PLACEHOLDER: &str = "-";

/// A pure `(raw value, row) -> display value` function.
///
/// Returning `None` marks the display value as missing; the transform stage
/// substitutes [`CELL_PLACEHOLDER`] for it.
#[derive(Clone)]
pub struct Transform(Arc<dyn Fn(&Value, &Row) -> Option<Value> + Send + Sync>);

impl Transform {
    /// Wraps a transform function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Row) -> Option<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Applies the transform.
    #[inline]
    pub fn apply(&self, raw: &Value, row: &Row) -> Option<Value> {
        (self.0)(raw, row)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// A pure `(display value, row) -> presentation` function used by the UI layer.
#[derive(Clone)]
pub struct Render(Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>);

impl Render {
    /// Wraps a render function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Row) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Renders `Yes` / `No` for booleans and `Unknown` for anything else.
    pub fn boolean_label() -> Self {
        Self::new(|value, _| {
            match value {
                Value::Boolean(true) => "Yes",
                Value::Boolean(false) => "No",
                _ => "Unknown",
            }
            .to_string()
        })
    }

    /// Applies the render function.
    #[inline]
    pub fn apply(&self, value: &Value, row: &Row) -> String {
        (self.0)(value, row)
    }
}

impl fmt::Debug for Render {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Render(..)")
    }
}

/// Per-column filter configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Whether the option list offers its own search box.
    #[serde(default)]
    pub searchable: bool,
    /// Include or exclude the selected values.
    #[serde(default, rename = "type")]
    pub filter_type: FilterType,
    /// Selected values; empty means no restriction.
    #[serde(default)]
    pub values: Vec<Value>,
    /// Whether options are shown through the column's render function.
    #[serde(default)]
    pub render: bool,
}

impl FilterSpec {
    /// Creates an empty `equal` filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the option list is searchable.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Sets the filter mode.
    pub fn filter_type(mut self, filter_type: FilterType) -> Self {
        self.filter_type = filter_type;
        self
    }

    /// Sets the selected values.
    pub fn values(mut self, values: Vec<Value>) -> Self {
        self.values = values;
        self
    }

    /// Sets whether options are rendered.
    pub fn render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Returns true if this filter restricts rows.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.values.is_empty()
    }

    /// Returns whether `value` passes this filter.
    pub fn accepts(&self, value: &Value) -> bool {
        if self.values.is_empty() {
            return true;
        }
        let selected = self.values.contains(value);
        match self.filter_type {
            FilterType::Equal => selected,
            FilterType::NotEqual => !selected,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A column definition in a view schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Key used to read the value off a row.
    key: String,
    /// Display label.
    #[serde(default)]
    title: String,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default = "default_true")]
    sortable: bool,
    #[serde(default = "default_true")]
    exportable: bool,
    #[serde(default)]
    grouped: bool,
    /// Comparator used when this column is sorted.
    #[serde(default)]
    sort_type: SortType,
    /// Initial sort direction requested by the schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sorted: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filter: Option<FilterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aggregate: Option<AggregateOp>,
    #[serde(skip)]
    transform: Option<Transform>,
    #[serde(skip)]
    render: Option<Render>,
}

impl Column {
    /// Creates a new column with default flags.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            visible: true,
            sortable: true,
            exportable: true,
            grouped: false,
            sort_type: SortType::default(),
            sorted: None,
            filter: None,
            aggregate: None,
            transform: None,
            render: None,
        }
    }

    /// Sets whether this column is visible.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets whether this column can be sorted.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets whether this column is exported.
    pub fn exportable(mut self, exportable: bool) -> Self {
        self.exportable = exportable;
        self
    }

    /// Sets whether this column is grouped.
    pub fn grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    /// Sets the sort type.
    pub fn with_sort_type(mut self, sort_type: SortType) -> Self {
        self.sort_type = sort_type;
        self
    }

    /// Requests an initial sort on this column.
    pub fn with_sorted(mut self, direction: Direction) -> Self {
        self.sorted = Some(direction);
        self
    }

    /// Attaches a filter spec.
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Attaches a footer aggregate.
    pub fn with_aggregate(mut self, op: AggregateOp) -> Self {
        self.aggregate = Some(op);
        self
    }

    /// Attaches a transform function.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Attaches a render function.
    pub fn with_render(mut self, render: Render) -> Self {
        self.render = Some(render);
        self
    }

    /// Returns the column key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the display label.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    #[inline]
    pub fn is_exportable(&self) -> bool {
        self.exportable
    }

    #[inline]
    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    #[inline]
    pub fn sort_type(&self) -> SortType {
        self.sort_type
    }

    /// Returns the initial sort direction requested by the schema.
    ///
    /// Normalization moves this into the column set's sort key, so columns
    /// read from a `ColumnSet` always return `None`.
    #[inline]
    pub fn sorted(&self) -> Option<Direction> {
        self.sorted
    }

    #[inline]
    pub fn filter(&self) -> Option<&FilterSpec> {
        self.filter.as_ref()
    }

    #[inline]
    pub fn aggregate(&self) -> Option<AggregateOp> {
        self.aggregate
    }

    #[inline]
    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    #[inline]
    pub fn render(&self) -> Option<&Render> {
        self.render.as_ref()
    }

    /// Renders a display value for the UI, falling back to its text form.
    pub fn present(&self, value: &Value, row: &Row) -> String {
        match &self.render {
            Some(render) => render.apply(value, row),
            None => value.to_string(),
        }
    }

    pub(crate) fn filter_mut(&mut self) -> Option<&mut FilterSpec> {
        self.filter.as_mut()
    }

    pub(crate) fn clear_sorted(&mut self) {
        self.sorted = None;
    }
}

impl PartialEq for Column {
    // Functions are compared by presence only.
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.title == other.title
            && self.visible == other.visible
            && self.sortable == other.sortable
            && self.exportable == other.exportable
            && self.grouped == other.grouped
            && self.sort_type == other.sort_type
            && self.sorted == other.sorted
            && self.filter == other.filter
            && self.aggregate == other.aggregate
            && self.transform.is_some() == other.transform.is_some()
            && self.render.is_some() == other.render.is_some()
    }
}
