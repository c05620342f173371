//! Enumerations shared by the column schema and the view pipeline.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Value domain controlling how a column is compared when sorted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortType {
    /// Locale-aware text comparison
    #[default]
    #[serde(rename = "string")]
    String,
    /// Numeric comparison, null as zero
    #[serde(rename = "number")]
    Number,
    /// ISO date strings or epoch milliseconds
    #[serde(rename = "date")]
    Date,
    /// `true` before `false`
    #[serde(rename = "boolean")]
    Boolean,
    /// Compact `"<d> d, <h> h"` durations
    #[serde(rename = "duration")]
    Duration,
    /// `MM.yyyy`
    #[serde(rename = "MM.yyyy")]
    MonthYear,
    /// `dd.MM`
    #[serde(rename = "dd.MM")]
    DayMonth,
    /// `dd.MM.yyyy`
    #[serde(rename = "dd.MM.yyyy")]
    DayMonthYear,
    /// `dd.MM.yyyy hh:mm:ss`
    #[serde(rename = "dd.MM.yyyy hh:mm:ss")]
    DayMonthYearTime,
    /// Any tag this engine does not know; never reorders rows.
    #[serde(other)]
    Unrecognized,
}

impl SortType {
    /// Returns the date format tokens for the formatted-date variants.
    pub fn date_format(&self) -> Option<&'static str> {
        match self {
            SortType::MonthYear => Some("MM.yyyy"),
            SortType::DayMonth => Some("dd.MM"),
            SortType::DayMonthYear => Some("dd.MM.yyyy"),
            SortType::DayMonthYearTime => Some("dd.MM.yyyy hh:mm:ss"),
            _ => None,
        }
    }

    /// Parses a sort type tag; unknown tags map to `Unrecognized`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => SortType::String,
            "number" => SortType::Number,
            "date" => SortType::Date,
            "boolean" => SortType::Boolean,
            "duration" => SortType::Duration,
            "MM.yyyy" => SortType::MonthYear,
            "dd.MM" => SortType::DayMonth,
            "dd.MM.yyyy" => SortType::DayMonthYear,
            "dd.MM.yyyy hh:mm:ss" => SortType::DayMonthYearTime,
            _ => SortType::Unrecognized,
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("ASC"),
            Direction::Desc => f.write_str("DESC"),
        }
    }
}

/// Filter mode of a column filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    /// Keep rows whose value is one of the selected values.
    #[default]
    #[serde(rename = "equal")]
    Equal,
    /// Drop rows whose value is one of the selected values.
    #[serde(rename = "not-equal", alias = "not equal")]
    NotEqual,
}

impl FilterType {
    /// Returns the other filter mode.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            FilterType::Equal => FilterType::NotEqual,
            FilterType::NotEqual => FilterType::Equal,
        }
    }
}

/// Footer aggregation operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateOp {
    /// Returns the footer label for this operator.
    pub fn label(&self) -> &'static str {
        match self {
            AggregateOp::Count => "Count",
            AggregateOp::Sum => "Sum",
            AggregateOp::Avg => "Average",
            AggregateOp::Min => "Minimum",
            AggregateOp::Max => "Maximum",
        }
    }
}
