//! Change notifications emitted after a view transition.

use crate::state::ViewState;
use core::fmt;

/// The transition that produced a change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Sort,
    Filter,
    Search,
    PageSize,
    PageIndex,
    Reset,
    Rows,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeKind::Sort => "sort",
            ChangeKind::Filter => "filter",
            ChangeKind::Search => "search",
            ChangeKind::PageSize => "page-size",
            ChangeKind::PageIndex => "page-index",
            ChangeKind::Reset => "reset",
            ChangeKind::Rows => "rows",
        };
        f.write_str(name)
    }
}

/// A snapshot delivered to subscribers after a transition.
///
/// `state` is the state after the transition, with the page index already
/// clamped to the new filtered row count.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewChange {
    pub kind: ChangeKind,
    pub state: ViewState,
    pub filtered_count: usize,
    pub total_pages: usize,
}
