//! View configuration.

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use tabula_core::{Error, Result};

/// Page sizes offered to the user by default.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 35, 50];

/// Options a `TableView` is built with.
///
/// Missing fields take their defaults when deserialized, so `{}` is a valid
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewOptions {
    /// Initial page size, restored by reset.
    pub page_size: usize,
    /// Page sizes offered by the UI.
    pub page_size_options: Vec<usize>,
    /// When false, every row is shown on a single page.
    pub paging: bool,
    /// When false, the search term is fixed to empty.
    pub searchable: bool,
    /// When false, reset is disabled.
    pub resettable: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE_OPTIONS[0],
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            paging: true,
            searchable: true,
            resettable: true,
        }
    }
}

impl ViewOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn paging(mut self, paging: bool) -> Self {
        self.paging = paging;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn resettable(mut self, resettable: bool) -> Self {
        self.resettable = resettable;
        self
    }

    /// Checks the options, rejecting a zero page size.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_page_size(self.page_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_defaults() {
        let options = ViewOptions::default();
        assert_eq!(options.page_size, 10);
        assert_eq!(options.page_size_options, vec![10, 20, 35, 50]);
        assert!(options.paging);
        assert!(options.searchable);
        assert!(options.resettable);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_page_size() {
        let options = ViewOptions::new().page_size(0);
        assert_eq!(options.validate(), Err(Error::invalid_page_size(0)));
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ViewOptions =
            serde_json::from_str(r#"{"pageSize": 35, "searchable": false}"#).unwrap();
        assert_eq!(options.page_size, 35);
        assert!(!options.searchable);
        assert!(options.paging);
        assert_eq!(options.page_size_options.len(), 4);

        let options: ViewOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ViewOptions::default());
    }
}
