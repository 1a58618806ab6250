use serde::{Deserialize, Serialize};

/// Title shown when poster metadata could not be fetched
pub const NOT_FOUND_TITLE: &str = "Not Found";

/// Display metadata for a recommended movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Poster {
    pub title: String,
    /// Absolute poster image URL, empty when unavailable
    pub path: String,
}

impl Poster {
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }

    /// Placeholder used in place of an enrichment failure
    pub fn not_found() -> Self {
        Self::new(NOT_FOUND_TITLE, "")
    }

    pub fn is_not_found(&self) -> bool {
        self.title == NOT_FOUND_TITLE && self.path.is_empty()
    }
}
