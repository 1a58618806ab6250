use serde::{Deserialize, Serialize};

use super::MovieId;

/// One row of the movie catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieRecord {
    /// Display title. Not guaranteed unique across the catalog
    pub title: String,
    pub movie_id: MovieId,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, movie_id: impl Into<MovieId>) -> Self {
        Self {
            title: title.into(),
            movie_id: movie_id.into(),
        }
    }
}

/// A movie recommended for a query title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub title: String,
    pub movie_id: MovieId,
}

impl From<&MovieRecord> for Recommendation {
    fn from(record: &MovieRecord) -> Self {
        Self {
            title: record.title.clone(),
            movie_id: record.movie_id,
        }
    }
}

/// Ordered movie catalog. Row position addresses the similarity matrix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<MovieRecord>,
}

impl Catalog {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Row index of the first record whose title matches exactly
    ///
    /// Duplicate titles resolve to the earliest row.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.records.iter().position(|record| record.title == title)
    }

    /// Titles in catalog order
    pub fn titles(&self) -> Vec<String> {
        self.records.iter().map(|record| record.title.clone()).collect()
    }
}
