//! Catalog module for KidTube
//!
//! The catalog is the static, read-only list of playable video records. It is
//! fetched once at startup from a catalog provider and never mutated
//! afterwards; every other component holds read-only views into it.

mod provider;
mod selection;
mod thumbs;

pub use provider::{CatalogProvider, FileCatalogProvider, HttpCatalogProvider};
pub use selection::SelectionModel;
pub use thumbs::ThumbnailResolver;

use serde::{Deserialize, Serialize};

/// Sentinel category that matches every record
pub const CATEGORY_ALL: &str = "All";

/// A single playable video entry
///
/// The `id` is the stable external identifier understood by the embedded
/// player (e.g. a platform video id). Records are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Stable external identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Category label used for filtering
    pub category: String,
}

/// The loaded catalog of video records
///
/// Order matches the order of the source payload and is preserved everywhere;
/// listings are never re-sorted.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<VideoRecord>,
}

impl Catalog {
    /// Create a catalog from an ordered list of records
    pub fn new(records: Vec<VideoRecord>) -> Self {
        Self { records }
    }

    /// All records in catalog order
    pub fn records(&self) -> &[VideoRecord] {
        &self.records
    }

    /// Number of records in the catalog
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by its id
    pub fn get(&self, id: &str) -> Option<&VideoRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Distinct categories, with the "All" sentinel first
    ///
    /// Categories appear in the order they first occur in the catalog.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![CATEGORY_ALL.to_string()];
        for record in &self.records {
            if !categories.contains(&record.category) {
                categories.push(record.category.clone());
            }
        }
        categories
    }

    /// Number of records in the given category
    ///
    /// The "All" sentinel counts every record.
    pub fn category_count(&self, category: &str) -> usize {
        if category == CATEGORY_ALL {
            self.records.len()
        } else {
            self.records
                .iter()
                .filter(|record| record.category == category)
                .count()
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        VideoRecord {
            id: "a".to_string(),
            title: "T1".to_string(),
            category: "Songs".to_string(),
        },
        VideoRecord {
            id: "b".to_string(),
            title: "T2".to_string(),
            category: "Stories".to_string(),
        },
        VideoRecord {
            id: "c".to_string(),
            title: "T3".to_string(),
            category: "Songs".to_string(),
        },
    ])
}
