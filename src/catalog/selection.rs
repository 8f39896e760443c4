//! Selection model
//!
//! Holds the active category and active video id. This is pure state: the
//! model performs no side effects of its own. Mutations report whether the
//! active video changed so the owning context can react (load the new video,
//! re-render listings).

use crate::catalog::{Catalog, VideoRecord, CATEGORY_ALL};
use log::debug;

/// Active category and active video selection over a loaded catalog
#[derive(Debug, Clone)]
pub struct SelectionModel {
    catalog: Catalog,
    active_category: String,
    active_video_id: Option<String>,
}

impl SelectionModel {
    /// Create a selection over the given catalog
    ///
    /// The initial selection is the "All" category with the first catalog
    /// record active, or no active video for an empty catalog.
    pub fn new(catalog: Catalog) -> Self {
        let active_video_id = catalog.records().first().map(|record| record.id.clone());
        Self {
            catalog,
            active_category: CATEGORY_ALL.to_string(),
            active_video_id,
        }
    }

    /// The catalog this selection projects
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The active category label
    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    /// The active video id, if any
    pub fn active_video_id(&self) -> Option<&str> {
        self.active_video_id.as_deref()
    }

    /// The active video record, if any
    pub fn active_video(&self) -> Option<&VideoRecord> {
        self.active_video_id
            .as_deref()
            .and_then(|id| self.catalog.get(id))
    }

    /// Set the active category and re-derive the active video
    ///
    /// The active video becomes the first record of the new filtered list, or
    /// none when the list is empty. Unknown categories simply yield an empty
    /// list; there is no error condition.
    ///
    /// # Returns
    ///
    /// `true` when the active video changed.
    pub fn select_category(&mut self, category: &str) -> bool {
        self.active_category = category.to_string();

        let new_active = self
            .filtered_videos()
            .first()
            .map(|record| record.id.clone());

        let changed = new_active != self.active_video_id;
        if changed {
            debug!(
                "Category {:?} selected, active video now {:?}",
                category, new_active
            );
            self.active_video_id = new_active;
        }
        changed
    }

    /// Set the active video directly
    ///
    /// No-ops when the id is not in the catalog; internal callers only hand
    /// out ids taken from the listing, so an unknown id is defensive territory.
    ///
    /// # Returns
    ///
    /// `true` when the active video changed.
    pub fn select_video(&mut self, id: &str) -> bool {
        if self.catalog.get(id).is_none() {
            debug!("Ignoring selection of unknown video {:?}", id);
            return false;
        }

        if self.active_video_id.as_deref() == Some(id) {
            return false;
        }

        self.active_video_id = Some(id.to_string());
        true
    }

    /// The records of the active category, in catalog order
    ///
    /// The "All" sentinel matches every record.
    pub fn filtered_videos(&self) -> Vec<&VideoRecord> {
        self.catalog
            .records()
            .iter()
            .filter(|record| {
                self.active_category == CATEGORY_ALL || record.category == self.active_category
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;

    #[test]
    fn test_initial_selection() {
        let model = SelectionModel::new(sample_catalog());
        assert_eq!(model.active_category(), CATEGORY_ALL);
        assert_eq!(model.active_video_id(), Some("a"));
    }

    #[test]
    fn test_initial_selection_empty_catalog() {
        let model = SelectionModel::new(Catalog::default());
        assert_eq!(model.active_video_id(), None);
        assert!(model.filtered_videos().is_empty());
    }

    #[test]
    fn test_filtered_videos_respects_category() {
        let mut model = SelectionModel::new(sample_catalog());

        model.select_category("Songs");
        let ids: Vec<&str> = model.filtered_videos().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        model.select_category(CATEGORY_ALL);
        assert_eq!(model.filtered_videos().len(), 3);
    }

    #[test]
    fn test_select_category_picks_first_of_filtered() {
        let mut model = SelectionModel::new(sample_catalog());

        let changed = model.select_category("Stories");
        assert!(changed);
        assert_eq!(model.active_video_id(), Some("b"));

        let filtered: Vec<&str> = model.filtered_videos().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(filtered, vec!["b"]);
    }

    #[test]
    fn test_select_unknown_category_clears_active() {
        let mut model = SelectionModel::new(sample_catalog());

        let changed = model.select_category("Documentaries");
        assert!(changed);
        assert!(model.filtered_videos().is_empty());
        assert_eq!(model.active_video_id(), None);
    }

    #[test]
    fn test_select_video() {
        let mut model = SelectionModel::new(sample_catalog());

        assert!(model.select_video("c"));
        assert_eq!(model.active_video_id(), Some("c"));

        // Unknown ids are ignored
        assert!(!model.select_video("zzz"));
        assert_eq!(model.active_video_id(), Some("c"));

        // Re-selecting the active video is not a change
        assert!(!model.select_video("c"));
    }

    #[test]
    fn test_filtered_only_contains_active_category() {
        let mut model = SelectionModel::new(sample_catalog());
        for category in ["Songs", "Stories", "Songs", "All", "Stories"] {
            model.select_category(category);
            for record in model.filtered_videos() {
                assert!(category == CATEGORY_ALL || record.category == category);
            }
        }
    }
}
