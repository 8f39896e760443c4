//! Thumbnail URL resolution
//!
//! Listings show a max-resolution thumbnail per video. Not every video has
//! one; when the UI reports a load failure the resolver degrades that video
//! to the lower-resolution variant, which the platform guarantees to exist.

use std::collections::HashSet;

const MAXRES_VARIANT: &str = "maxresdefault";
const FALLBACK_VARIANT: &str = "hqdefault";

/// Resolves thumbnail asset URLs with per-video degradation
#[derive(Debug, Default)]
pub struct ThumbnailResolver {
    base_url: String,
    failed: HashSet<String>,
}

impl ThumbnailResolver {
    /// Create a resolver for the platform's thumbnail host
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            failed: HashSet::new(),
        }
    }

    /// The thumbnail URL to use for a video
    ///
    /// Max-resolution unless a failure was reported for this id.
    pub fn url_for(&self, video_id: &str) -> String {
        let variant = if self.failed.contains(video_id) {
            FALLBACK_VARIANT
        } else {
            MAXRES_VARIANT
        };
        format!("{}/{}/{}.jpg", self.base_url, video_id, variant)
    }

    /// Record that the max-resolution asset failed to load for a video
    ///
    /// Subsequent `url_for` calls for this id yield the fallback variant.
    pub fn report_failure(&mut self, video_id: &str) {
        self.failed.insert(video_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_prefers_maxres() {
        let resolver = ThumbnailResolver::new("https://img.example.com/vi");
        assert_eq!(
            resolver.url_for("abc"),
            "https://img.example.com/vi/abc/maxresdefault.jpg"
        );
    }

    #[test]
    fn test_failure_degrades_to_fallback() {
        let mut resolver = ThumbnailResolver::new("https://img.example.com/vi");
        resolver.report_failure("abc");

        assert_eq!(
            resolver.url_for("abc"),
            "https://img.example.com/vi/abc/hqdefault.jpg"
        );
        // Other videos are unaffected
        assert_eq!(
            resolver.url_for("def"),
            "https://img.example.com/vi/def/maxresdefault.jpg"
        );
    }
}
