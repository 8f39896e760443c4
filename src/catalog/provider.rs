//! Catalog providers
//!
//! A catalog provider fetches the ordered list of video records exactly once
//! at startup. The HTTP provider talks to the static catalog endpoint; the
//! file provider reads the same JSON payload from disk, which is convenient
//! for local development and testing.

use crate::catalog::{Catalog, VideoRecord};
use crate::utils::config::CatalogConfig;
use crate::utils::error::{IntoKidTubeError, KidTubeError, Result};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Catalog provider trait
///
/// Implementations are read-only collaborators; a fetch either yields the
/// full catalog or a catalog error. There is no retry logic here; a failed
/// fetch is surfaced to the user as an error state, not retried silently.
pub trait CatalogProvider {
    /// Fetch the complete catalog
    fn fetch(&self) -> Result<Catalog>;
}

/// Catalog provider backed by the static HTTP endpoint
pub struct HttpCatalogProvider {
    url: String,
    agent: ureq::Agent,
}

impl HttpCatalogProvider {
    /// Create a provider for the configured catalog endpoint
    pub fn new(config: &CatalogConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.request_timeout_secs)))
            .timeout_connect(Some(Duration::from_secs(config.connect_timeout_secs)))
            .build()
            .new_agent();

        Self {
            url: config.url.clone(),
            agent,
        }
    }
}

impl CatalogProvider for HttpCatalogProvider {
    fn fetch(&self) -> Result<Catalog> {
        info!("Fetching catalog from {}", self.url);

        let mut response = self
            .agent
            .get(&self.url)
            // The endpoint serves with Cache-Control: no-store; ask for the
            // same on the request side so intermediaries stay out of the way.
            .header("Cache-Control", "no-store")
            .call()
            .catalog_err("Request failed")?;

        if response.status() != 200 {
            return Err(KidTubeError::Catalog(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body = response
            .body_mut()
            .read_to_string()
            .catalog_err("Read failed")?;

        let records: Vec<VideoRecord> = serde_json::from_str(&body)?;
        info!("Catalog loaded: {} videos", records.len());

        Ok(Catalog::new(records))
    }
}

/// Catalog provider backed by a local JSON file
pub struct FileCatalogProvider {
    path: PathBuf,
}

impl FileCatalogProvider {
    /// Create a provider reading from the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogProvider for FileCatalogProvider {
    fn fetch(&self) -> Result<Catalog> {
        info!("Reading catalog from {:?}", self.path);

        let body = std::fs::read_to_string(&self.path)
            .map_err(|e| KidTubeError::Catalog(format!("Failed to read {:?}: {}", self.path, e)))?;

        let records: Vec<VideoRecord> = serde_json::from_str(&body)?;
        info!("Catalog loaded: {} videos", records.len());

        Ok(Catalog::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_provider_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videos.json");
        std::fs::write(
            &path,
            r#"[{"id":"a","title":"T1","category":"Songs"},
               {"id":"b","title":"T2","category":"Stories"}]"#,
        )
        .unwrap();

        let provider = FileCatalogProvider::new(&path);
        let catalog = provider.fetch().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].id, "a");
        assert_eq!(catalog.records()[1].category, "Stories");
    }

    #[test]
    fn test_file_provider_missing_file() {
        let provider = FileCatalogProvider::new("/nonexistent/videos.json");
        assert!(matches!(provider.fetch(), Err(KidTubeError::Catalog(_))));
    }

    #[test]
    fn test_file_provider_malformed_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videos.json");
        std::fs::write(&path, "not json").unwrap();

        let provider = FileCatalogProvider::new(&path);
        assert!(matches!(provider.fetch(), Err(KidTubeError::Catalog(_))));
    }
}
