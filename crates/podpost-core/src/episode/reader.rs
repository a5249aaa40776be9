use super::types::EpisodeMetadata;
use crate::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct EpisodeReader;

impl EpisodeReader {
    /// Read and parse episode metadata from the given path
    pub fn from_file(path: &Path) -> Result<EpisodeMetadata> {
        tracing::debug!("Reading episode metadata from: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let metadata: EpisodeMetadata = serde_json::from_reader(reader)?;

        tracing::info!("Loaded episode metadata for '{}'", metadata.title);

        Ok(metadata)
    }

    /// Parse episode metadata from a JSON string
    pub fn from_str(content: &str) -> Result<EpisodeMetadata> {
        tracing::debug!("Parsing episode metadata from string");

        let metadata: EpisodeMetadata = serde_json::from_str(content)?;
        Ok(metadata)
    }

    /// Check the record carries what the console requires
    pub fn validate(metadata: &EpisodeMetadata) -> Result<()> {
        if metadata.title.trim().is_empty() {
            return Err(Error::InvalidEpisode("Episode title is empty".to_string()));
        }

        if let Some(url) = &metadata.url {
            url::Url::parse(url).map_err(|e| {
                Error::InvalidEpisode(format!("Invalid source URL '{}': {}", url, e))
            })?;
        }

        if metadata.description.is_empty() {
            tracing::warn!("Episode description is empty");
        }

        Ok(())
    }
}
