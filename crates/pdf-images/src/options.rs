use crate::constants::DEFAULT_TITLE;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output configuration for an images-to-PDF build
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImagesOptions {
    pub paper_size: PaperSize,
    pub orientation: Orientation,

    /// Written to the PDF info dictionary
    pub title: String,
}

impl Default for ImagesOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ImagesOptions {
    /// Page size with orientation applied
    pub fn page_size(&self) -> PageSize {
        self.paper_size.page_size(self.orientation)
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImagesError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImagesError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ImagesError::Config("Title must not be empty".to_string()));
        }

        self.page_size().validate()
    }
}
