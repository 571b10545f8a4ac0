// ABOUTME: Presentation source handling for the slidewire application
// ABOUTME: Loads the markdown deck from a local path or a remote URL

use crate::errors::{Result, WireError};
use log::info;
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// The presentation source, either a local file path or a remote URL.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub is_remote: bool,
}

impl SourceFile {
    /// Create a new SourceFile from a path string.
    /// The path can be either a local file path or a URL.
    pub fn new(path: &str) -> Self {
        let is_remote = path.starts_with("http://") || path.starts_with("https://");
        Self {
            path: path.to_string(),
            is_remote,
        }
    }

    /// Get the markdown content of the source.
    /// Remote sources are fetched over HTTP, local ones read from disk.
    pub fn content(&self) -> Result<String> {
        if self.is_remote {
            self.fetch_remote_content()
        } else {
            self.read_local_content()
        }
    }

    /// Fetch content from a remote URL with retry capability
    fn fetch_remote_content(&self) -> Result<String> {
        info!("Fetching remote presentation source: {}", self.path);

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(WireError::FetchError)?;

        // Try up to 3 times with increasing backoff
        let mut retry_delay = 1000;
        let mut last_error = None;

        for attempt in 1..=3 {
            match client.get(&self.path).send() {
                Ok(response) => {
                    if response.status().is_success() {
                        return response.text().map_err(WireError::FetchError);
                    } else {
                        let status = response.status();
                        last_error =
                            Some(WireError::ValidationError(format!("HTTP error: {}", status)));
                    }
                }
                Err(e) => {
                    last_error = Some(WireError::FetchError(e));
                }
            }

            // No backoff after the final attempt; the error returns right away
            if attempt < 3 {
                info!(
                    "Fetch attempt {} failed, retrying in {} ms",
                    attempt, retry_delay
                );
                std::thread::sleep(Duration::from_millis(retry_delay));
                retry_delay *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            WireError::ValidationError("Unknown error fetching presentation source".to_string())
        }))
    }

    /// Read content from a local file
    fn read_local_content(&self) -> Result<String> {
        info!("Reading local presentation source: {}", self.path);
        if !Path::new(&self.path).exists() {
            return Err(WireError::PathNotFoundError(
                Path::new(&self.path).to_path_buf(),
            ));
        }

        fs::read_to_string(&self.path).map_err(WireError::FileReadError)
    }
}
