// ABOUTME: Configuration module for the slidewire application
// ABOUTME: Provides startup constants and environment variable handling

use std::env;

/// Global configuration for the application
pub struct Config {
    /// Id of the element the presentation is mounted into
    pub container_id: String,
    /// Path or URL of the presentation markdown source
    pub source: String,
    /// Name of the syntax highlighting theme
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container_id: "container".to_string(),
            source: "presentation.md".to_string(),
            theme: "InspiredGitHub".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let container_id =
            env::var("CONTAINER_ID").unwrap_or_else(|_| "container".to_string());
        let source =
            env::var("PRESENTATION_URL").unwrap_or_else(|_| "presentation.md".to_string());
        let theme =
            env::var("HIGHLIGHT_THEME").unwrap_or_else(|_| "InspiredGitHub".to_string());

        Self {
            container_id,
            source,
            theme,
        }
    }

    /// Configuration pointing at a specific presentation source
    pub fn with_source(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Self::default()
        }
    }
}
