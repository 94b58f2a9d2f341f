//! # Configuration Utilities
//!
//! TOML configuration for the web server. Every section has defaults, so an
//! empty file (or no file at all) is a valid configuration.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::processing::preview::DEFAULT_PREVIEW_SIDE;
use crate::processing::MAX_IMAGE_BYTES;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: WebServerConfig = load_config("config/web_server.toml")?;
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Complete web server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebServerConfig {
    pub server: ServerInfo,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

/// Where to listen and what to serve besides the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerInfo {
    /// Socket address to bind (e.g., "127.0.0.1:3000")
    pub address: String,
    /// Directory with a static front-end, served at `/` when set
    pub static_dir: Option<String>,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
            static_dir: None,
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest accepted image upload in bytes
    pub max_image_bytes: usize,
    /// Side of the pixel matrix preview
    pub preview_side: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: MAX_IMAGE_BYTES,
            preview_side: DEFAULT_PREVIEW_SIDE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of off, error, warn, info, debug, trace
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
address = "0.0.0.0:8080"
static_dir = "frontend/build"

[limits]
max_image_bytes = 1024
preview_side = 3

[logging]
level = "debug"
"#
        )
        .unwrap();

        let config: WebServerConfig = load_config(file.path()).unwrap();
        assert_eq!(config.server.address, "0.0.0.0:8080");
        assert_eq!(config.server.static_dir.as_deref(), Some("frontend/build"));
        assert_eq!(config.limits.max_image_bytes, 1024);
        assert_eq!(config.limits.preview_side, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        let config: WebServerConfig = load_config(file.path()).unwrap();
        assert_eq!(config.server.address, "127.0.0.1:3000");
        assert!(config.server.static_dir.is_none());
        assert_eq!(config.limits.max_image_bytes, 5 * 1024 * 1024);
        assert_eq!(config.limits.preview_side, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config::<WebServerConfig>("does/not/exist.toml").is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[limits]\nmax_image_bytes = \"lots\"").unwrap();
        assert!(load_config::<WebServerConfig>(file.path()).is_err());
    }
}
