//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use tabkeep_navigation::DEFAULT_SEARCH_TEMPLATE;

/// Overrides the profile directory
pub const DATA_DIR_ENV: &str = "TABKEEP_DATA_DIR";

pub const DEFAULT_HOMEPAGE: &str = "https://google.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Default download directory
    pub download_dir: PathBuf,
    /// Search engine URL template
    pub search_engine: String,
    /// Homepage URL
    pub homepage: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let download_dir = dirs::download_dir().unwrap_or_else(|| data_dir.join("Downloads"));

        Self {
            database_path: data_dir.join("tabkeep.db"),
            download_dir,
            search_engine: DEFAULT_SEARCH_TEMPLATE.to_string(),
            homepage: DEFAULT_HOMEPAGE.to_string(),
        }
    }

    pub fn data_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }

        dirs::data_local_dir()
            .map(|d| d.join("tabkeep"))
            .unwrap_or_else(|| PathBuf::from(".tabkeep"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_data_dir() {
        let config = Config::new(PathBuf::from("/profiles/alice"));
        assert_eq!(config.database_path, PathBuf::from("/profiles/alice/tabkeep.db"));
        assert_eq!(config.homepage, "https://google.com");
        assert!(config.search_engine.contains("%s"));
    }

    #[test]
    fn test_download_dir_from_platform() {
        let config = Config::new(PathBuf::from("/profiles/alice"));
        let expected =
            dirs::download_dir().unwrap_or_else(|| PathBuf::from("/profiles/alice/Downloads"));
        assert_eq!(config.download_dir, expected);
    }
}
