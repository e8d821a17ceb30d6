//! Application configuration.
//!
//! Values are layered: built-in defaults, then `config.toml` under the
//! user's config directory, then `DEALSHELF_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::FetchRequest;

/// Directory under the platform config dir holding our files.
pub const CONFIG_DIR: &str = "dealshelf";
/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";
/// Prefix for environment overrides, e.g. `DEALSHELF_PAGE_SIZE`.
pub const ENV_PREFIX: &str = "DEALSHELF";

const DEFAULT_CONFIG: &str = r#"# dealshelf configuration

# Base URL of the deals API.
api_base_url = "https://www.cheapshark.com/api/1.0"

# Store whose deals are listed on startup (1 = Steam).
deals_store_id = "1"

# Number of deals requested from the feed.
deals_page_size = 60

# Maximum number of title-search results.
search_limit = 60

# Games revealed per "load more".
page_size = 12
"#;

/// Runtime settings for the API client and catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the deals API, without trailing slash.
    pub api_base_url: String,
    /// Store id used for the deals feed.
    pub deals_store_id: String,
    /// Page size requested from the deals feed.
    pub deals_page_size: u32,
    /// Result limit for title searches.
    pub search_limit: u32,
    /// Number of games revealed per page.
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.cheapshark.com/api/1.0".to_string(),
            deals_store_id: "1".to_string(),
            deals_page_size: 60,
            search_limit: 60,
            page_size: 12,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path and the environment.
    pub fn load() -> Result<Self> {
        Self::build(config_path().as_deref())
    }

    /// Load configuration from a specific file (which may be missing).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(Some(path.as_ref()))
    }

    fn build(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("failed to read configuration")?;
        let config: AppConfig = settings
            .try_deserialize()
            .context("failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.api_base_url.trim().is_empty() {
            bail!("api_base_url must not be empty");
        }
        Ok(())
    }

    /// Request for the storewide deals feed.
    pub fn deals_request(&self) -> FetchRequest {
        FetchRequest::Deals {
            store_id: self.deals_store_id.clone(),
            page_size: self.deals_page_size,
        }
    }

    /// Request for a title search.
    pub fn search_request(&self, title: impl Into<String>) -> FetchRequest {
        FetchRequest::Search {
            title: title.into(),
            limit: self.search_limit,
        }
    }
}

/// Default location of the configuration file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Write a commented default configuration file if none exists yet.
pub fn ensure_default_config() -> Result<Option<PathBuf>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };
    write_default_config(&path)?;
    Ok(Some(path))
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn default_template_matches_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);
        write_default_config(&path)?;
        assert!(path.exists());
        assert_eq!(AppConfig::load_from(&path)?, AppConfig::default());
        Ok(())
    }

    #[test]
    fn existing_file_is_not_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "page_size = 24\n")?;
        write_default_config(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "page_size = 24\n");
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "page_size = 24\ndeals_store_id = \"7\"\n")?;
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.page_size, 24);
        assert_eq!(config.deals_store_id, "7");
        assert_eq!(config.search_limit, 60);
        assert_eq!(
            config.deals_request(),
            FetchRequest::Deals {
                store_id: "7".to_string(),
                page_size: 60
            }
        );
        Ok(())
    }

    #[test]
    fn rejects_zero_page_size() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "page_size = 0\n")?;
        assert!(AppConfig::load_from(&path).is_err());
        Ok(())
    }
}
