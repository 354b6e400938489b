//! `site.toml` loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use electromania_site::SiteInfo;

/// Configuration file structure (site.toml).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteInfo,
    pub server: ServerSettings,
    pub build: BuildSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Files copied verbatim into the build; logos live in `images/`
    pub public_dir: PathBuf,
    pub output: PathBuf,
    pub minify: bool,
    pub base_url: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            output: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    ///
    /// Relative build paths are resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config: SiteConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            tracing::info!("Loaded config from {}", path.display());
            config
        } else {
            tracing::debug!("No {} found, using defaults", path.display());
            Self::default()
        };

        if let Some(root) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.build.public_dir = root.join(&config.build.public_dir);
            config.build.output = root.join(&config.build.output);
        }

        Ok(config)
    }

    /// Directory holding the logo SVGs.
    pub fn images_dir(&self) -> PathBuf {
        self.build.public_dir.join("images")
    }
}
