//! Logo rasterization command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use electromania_logos::convert_logos;

use crate::config::SiteConfig;

/// Convert `logo192.svg` and `logo512.svg` in `dir` to PNG.
pub fn run(config: &SiteConfig, dir: Option<PathBuf>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| config.images_dir());
    tracing::info!("Converting logos in {}", dir.display());

    let written = convert_logos(&dir).context("Logo conversion failed")?;

    tracing::info!("Converted {} logos", written.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32"><rect width="32" height="32" fill="#FF6B6B"/></svg>"##;

    #[test]
    fn converts_logos_in_configured_public_dir() {
        let temp = tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.build.public_dir = temp.path().to_path_buf();
        let images = config.images_dir();
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("logo192.svg"), LOGO).unwrap();
        fs::write(images.join("logo512.svg"), LOGO).unwrap();

        run(&config, None).unwrap();

        assert!(images.join("logo192.png").exists());
        assert!(images.join("logo512.png").exists());
    }

    #[test]
    fn missing_logos_fail() {
        let temp = tempdir().unwrap();
        assert!(run(&SiteConfig::default(), Some(temp.path().to_path_buf())).is_err());
    }
}
