//! Static site build command.

use std::path::PathBuf;

use anyhow::Result;
use electromania_site::{BuildConfig, StaticBuilder};

use crate::config::SiteConfig;

/// Run the build command.
pub async fn run(config: &SiteConfig, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let build_config = BuildConfig {
        public_dir: config.build.public_dir.clone(),
        output_dir: output.unwrap_or_else(|| config.build.output.clone()),
        minify: minify.unwrap_or(config.build.minify),
        base_url: config.build.base_url.clone(),
        site: config.site.clone(),
    };

    let result = StaticBuilder::new(build_config).build().await?;

    tracing::info!(
        "Built {} pages and copied {} files in {}ms",
        result.pages,
        result.files_copied,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn output_flag_overrides_config() {
        let temp = tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.build.public_dir = temp.path().join("public");
        config.build.output = temp.path().join("from-config");

        let output = temp.path().join("from-flag");
        run(&config, Some(output.clone()), Some(false)).await.unwrap();

        assert!(output.join("index.html").exists());
        assert!(!temp.path().join("from-config").exists());
    }
}
