//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::assets::AssetPipeline;
use crate::content::{Page, SiteInfo};
use crate::render::SiteRenderer;

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Public files copied verbatim (images, fonts)
    pub public_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Company details
    pub site: SiteInfo,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            site: SiteInfo::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of public files copied
    pub files_copied: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    renderer: SiteRenderer,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let renderer = SiteRenderer::new(config.site.clone(), config.base_url.clone());
        Self { config, renderer }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages: Vec<Page> = Page::ROUTED.into_iter().chain([Page::NotFound]).collect();

        let results: Vec<Result<(), BuildError>> =
            pages.par_iter().map(|&page| self.build_page(page)).collect();
        for result in results {
            result?;
        }

        self.generate_assets()?;
        let files_copied = self.copy_public()?;
        self.generate_sitemap()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            files_copied,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Render a single page in its default state.
    fn build_page(&self, page: Page) -> Result<(), BuildError> {
        let html = self
            .renderer
            .render_default(page)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        let output_path = self.config.output_dir.join(page.output_file());
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }
        fs::write(&output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!("Rendered {}", output_path.display());
        Ok(())
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Skipping CSS minification: {}", e);
                css
            })
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Copy the public directory into the output, keeping its layout.
    fn copy_public(&self) -> Result<usize, BuildError> {
        let public_dir = &self.config.public_dir;
        if !public_dir.exists() {
            tracing::warn!("Public directory not found: {}", public_dir.display());
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(public_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(public_dir).unwrap_or(path);
            let target = self.config.output_dir.join(relative);
            copy_file(path, &target)?;
            copied += 1;
        }

        tracing::info!("Copied {} public files", copied);
        Ok(copied)
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self) -> Result<(), BuildError> {
        let base = self.config.base_url.trim_end_matches('/');
        let urls: Vec<String> = Page::ROUTED
            .iter()
            .map(|page| format!("  <url>\n    <loc>{}{}</loc>\n  </url>", base, page.path()))
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!("User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml", base);
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

fn copy_file(source: &Path, target: &Path) -> Result<(), BuildError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }
    fs::copy(source, target).map_err(|e| BuildError::ReadError {
        path: source.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn config(root: &Path) -> BuildConfig {
        BuildConfig {
            public_dir: root.join("public"),
            output_dir: root.join("dist"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn writes_every_page_and_asset() {
        let temp = tempdir().unwrap();
        let builder = StaticBuilder::new(config(temp.path()));

        let result = builder.build().await.unwrap();

        assert_eq!(result.pages, 4);
        let out = temp.path().join("dist");
        for file in [
            "index.html",
            "about/index.html",
            "contact/index.html",
            "404.html",
            "assets/main.css",
            "assets/main.js",
            "sitemap.xml",
            "robots.txt",
        ] {
            assert!(out.join(file).exists(), "missing {file}");
        }
    }

    #[tokio::test]
    async fn copies_public_directory() {
        let temp = tempdir().unwrap();
        let images = temp.path().join("public").join("images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("logo192.svg"), "<svg/>").unwrap();
        fs::write(temp.path().join("public").join("favicon.ico"), [0u8; 4]).unwrap();

        let result = StaticBuilder::new(config(temp.path()))
            .build()
            .await
            .unwrap();

        assert_eq!(result.files_copied, 2);
        let copied = fs::read_to_string(temp.path().join("dist/images/logo192.svg")).unwrap();
        assert_eq!(copied, "<svg/>");
    }

    #[tokio::test]
    async fn sitemap_lists_routed_pages() {
        let temp = tempdir().unwrap();
        let builder = StaticBuilder::new(BuildConfig {
            base_url: "https://electromania.llc/".to_string(),
            ..config(temp.path())
        });

        builder.build().await.unwrap();

        let out = temp.path().join("dist");
        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://electromania.llc/about</loc>"));
        assert!(!sitemap.contains("/404"));

        let robots = fs::read_to_string(out.join("robots.txt")).unwrap();
        assert!(robots.ends_with("Sitemap: https://electromania.llc/sitemap.xml"));
    }

    #[tokio::test]
    async fn minify_can_be_disabled() {
        let temp = tempdir().unwrap();
        StaticBuilder::new(BuildConfig {
            minify: false,
            ..config(temp.path())
        })
        .build()
        .await
        .unwrap();

        let css = fs::read_to_string(temp.path().join("dist/assets/main.css")).unwrap();
        assert_eq!(css, AssetPipeline::generate_css());
    }

    #[tokio::test]
    async fn pages_render_in_default_state() {
        let temp = tempdir().unwrap();
        StaticBuilder::new(config(temp.path()))
            .build()
            .await
            .unwrap();

        let html = fs::read_to_string(temp.path().join("dist/contact/index.html")).unwrap();
        assert!(html.contains(r#"aria-expanded="false""#));
        assert!(!html.contains("alert-success"));
        assert!(!html.contains("__reload.js"));
    }
}
