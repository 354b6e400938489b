//! Initialize a site directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Run the init command next to `config_path`.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing Electromania site...");

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let written = scaffold(root, config_path, yes)?;

    if written.is_empty() {
        tracing::warn!("Nothing written; files already exist. Use --yes to overwrite.");
        return Ok(());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'electromania logos' to render the PNG icons, then 'electromania dev'.");

    Ok(())
}

/// Write the config and placeholder logos, skipping existing files unless `overwrite`.
fn scaffold(root: &Path, config_path: &Path, overwrite: bool) -> Result<Vec<PathBuf>> {
    let images_dir = root.join("public").join("images");
    fs::create_dir_all(&images_dir).context("Failed to create public/images directory")?;

    let files = [
        (config_path.to_path_buf(), DEFAULT_CONFIG),
        (images_dir.join("logo192.svg"), DEFAULT_LOGO),
        (images_dir.join("logo512.svg"), DEFAULT_LOGO),
    ];

    let mut written = Vec::new();
    for (path, content) in files {
        if path.exists() && !overwrite {
            tracing::debug!("Keeping existing {}", path.display());
            continue;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
        written.push(path);
    }

    Ok(written)
}

const DEFAULT_CONFIG: &str = r#"# Electromania site configuration

[site]
title = "Electromania"
email = "info@electromania.llc"
phone = "+1 786 213 5996"
website = "electromania.llc"
year = 2024

[server]
host = "127.0.0.1"
port = 3000

[build]
# Relative paths resolve against this file's directory.
# Copied verbatim into the build; logos live in images/
public_dir = "public"
output = "dist"
minify = true
base_url = "/"
"#;

const DEFAULT_LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="512" height="512" viewBox="0 0 512 512">
  <defs>
    <linearGradient id="brand" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0" stop-color="#FF6B6B"/>
      <stop offset="1" stop-color="#4ECDC4"/>
    </linearGradient>
  </defs>
  <rect width="512" height="512" rx="96" fill="url(#brand)"/>
  <path d="M176 144h176v48H232v40h104v48H232v40h120v48H176z" fill="#FFFFFF"/>
</svg>
"##;
