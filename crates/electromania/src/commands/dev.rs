//! Development server command.

use std::path::Path;

use anyhow::Result;
use electromania_server::{ServerConfig, SiteServer};

use crate::config::SiteConfig;

/// Run the dev server with live reload.
pub async fn run(config: &SiteConfig, config_path: &Path, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port,
        public_dir: config.build.public_dir.clone(),
        site: config.site.clone(),
        live_reload: true,
        watch: vec![config_path.to_path_buf()],
        open,
    };

    SiteServer::new(server_config).start().await?;

    Ok(())
}
