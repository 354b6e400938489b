//! Server command without live reload.

use anyhow::Result;
use electromania_server::{ServerConfig, SiteServer};

use crate::config::SiteConfig;

/// Run the serve command.
pub async fn run(config: &SiteConfig, port: Option<u16>, host: Option<String>) -> Result<()> {
    if !config.build.public_dir.exists() {
        tracing::warn!(
            "Public directory not found: {}. Images will 404.",
            config.build.public_dir.display()
        );
    }

    let server_config = ServerConfig {
        host: host.unwrap_or_else(|| config.server.host.clone()),
        port: port.unwrap_or(config.server.port),
        public_dir: config.build.public_dir.clone(),
        site: config.site.clone(),
        ..Default::default()
    };

    SiteServer::new(server_config).start().await?;

    Ok(())
}
