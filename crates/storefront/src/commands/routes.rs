//! Route listing command.

use std::path::Path;

use anyhow::{Context, Result};
use storefront_cms::CmsClient;
use storefront_static::StaticBuilder;

use crate::config::load_config;
use crate::SourceArgs;

/// Print every route a build would render, one URL path per line.
pub async fn run(config_path: &Path, source: &SourceArgs) -> Result<()> {
    let file_config = load_config(config_path)?;
    let endpoint = file_config.endpoint(source);
    let config = file_config.build_config(None, false, source);

    let builder = StaticBuilder::new(config, || CmsClient::new(&endpoint));
    let paths = builder
        .enumerate()
        .await
        .context("Failed to enumerate routes")?;

    for route in &paths.paths {
        println!("{}", route.url_path());
    }

    tracing::info!("{} routes, fallback: {}", paths.paths.len(), paths.fallback);

    Ok(())
}
