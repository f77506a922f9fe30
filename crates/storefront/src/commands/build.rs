//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use storefront_cms::CmsClient;
use storefront_static::StaticBuilder;

use crate::config::load_config;
use crate::SourceArgs;

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    no_minify: bool,
    source: &SourceArgs,
) -> Result<()> {
    tracing::info!("Building catalog site...");

    let file_config = load_config(config_path)?;
    let endpoint = file_config.endpoint(source);
    let config = file_config.build_config(output, no_minify, source);

    tracing::info!("Content source: {}", endpoint);

    let builder = StaticBuilder::new(config, || CmsClient::new(&endpoint));
    let result = builder.build().await.context("Build failed")?;

    tracing::info!(
        "Built {} pages for {} routes with {} products in {}ms",
        result.pages,
        result.routes,
        result.products,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
