//! Initialize a storefront project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'storefront build' to generate the site.");

    Ok(())
}

pub const DEFAULT_CONFIG: &str = r#"# Storefront Configuration

[cms]
# GraphQL endpoint of the content source
endpoint = "https://api-eu-central-1.graphcms.com/v2/cl23dwaya5cng01z49zwjhdtm/master"

[images]
# Image CDN delivery base URL
base_url = "https://res.cloudinary.com/storefront/image/upload"

[site]
# Site title
title = "Space Jelly Store"

# Output directory for built site
output = "dist"

# Base URL (for deployment)
base_url = "/"

# Every category is rendered once unlocalized and once per locale
locales = ["en", "fr"]
default_locale = "en"

[build]
# Enable minification
minify = true

# Category pages fetched at once
concurrency = 4

# Uncomment to render a store locations page
# [map]
# center = [38.907132, -77.036546]
# zoom = 12
#
# [[map.markers]]
# name = "Flagship"
# lat = 38.907132
# lng = -77.036546
"#;
