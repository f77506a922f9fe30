//! Configuration file structure (storefront.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use storefront_cms::DEFAULT_ENDPOINT;
use storefront_static::{
    BuildConfig, MapConfig, MapOptions, Marker, MarkerIcons, DEFAULT_IMAGE_BASE_URL,
};

use crate::SourceArgs;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub cms: CmsSection,
    #[serde(default)]
    pub images: ImagesSection,
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub build: BuildSettings,
    pub map: Option<MapSection>,
}

#[derive(Debug, Deserialize)]
pub struct CmsSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

#[derive(Debug, Deserialize)]
pub struct ImagesSection {
    #[serde(default = "default_image_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

#[derive(Debug, Deserialize)]
pub struct MapSection {
    #[serde(flatten)]
    pub options: MapOptions,
    #[serde(default)]
    pub icons: MarkerIcons,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}
fn default_title() -> String {
    "Store".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_locales() -> Vec<String> {
    vec!["en".to_string(), "fr".to_string()]
}
fn default_locale() -> String {
    "en".to_string()
}
fn default_minify() -> bool {
    true
}
fn default_concurrency() -> usize {
    4
}

impl Default for CmsSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
        }
    }
}

impl Default for ImagesSection {
    fn default() -> Self {
        Self {
            base_url: default_image_base_url(),
        }
    }
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            output: default_output(),
            base_url: default_base_url(),
            locales: default_locales(),
            default_locale: default_locale(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
            concurrency: default_concurrency(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(ConfigFile::default())
}

impl ConfigFile {
    /// The GraphQL endpoint, with the command line taking precedence.
    pub fn endpoint(&self, source: &SourceArgs) -> String {
        source
            .endpoint
            .clone()
            .unwrap_or_else(|| self.cms.endpoint.clone())
    }

    /// Merge file settings with command line overrides.
    pub fn build_config(
        self,
        output: Option<PathBuf>,
        no_minify: bool,
        source: &SourceArgs,
    ) -> BuildConfig {
        let locales = if source.locales.is_empty() {
            self.site.locales
        } else {
            source.locales.clone()
        };

        BuildConfig {
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.site.output)),
            base_url: self.site.base_url,
            title: self.site.title,
            locales,
            default_locale: self.site.default_locale,
            image_base_url: self.images.base_url,
            minify: self.build.minify && !no_minify,
            concurrency: self.build.concurrency.max(1),
            map: self.map.map(|m| MapConfig {
                options: m.options,
                icons: m.icons,
                markers: m.markers,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("storefront.toml")).unwrap();

        assert_eq!(config.cms.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.site.locales, vec!["en", "fr"]);
        assert!(config.build.minify);
        assert!(config.map.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("storefront.toml");
        fs::write(&path, "[site\ntitle = ").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("storefront.toml");
        fs::write(&path, "[site]\ntitle = \"Shop\"\n\n[build]\nconcurrency = 8\n").unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.site.title, "Shop");
        assert_eq!(config.site.output, "dist");
        assert_eq!(config.build.concurrency, 8);
        assert!(config.build.minify);
    }

    #[test]
    fn parses_map_section() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("storefront.toml");
        fs::write(
            &path,
            r#"
[map]
zoom = 9
class_name = "stores"

[map.icons]
icon_url = "/assets/pin.png"

[[map.markers]]
name = "Flagship"
lat = 1.5
lng = 2.5
"#,
        )
        .unwrap();

        let map = load_config(&path).unwrap().map.unwrap();

        assert_eq!(map.options.zoom, 9);
        assert_eq!(map.options.class_name.as_deref(), Some("stores"));
        assert_eq!(map.icons.icon_url, "/assets/pin.png");
        assert!(map.icons.shadow_url.ends_with("marker-shadow.png"));
        assert_eq!(map.markers.len(), 1);
    }

    #[test]
    fn command_line_overrides_file() {
        let config = ConfigFile::default();
        let source = SourceArgs {
            endpoint: Some("http://localhost:4000/graphql".to_string()),
            locales: vec!["de".to_string()],
        };

        assert_eq!(config.endpoint(&source), "http://localhost:4000/graphql");

        let build = config.build_config(Some(PathBuf::from("out")), true, &source);

        assert_eq!(build.output_dir, PathBuf::from("out"));
        assert_eq!(build.locales, vec!["de"]);
        assert!(!build.minify);
    }

    #[test]
    fn file_values_apply_without_overrides() {
        let config = ConfigFile::default();
        let source = SourceArgs::default();

        assert_eq!(config.endpoint(&source), DEFAULT_ENDPOINT);

        let build = config.build_config(None, false, &source);

        assert_eq!(build.output_dir, PathBuf::from("dist"));
        assert_eq!(build.locales, vec!["en", "fr"]);
        assert_eq!(build.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert!(build.minify);
    }
}
