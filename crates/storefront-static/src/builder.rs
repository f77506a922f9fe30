//! Static site builder.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use futures::stream::{self, StreamExt, TryStreamExt};
use rayon::prelude::*;

use storefront_cms::{CmsError, ContentSource};

use crate::assets::AssetPipeline;
use crate::images::{ImageUrlBuilder, DEFAULT_IMAGE_BASE_URL};
use crate::map::{MapOptions, MapWidget, Marker, MarkerIcons};
use crate::page::{build_category_page, CategoryPage};
use crate::paths::{enumerate_paths, Route, StaticPaths};
use crate::templates::{SiteContext, TemplateEngine};

/// Configuration for building the catalog site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Locales every category is rendered under, in addition to the
    /// unlocalized route
    pub locales: Vec<String>,

    /// `lang` of unlocalized pages
    pub default_locale: String,

    /// Image CDN delivery base URL
    pub image_base_url: String,

    /// Minify CSS output
    pub minify: bool,

    /// Category pages fetched at once
    pub concurrency: usize,

    /// Store locations page, rendered only when set
    pub map: Option<MapConfig>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            base_url: "/".to_string(),
            title: "Store".to_string(),
            locales: vec!["en".to_string(), "fr".to_string()],
            default_locale: "en".to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            minify: true,
            concurrency: 4,
            map: None,
        }
    }
}

/// Store locations map settings.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    pub options: MapOptions,
    pub icons: MarkerIcons,
    pub markers: Vec<Marker>,
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of routes enumerated
    pub routes: usize,

    /// Number of HTML pages written, including the 404 and locations pages
    pub pages: usize,

    /// Number of product entries rendered across all category pages
    pub products: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build. Any of them aborts the build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Cms(#[from] CmsError),

    #[error("Route {0} cannot be written inside the output directory")]
    UnsafeRoute(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Conflicting output paths: {0}")]
    OutputConflict(String),
}

/// Static site builder.
///
/// `connect` opens a fresh content source client. It is called once for
/// route enumeration and once per page, so no build step shares a client
/// with another.
pub struct StaticBuilder<C> {
    config: BuildConfig,
    connect: C,
    images: ImageUrlBuilder,
    templates: TemplateEngine,
}

impl<C, S> StaticBuilder<C>
where
    C: Fn() -> Result<S, CmsError> + Sync,
    S: ContentSource,
{
    /// Create a new static builder.
    pub fn new(mut config: BuildConfig, connect: C) -> Self {
        if !config.base_url.ends_with('/') {
            config.base_url.push('/');
        }

        Self {
            images: ImageUrlBuilder::new(&config.image_base_url),
            config,
            connect,
            templates: TemplateEngine::new(),
        }
    }

    /// Enumerate every route the build renders.
    pub async fn enumerate(&self) -> Result<StaticPaths, BuildError> {
        let source = (self.connect)()?;
        let paths = enumerate_paths(&source, &self.config.locales).await?;
        Ok(paths)
    }

    /// Build the static site.
    ///
    /// Every page is fetched and every output file rendered before anything
    /// is written, so a failed query, a template error or two outputs
    /// claiming the same path leave the output directory untouched.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let paths = self.enumerate().await?;
        tracing::info!("Enumerated {} routes", paths.paths.len());

        if let Some(route) = paths.paths.iter().find(|r| !r.is_writable()) {
            return Err(BuildError::UnsafeRoute(route.url_path()));
        }

        let pages = self.fetch_pages(&paths.paths).await?;

        // Render pages in parallel
        let rendered: Vec<Result<OutputFile, BuildError>> = paths
            .paths
            .par_iter()
            .zip(pages.par_iter())
            .map(|(route, page)| self.render_page(route, page))
            .collect();

        let mut files = Vec::with_capacity(rendered.len() + 6);
        for file in rendered {
            files.push(file?);
        }
        let total_products: usize = pages.iter().map(|p| p.products.len()).sum();
        let mut total_pages = files.len();

        files.push(self.render_assets());
        files.push(self.render_routes_manifest(&paths)?);
        files.push(self.render_not_found()?);
        total_pages += 1;

        let locations = self.render_locations()?;
        let has_locations = locations.is_some();
        if let Some(file) = locations {
            files.push(file);
            total_pages += 1;
        }

        files.extend(self.render_sitemap(&paths.paths, has_locations));

        let files = check_output_paths(files)?;
        self.write_outputs(&files)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            routes: paths.paths.len(),
            pages: total_pages,
            products: total_products,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Fetch page data for every route, keeping route order.
    async fn fetch_pages(&self, routes: &[Route]) -> Result<Vec<CategoryPage>, BuildError> {
        stream::iter(routes)
            .map(|route| async move {
                let source = (self.connect)()?;
                let page = build_category_page(&source, &route.category_slug, &self.images).await?;
                Ok::<_, BuildError>(page)
            })
            .buffered(self.config.concurrency.max(1))
            .try_collect()
            .await
    }
}

impl<C> StaticBuilder<C> {
    fn site_context(&self, lang: &str) -> SiteContext {
        SiteContext {
            site_title: self.config.title.clone(),
            base_url: self.config.base_url.clone(),
            lang: lang.to_string(),
        }
    }

    /// Render one category route.
    fn render_page(&self, route: &Route, page: &CategoryPage) -> Result<OutputFile, BuildError> {
        let lang = route
            .locale
            .as_deref()
            .unwrap_or(self.config.default_locale.as_str());

        let html = self
            .templates
            .render_category(&self.site_context(lang), page)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        Ok(OutputFile::new(route.output_path(), html))
    }

    /// Render static assets.
    fn render_assets(&self) -> OutputFile {
        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };

        OutputFile::new(Path::new("assets").join("main.css"), css)
    }

    /// Render the route list with its fallback policy.
    fn render_routes_manifest(&self, paths: &StaticPaths) -> Result<OutputFile, BuildError> {
        let json = serde_json::to_string_pretty(paths)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(OutputFile::new("routes.json", json))
    }

    /// Render the page served for every route outside the generated set.
    fn render_not_found(&self) -> Result<OutputFile, BuildError> {
        let html = self
            .templates
            .render_not_found(&self.site_context(&self.config.default_locale))
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        Ok(OutputFile::new("404.html", html))
    }

    /// Render the store locations page when a map is configured.
    fn render_locations(&self) -> Result<Option<OutputFile>, BuildError> {
        let Some(map) = &self.config.map else {
            return Ok(None);
        };

        let widget = MapWidget::new(map.options.clone(), map.icons.clone());
        let context = widget
            .context(&map.markers)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        let html = self
            .templates
            .render_locations(&self.site_context(&self.config.default_locale), &context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        tracing::info!("Rendered locations map with {} markers", map.markers.len());

        Ok(Some(OutputFile::new(
            Path::new("locations").join("index.html"),
            html,
        )))
    }

    /// Render sitemap.xml and robots.txt.
    fn render_sitemap(&self, routes: &[Route], has_locations: bool) -> [OutputFile; 2] {
        let site_root = self.config.base_url.trim_end_matches('/');

        let mut urls: Vec<String> = routes.iter().map(Route::url_path).collect();
        if has_locations {
            urls.push("/locations".to_string());
        }

        let entries: Vec<String> = urls
            .iter()
            .map(|url| {
                format!(
                    "  <url>\n    <loc>{}</loc>\n  </url>",
                    xml_escape(&format!("{}{}", site_root, url))
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            entries.join("\n")
        );

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );

        [
            OutputFile::new("sitemap.xml", sitemap),
            OutputFile::new("robots.txt", robots),
        ]
    }

    /// Write rendered files under the output directory.
    fn write_outputs(&self, files: &[OutputFile]) -> Result<(), BuildError> {
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let output_dir = &self.config.output_dir;
        let results: Vec<Result<(), BuildError>> = files
            .par_iter()
            .map(|file| {
                let path = output_dir.join(&file.path);
                write_file(&path, &file.contents)?;
                tracing::debug!("Wrote {}", path.display());
                Ok(())
            })
            .collect();

        results.into_iter().collect()
    }
}

/// A rendered file, relative to the output directory.
#[derive(Debug)]
struct OutputFile {
    path: PathBuf,
    contents: String,
}

impl OutputFile {
    fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }
}

/// Reject output sets where one file's path is another file's directory,
/// such as a `404.html` locale next to the `404.html` page. Repeated paths
/// (duplicate routes) render identically and are written once.
fn check_output_paths(files: Vec<OutputFile>) -> Result<Vec<OutputFile>, BuildError> {
    let mut seen = HashSet::new();
    let files: Vec<OutputFile> = files
        .into_iter()
        .filter(|file| seen.insert(file.path.clone()))
        .collect();

    for file in &files {
        if let Some(dir) = file.path.ancestors().skip(1).find(|dir| seen.contains(*dir)) {
            return Err(BuildError::OutputConflict(format!(
                "{} is needed as a directory for {}",
                dir.display(),
                file.path.display()
            )));
        }
    }

    Ok(files)
}

/// Escape text for an XML element body.
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Write a file, creating its parent directories.
fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }

    fs::write(path, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}
