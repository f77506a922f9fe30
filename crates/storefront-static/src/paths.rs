//! Static route enumeration.

use std::path::PathBuf;

use serde::Serialize;
use storefront_cms::{CategorySummary, CmsError, ContentSource};

/// A statically generated category page target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Category slug for the `:categorySlug` segment
    pub category_slug: String,

    /// Locale prefix, `None` for the unlocalized route
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Route {
    /// Unlocalized route for a category.
    pub fn new(category_slug: impl Into<String>) -> Self {
        Self {
            category_slug: category_slug.into(),
            locale: None,
        }
    }

    /// The same route tagged with a locale.
    pub fn with_locale(&self, locale: impl Into<String>) -> Self {
        Self {
            category_slug: self.category_slug.clone(),
            locale: Some(locale.into()),
        }
    }

    /// URL path relative to the site root, e.g. `/fr/categories/shoes`.
    pub fn url_path(&self) -> String {
        match &self.locale {
            Some(locale) => format!("/{}/categories/{}", locale, self.category_slug),
            None => format!("/categories/{}", self.category_slug),
        }
    }

    /// Output file relative to the output directory.
    pub fn output_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        if let Some(locale) = &self.locale {
            path.push(locale);
        }
        path.push("categories");
        path.push(&self.category_slug);
        path.push("index.html");
        path
    }

    /// Whether every segment can be written without leaving the output
    /// directory.
    pub fn is_writable(&self) -> bool {
        is_path_segment(&self.category_slug)
            && self.locale.as_deref().map_or(true, is_path_segment)
    }
}

fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}

/// The full set of routes to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticPaths {
    /// Routes in generation order
    pub paths: Vec<Route>,

    /// Whether routes outside `paths` may be generated on demand. Always
    /// false: anything not listed is a 404.
    pub fallback: bool,
}

/// Expand categories into one unlocalized route each, followed by one route
/// per category per locale.
///
/// Source order is preserved and nothing is deduplicated, so the result
/// always holds `categories × (1 + locales)` routes.
pub fn expand_routes(categories: &[CategorySummary], locales: &[String]) -> Vec<Route> {
    let base: Vec<Route> = categories.iter().map(|c| Route::new(&c.slug)).collect();

    let localized = base
        .iter()
        .flat_map(|route| locales.iter().map(move |locale| route.with_locale(locale)));

    base.iter().cloned().chain(localized).collect()
}

/// Query every category and expand it across `locales`.
pub async fn enumerate_paths<S>(source: &S, locales: &[String]) -> Result<StaticPaths, CmsError>
where
    S: ContentSource + ?Sized,
{
    let categories = source.categories().await?;
    tracing::info!("Found {} categories", categories.len());

    let paths = expand_routes(&categories, locales);
    tracing::debug!(
        "Expanded {} categories across {} locales into {} routes",
        categories.len(),
        locales.len(),
        paths.len()
    );

    Ok(StaticPaths {
        paths,
        fallback: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemorySource;
    use pretty_assertions::assert_eq;

    fn summary(id: &str, slug: &str) -> CategorySummary {
        CategorySummary {
            id: id.to_string(),
            slug: slug.to_string(),
        }
    }

    fn locales(list: &[&str]) -> Vec<String> {
        list.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn expands_single_category_across_locales() {
        let routes = expand_routes(&[summary("1", "shoes")], &locales(&["en", "fr"]));

        assert_eq!(
            routes,
            vec![
                Route::new("shoes"),
                Route::new("shoes").with_locale("en"),
                Route::new("shoes").with_locale("fr"),
            ]
        );
    }

    #[test]
    fn unlocalized_routes_come_first_in_source_order() {
        let routes = expand_routes(
            &[summary("2", "shirts"), summary("1", "hats")],
            &locales(&["de"]),
        );

        let urls: Vec<String> = routes.iter().map(Route::url_path).collect();

        assert_eq!(
            urls,
            vec![
                "/categories/shirts",
                "/categories/hats",
                "/de/categories/shirts",
                "/de/categories/hats",
            ]
        );
    }

    #[test]
    fn route_count_is_categories_times_locales_plus_one() {
        let categories: Vec<CategorySummary> = (0..5)
            .map(|i| summary(&i.to_string(), &format!("c{}", i)))
            .collect();

        for n in 0..4 {
            let locale_set: Vec<String> = (0..n).map(|i| format!("l{}", i)).collect();
            let routes = expand_routes(&categories, &locale_set);
            assert_eq!(routes.len(), categories.len() + categories.len() * n);
        }
    }

    #[test]
    fn keeps_duplicate_slugs_and_locales() {
        let routes = expand_routes(
            &[summary("1", "shoes"), summary("2", "shoes")],
            &locales(&["en", "en"]),
        );

        assert_eq!(routes.len(), 6);
    }

    #[test]
    fn no_categories_yields_no_routes() {
        assert!(expand_routes(&[], &locales(&["en"])).is_empty());
    }

    #[test]
    fn output_paths_follow_route_shape() {
        assert_eq!(
            Route::new("shoes").output_path(),
            PathBuf::from("categories/shoes/index.html")
        );
        assert_eq!(
            Route::new("shoes").with_locale("fr").output_path(),
            PathBuf::from("fr/categories/shoes/index.html")
        );
    }

    #[test]
    fn rejects_segments_escaping_output_dir() {
        assert!(Route::new("shoes").with_locale("en").is_writable());
        assert!(!Route::new("..").is_writable());
        assert!(!Route::new("a/b").is_writable());
        assert!(!Route::new("").is_writable());
        assert!(!Route::new("shoes").with_locale("..").is_writable());
    }

    #[tokio::test]
    async fn enumerates_from_content_source() {
        let source = MemorySource::new().with_category("1", "Shoes", "shoes", vec![]);

        let paths = enumerate_paths(&source, &locales(&["en", "fr"])).await.unwrap();

        assert!(!paths.fallback);
        assert_eq!(paths.paths.len(), 3);
        assert_eq!(paths.paths[2], Route::new("shoes").with_locale("fr"));
    }

    #[tokio::test]
    async fn propagates_query_failure() {
        let source = MemorySource::failing();

        let result = enumerate_paths(&source, &locales(&["en"])).await;

        assert!(matches!(result, Err(CmsError::UpstreamQueryFailure(_))));
    }

    #[test]
    fn serializes_without_null_locale() {
        let json = serde_json::to_value(Route::new("shoes")).unwrap();

        assert_eq!(json, serde_json::json!({"category_slug": "shoes"}));
    }
}
