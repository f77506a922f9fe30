//! In-memory content source for tests.

use std::sync::Arc;

use async_trait::async_trait;
use storefront_cms::{Category, CategorySummary, CmsError, ContentSource, Image, Product};

/// A content source backed by a fixed list of categories.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    categories: Arc<Vec<Category>>,
    unresolvable: Vec<String>,
    failing: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose every query fails upstream.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, id: &str, name: &str, slug: &str, products: Vec<Product>) -> Self {
        Arc::make_mut(&mut self.categories).push(Category {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            products,
        });
        self
    }

    /// List a slug that the single-category query cannot resolve.
    pub fn with_unresolvable(mut self, slug: &str) -> Self {
        self.unresolvable.push(slug.to_string());
        self
    }
}

/// A product whose image public id is `images/{slug}`.
pub fn product(id: &str, name: &str, price: f64, slug: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        slug: slug.to_string(),
        image: Image {
            public_id: format!("images/{}", slug),
            url: format!("https://img.example.com/{}.png", slug),
            width: 1200,
            height: 1200,
        },
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn categories(&self) -> Result<Vec<CategorySummary>, CmsError> {
        if self.failing {
            return Err(CmsError::UpstreamQueryFailure("connection refused".to_string()));
        }

        Ok(self
            .categories
            .iter()
            .map(|c| CategorySummary {
                id: c.id.clone(),
                slug: c.slug.clone(),
            })
            .chain(self.unresolvable.iter().map(|slug| CategorySummary {
                id: format!("missing-{}", slug),
                slug: slug.clone(),
            }))
            .collect())
    }

    async fn category(&self, slug: &str) -> Result<Category, CmsError> {
        if self.failing {
            return Err(CmsError::UpstreamQueryFailure("connection refused".to_string()));
        }

        self.categories
            .iter()
            .find(|c| c.slug == slug)
            .cloned()
            .ok_or_else(|| CmsError::CategoryNotFound {
                slug: slug.to_string(),
            })
    }
}
