//! Category page data.

use serde::Serialize;
use storefront_cms::{Category, CmsError, ContentSource, Product};

use crate::images::{ImageUrlBuilder, DISPLAY_SIZE};

/// Category fields shown on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// A product prepared for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: f64,
    /// Shortest decimal form of the price, as handed to the cart
    pub cart_price: String,
    /// Price with exactly two fraction digits
    pub price_display: String,
    /// Product page path relative to the site root, `products/{slug}`
    pub path: String,
    /// CDN display URL (900×900 scale)
    pub image_url: String,
    pub image_width: u32,
    pub image_height: u32,
    /// Direct URL of the original upload
    pub image_source_url: String,
}

/// Everything a category page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPage {
    pub category: CategoryInfo,
    pub products: Vec<ProductView>,
}

/// Format a price with exactly two fraction digits.
///
/// Halves round away from zero (`0.125` is `0.13`), and negative zero prints
/// as `0.00`.
pub fn format_price(price: f64) -> String {
    if price == 0.0 {
        return "0.00".to_string();
    }

    format!("{:.2}", (price * 100.0).round() / 100.0)
}

impl ProductView {
    fn from_product(product: Product, images: &ImageUrlBuilder) -> Self {
        Self {
            image_url: images.display_url(&product.image.public_id),
            image_width: DISPLAY_SIZE,
            image_height: DISPLAY_SIZE,
            image_source_url: product.image.url,
            price_display: format_price(product.price),
            cart_price: product.price.to_string(),
            path: format!("products/{}", product.slug),
            price: product.price,
            id: product.id,
            name: product.name,
            slug: product.slug,
        }
    }
}

impl CategoryPage {
    /// Project a fetched category into page data.
    pub fn from_category(category: Category, images: &ImageUrlBuilder) -> Self {
        let products = category
            .products
            .into_iter()
            .map(|p| ProductView::from_product(p, images))
            .collect();

        Self {
            category: CategoryInfo {
                id: category.id,
                name: category.name,
                slug: category.slug,
            },
            products,
        }
    }
}

/// Fetch one category by slug and prepare its page data.
///
/// The locale of the route being built does not take part in the query.
pub async fn build_category_page<S>(
    source: &S,
    slug: &str,
    images: &ImageUrlBuilder,
) -> Result<CategoryPage, CmsError>
where
    S: ContentSource + ?Sized,
{
    let category = source.category(slug).await?;
    tracing::debug!(
        "Fetched category {} with {} products",
        category.slug,
        category.products.len()
    );

    Ok(CategoryPage::from_category(category, images))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{product, MemorySource};
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_prices_with_two_digits() {
        assert_eq!(format_price(9.0), "9.00");
        assert_eq!(format_price(9.5), "9.50");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(19.99), "19.99");
        assert_eq!(format_price(1234.5), "1234.50");
    }

    #[test]
    fn rounds_price_halves_away_from_zero() {
        assert_eq!(format_price(0.125), "0.13");
        assert_eq!(format_price(0.375), "0.38");
        assert_eq!(format_price(-0.125), "-0.13");
        assert_eq!(format_price(-0.0), "0.00");
    }

    #[tokio::test]
    async fn annotates_products_with_display_urls() {
        let source = MemorySource::new().with_category(
            "1",
            "Shoes",
            "shoes",
            vec![product("p1", "Runner", 59.5, "runner")],
        );
        let images = ImageUrlBuilder::new("https://cdn.example.com");

        let page = build_category_page(&source, "shoes", &images).await.unwrap();

        assert_eq!(
            page.category,
            CategoryInfo {
                id: "1".to_string(),
                name: "Shoes".to_string(),
                slug: "shoes".to_string(),
            }
        );
        let runner = &page.products[0];
        assert_eq!(
            runner.image_url,
            "https://cdn.example.com/images/runner?resize=scale&width=900&height=900"
        );
        assert_eq!(runner.image_source_url, "https://img.example.com/runner.png");
        assert_eq!(runner.price_display, "59.50");
        assert_eq!(runner.path, "products/runner");
        assert_eq!((runner.image_width, runner.image_height), (900, 900));
    }

    #[tokio::test]
    async fn keeps_product_order() {
        let source = MemorySource::new().with_category(
            "1",
            "Hats",
            "hats",
            vec![
                product("b", "Beanie", 10.0, "beanie"),
                product("a", "Cap", 12.0, "cap"),
            ],
        );

        let page = build_category_page(&source, "hats", &ImageUrlBuilder::default())
            .await
            .unwrap();

        let ids: Vec<&str> = page.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn empty_category_has_no_products() {
        let source = MemorySource::new().with_category("1", "Empty", "empty", vec![]);

        let page = build_category_page(&source, "empty", &ImageUrlBuilder::default())
            .await
            .unwrap();

        assert_eq!(page.category.name, "Empty");
        assert!(page.products.is_empty());
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let source = MemorySource::new().with_category("1", "Shoes", "shoes", vec![]);

        let result = build_category_page(&source, "socks", &ImageUrlBuilder::default()).await;

        assert!(matches!(
            result,
            Err(CmsError::CategoryNotFound { slug }) if slug == "socks"
        ));
    }
}
