//! Snapshot models returned by the content source.

use serde::{Deserialize, Serialize};

/// A category as listed by the `PageCategories` query.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategorySummary {
    /// Opaque identifier
    pub id: String,
    /// URL slug
    pub slug: String,
}

/// A category with its products, as returned by the `PageCategory` query.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Category {
    /// Opaque identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// URL slug
    pub slug: String,
    /// Products in source order
    pub products: Vec<Product>,
}

/// A product belonging to a category.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Currency-agnostic decimal price
    pub price: f64,
    pub slug: String,
    pub image: Image,
}

/// Image asset reference stored as a JSON scalar on the product.
///
/// The CMS stores the CDN upload response; only the fields the catalog
/// uses are kept, everything else in the scalar is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Image {
    /// CDN public identifier, the input to display URL computation
    pub public_id: String,
    /// Direct URL of the original upload
    pub url: String,
    pub width: u32,
    pub height: u32,
}
