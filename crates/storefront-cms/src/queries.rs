//! GraphQL documents sent to the content source.

use serde::{Deserialize, Serialize};

use crate::models::{Category, CategorySummary};

/// Lists every category. Takes no variables.
pub const PAGE_CATEGORIES: &str = r#"query PageCategories {
  categories {
    id
    slug
  }
}"#;

/// Fetches one category by slug with its products.
pub const PAGE_CATEGORY: &str = r#"query PageCategory($slug: String) {
  category(where: { slug: $slug }) {
    id
    name
    slug
    products {
      id
      image
      name
      price
      slug
    }
  }
}"#;

/// A GraphQL request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub operation_name: &'a str,
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<V>,
}

/// The standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single entry of the `errors` array.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Variables for [`PAGE_CATEGORY`].
#[derive(Debug, Serialize)]
pub struct SlugVariables<'a> {
    pub slug: &'a str,
}

/// `data` payload of [`PAGE_CATEGORIES`].
#[derive(Debug, Deserialize)]
pub struct CategoriesData {
    pub categories: Vec<CategorySummary>,
}

/// `data` payload of [`PAGE_CATEGORY`]. `category` is null when no record
/// matches the slug.
#[derive(Debug, Deserialize)]
pub struct CategoryData {
    pub category: Option<Category>,
}
