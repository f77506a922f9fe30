//! Read-only GraphQL client for the storefront content source.
//!
//! Exposes the two queries the catalog build needs (`PageCategories` and
//! `PageCategory`), the typed snapshot models they return, and the
//! [`ContentSource`] seam the site builder is written against.

pub mod client;
pub mod models;
pub mod queries;
pub mod source;

pub use client::{CmsClient, DEFAULT_ENDPOINT};
pub use models::{Category, CategorySummary, Image, Product};
pub use source::{CmsError, ContentSource};
