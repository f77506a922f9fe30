//! Static catalog site generator.
//!
//! Enumerates every category route across the configured locales, fetches
//! each category's products from the content source and renders the pages
//! to plain HTML ahead of deployment.

pub mod assets;
pub mod builder;
pub mod images;
pub mod map;
pub mod page;
pub mod paths;
pub mod templates;

#[cfg(test)]
mod testing;

pub use builder::{BuildConfig, BuildError, BuildResult, MapConfig, StaticBuilder};
pub use images::{ImageUrlBuilder, Resize, ResizeMode, DEFAULT_IMAGE_BASE_URL, DISPLAY_SIZE};
pub use map::{MapOptions, MapWidget, Marker, MarkerIcons};
pub use page::{build_category_page, format_price, CategoryPage, ProductView};
pub use paths::{enumerate_paths, expand_routes, Route, StaticPaths};
