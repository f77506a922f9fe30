//! Display image URLs for the image CDN.
//!
//! The CDN applies the transformation; this module only encodes it in the
//! delivery URL, so computing a URL never touches the network.

/// Edge length of the square box product images are scaled into.
pub const DISPLAY_SIZE: u32 = 900;

/// Delivery base used when none is configured.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://res.cloudinary.com/storefront/image/upload";

/// How the CDN fits an image into the target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Scale to the box, keeping the aspect ratio
    Scale,
}

impl ResizeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ResizeMode::Scale => "scale",
        }
    }
}

/// A resize transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resize {
    pub mode: ResizeMode,
    pub width: u32,
    pub height: u32,
}

impl Resize {
    /// Scale-resize into a `width` × `height` box.
    pub fn scale(width: u32, height: u32) -> Self {
        Self {
            mode: ResizeMode::Scale,
            width,
            height,
        }
    }
}

/// Builds CDN delivery URLs from public identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    base_url: String,
}

impl ImageUrlBuilder {
    /// Create a builder for the given delivery base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// URL for `public_id` with `resize` applied.
    ///
    /// Each path segment of `public_id` is percent-encoded; `/` separators
    /// are kept.
    pub fn url(&self, public_id: &str, resize: Resize) -> String {
        let path: Vec<_> = public_id
            .trim_start_matches('/')
            .split('/')
            .map(urlencoding::encode)
            .collect();

        format!(
            "{}/{}?resize={}&width={}&height={}",
            self.base_url,
            path.join("/"),
            resize.mode.as_str(),
            resize.width,
            resize.height
        )
    }

    /// The catalog display URL: a scale-resize into a 900×900 box.
    pub fn display_url(&self, public_id: &str) -> String {
        self.url(public_id, Resize::scale(DISPLAY_SIZE, DISPLAY_SIZE))
    }
}

impl Default for ImageUrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}
