//! Stylesheet generation and minification.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* Storefront catalog theme */

:root {
  --background: #ffffff;
  --foreground: #111827;
  --muted: #6b7280;
  --border: #e5e7eb;
  --primary: #1e40af;
  --primary-foreground: #ffffff;
  --container-width: 1024px;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

.header,
.footer {
  padding: 1rem 1.5rem;
  border-bottom: 1px solid var(--border);
}

.footer {
  border-top: 1px solid var(--border);
  border-bottom: none;
  color: var(--muted);
  text-align: center;
}

.header-logo {
  font-weight: 700;
  font-size: 1.25rem;
  color: var(--foreground);
  text-decoration: none;
}

.container {
  max-width: var(--container-width);
  margin: 0 auto;
  padding: 2rem 1.5rem;
}

h1 {
  font-size: 2.5rem;
  margin-bottom: 1rem;
}

h2 {
  font-size: 1.5rem;
  margin-bottom: 1rem;
}

/* Product grid */
.products {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
  gap: 2rem;
  list-style: none;
}

.products a {
  color: inherit;
  text-decoration: none;
}

.product-image img {
  width: 100%;
  height: auto;
  border-radius: 0.5rem;
}

.product-title {
  font-size: 1.125rem;
  margin-top: 0.75rem;
}

.product-price {
  color: var(--muted);
  margin-bottom: 0.75rem;
}

.button {
  display: inline-block;
  padding: 0.5rem 1rem;
  border: none;
  border-radius: 0.375rem;
  background: var(--primary);
  color: var(--primary-foreground);
  font-size: 1rem;
  cursor: pointer;
}

.button:hover {
  opacity: 0.9;
}

/* Location map */
.map {
  width: 100%;
  height: 480px;
  border-radius: 0.5rem;
}
"#;
