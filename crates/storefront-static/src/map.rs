//! Location map widget.
//!
//! Renders a Leaflet map with one marker per location. Marker icon URLs are
//! passed to the widget when it is constructed and used to build an explicit
//! icon for each marker; Leaflet's global default icon is never touched.

use serde::{Deserialize, Serialize};

const LEAFLET_IMAGES: &str = "https://unpkg.com/leaflet@1.9.4/dist/images";

/// Map view and tile layer options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MapOptions {
    /// Initial center as `[lat, lng]`
    #[serde(default = "default_center")]
    pub center: [f64; 2],

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Extra class appended to the container's `map` class
    #[serde(default)]
    pub class_name: Option<String>,

    /// Tile URL template with `{z}`, `{x}`, `{y}` placeholders
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    /// Attribution shown for the tile layer
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

fn default_center() -> [f64; 2] {
    [38.907132, -77.036546]
}
fn default_zoom() -> u8 {
    12
}
fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}
fn default_attribution() -> String {
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
        .to_string()
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            class_name: None,
            tile_url: default_tile_url(),
            attribution: default_attribution(),
        }
    }
}

/// Marker icon image URLs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkerIcons {
    pub icon_url: String,
    pub icon_retina_url: String,
    pub shadow_url: String,
}

impl Default for MarkerIcons {
    fn default() -> Self {
        Self {
            icon_url: format!("{}/marker-icon.png", LEAFLET_IMAGES),
            icon_retina_url: format!("{}/marker-icon-2x.png", LEAFLET_IMAGES),
            shadow_url: format!("{}/marker-shadow.png", LEAFLET_IMAGES),
        }
    }
}

/// A location shown on the map.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Marker {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// Values the `map.html` template renders.
#[derive(Debug, Clone, Serialize)]
pub struct MapContext {
    /// Container class list
    pub class_name: String,
    /// Widget configuration as a script-safe JSON literal
    pub config: String,
}

#[derive(Serialize)]
struct WidgetConfig<'a> {
    center: [f64; 2],
    zoom: u8,
    tile_url: &'a str,
    attribution: &'a str,
    icons: &'a MarkerIcons,
    markers: &'a [Marker],
}

/// A configured map widget.
#[derive(Debug, Clone, PartialEq)]
pub struct MapWidget {
    options: MapOptions,
    icons: MarkerIcons,
}

impl MapWidget {
    /// Create a widget. The marker icons are fixed for its lifetime.
    pub fn new(options: MapOptions, icons: MarkerIcons) -> Self {
        Self { options, icons }
    }

    /// Container class list: `map`, then the configured extra class.
    pub fn class_name(&self) -> String {
        match self.options.class_name.as_deref().map(str::trim) {
            Some(extra) if !extra.is_empty() => format!("map {}", extra),
            _ => "map".to_string(),
        }
    }

    /// Template context for rendering the widget with `markers`.
    pub fn context(&self, markers: &[Marker]) -> Result<MapContext, serde_json::Error> {
        let config = WidgetConfig {
            center: self.options.center,
            zoom: self.options.zoom,
            tile_url: &self.options.tile_url,
            attribution: &self.options.attribution,
            icons: &self.icons,
            markers,
        };

        let json = serde_json::to_string(&config)?;

        Ok(MapContext {
            class_name: self.class_name(),
            config: script_safe(&json),
        })
    }
}

/// Escape a JSON literal for embedding inside a `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(class_name: Option<&str>) -> MapWidget {
        MapWidget::new(
            MapOptions {
                class_name: class_name.map(str::to_string),
                ..Default::default()
            },
            MarkerIcons::default(),
        )
    }

    #[test]
    fn class_name_defaults_to_map() {
        assert_eq!(widget(None).class_name(), "map");
        assert_eq!(widget(Some("  ")).class_name(), "map");
    }

    #[test]
    fn class_name_appends_extra_class() {
        assert_eq!(widget(Some("home-map")).class_name(), "map home-map");
    }

    #[test]
    fn config_carries_icons_and_markers() {
        let markers = vec![Marker {
            name: "Flagship".to_string(),
            lat: 38.9,
            lng: -77.0,
        }];

        let ctx = widget(None).context(&markers).unwrap();
        let value: serde_json::Value = serde_json::from_str(&ctx.config).unwrap();

        assert_eq!(
            value["icons"]["icon_retina_url"],
            "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon-2x.png"
        );
        assert_eq!(value["markers"][0]["name"], "Flagship");
        assert_eq!(value["zoom"], 12);
    }

    #[test]
    fn config_cannot_close_script_element() {
        let markers = vec![Marker {
            name: "</script><b>".to_string(),
            lat: 0.0,
            lng: 0.0,
        }];

        let ctx = widget(None).context(&markers).unwrap();

        assert!(!ctx.config.contains("</script>"));
        let value: serde_json::Value = serde_json::from_str(&ctx.config).unwrap();
        assert_eq!(value["markers"][0]["name"], "</script><b>");
    }
}
