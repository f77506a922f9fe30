//! Template engine for rendering catalog pages.

use minijinja::{context, Environment};

use crate::map::MapContext;
use crate::page::CategoryPage;

/// Site-wide values shared by every page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SiteContext {
    /// Site title
    pub site_title: String,
    /// Base URL, always ending in `/`
    pub base_url: String,
    /// `lang` attribute of the document
    pub lang: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("category.html".to_string(), CATEGORY_TEMPLATE.to_string())
            .expect("Failed to add category template");

        env.add_template_owned("404.html".to_string(), NOT_FOUND_TEMPLATE.to_string())
            .expect("Failed to add 404 template");

        env.add_template_owned("map.html".to_string(), MAP_TEMPLATE.to_string())
            .expect("Failed to add map template");

        env.add_template_owned("locations.html".to_string(), LOCATIONS_TEMPLATE.to_string())
            .expect("Failed to add locations template");

        Self { env }
    }

    /// Render a category page.
    pub fn render_category(
        &self,
        site: &SiteContext,
        page: &CategoryPage,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("category.html")?.render(context! {
            site_title => &site.site_title,
            base_url => &site.base_url,
            lang => &site.lang,
            title => &page.category.name,
            category => &page.category,
            products => &page.products,
        })
    }

    /// Render the not-found page served for routes outside the generated set.
    pub fn render_not_found(&self, site: &SiteContext) -> Result<String, minijinja::Error> {
        self.env.get_template("404.html")?.render(context! {
            site_title => &site.site_title,
            base_url => &site.base_url,
            lang => &site.lang,
            title => "Page not found",
        })
    }

    /// Render the store locations page with its map widget.
    pub fn render_locations(
        &self,
        site: &SiteContext,
        map: &MapContext,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("locations.html")?.render(context! {
            site_title => &site.site_title,
            base_url => &site.base_url,
            lang => &site.lang,
            title => "Locations",
            map => map,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <meta name="description" content="{{ site_title }}">
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
  {% block head %}{% endblock %}
</head>
<body>
  <header class="header">
    <a href="{{ base_url }}" class="header-logo">{{ site_title }}</a>
  </header>
  <main class="main">
    <div class="container">
      {% block content %}{% endblock %}
    </div>
  </main>
  <footer class="footer">
    <p>&copy; {{ site_title }}</p>
  </footer>
</body>
</html>"##;

const CATEGORY_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<h1>{{ category.name }}</h1>

<h2>Products</h2>

<ul class="products">
{% for product in products %}
  <li>
    <a href="{{ base_url }}{{ product.path }}">
      <div class="product-image">
        <img width="{{ product.image_width }}" height="{{ product.image_height }}" src="{{ product.image_url }}" alt="{{ product.name }}">
      </div>
      <h3 class="product-title">{{ product.name }}</h3>
      <p class="product-price">${{ product.price_display }}</p>
    </a>
    <p>
      <button class="button snipcart-add-item"
        data-item-id="{{ product.id }}"
        data-item-price="{{ product.cart_price }}"
        data-item-url="{{ product.path }}"
        data-item-image="{{ product.image_source_url }}"
        data-item-name="{{ product.name }}">
        Add to Cart
      </button>
    </p>
  </li>
{% endfor %}
</ul>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<h1>Page not found</h1>
<p>This page does not exist. <a href="{{ base_url }}">Back to the shop</a>.</p>
{% endblock %}"##;

const MAP_TEMPLATE: &str = r##"<div id="map" class="{{ map.class_name }}"></div>
<script>
(function () {
  var config = {{ map.config | safe }};
  var icon = L.icon({
    iconUrl: config.icons.icon_url,
    iconRetinaUrl: config.icons.icon_retina_url,
    shadowUrl: config.icons.shadow_url,
    iconSize: [25, 41],
    iconAnchor: [12, 41],
    popupAnchor: [1, -34],
    shadowSize: [41, 41]
  });
  var map = L.map("map").setView(config.center, config.zoom);
  L.tileLayer(config.tile_url, { attribution: config.attribution }).addTo(map);
  config.markers.forEach(function (location) {
    var label = document.createElement("span");
    label.textContent = location.name;
    L.marker([location.lat, location.lng], { icon: icon }).addTo(map).bindPopup(label);
  });
})();
</script>"##;

const LOCATIONS_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block head %}
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
{% endblock %}

{% block content %}
<h1>Locations</h1>
{% include "map.html" %}
{% endblock %}"##;
