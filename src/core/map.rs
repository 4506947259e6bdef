use crate::domain::model::{Coordinate, MapFragments};
use serde::Deserialize;

pub const DEFAULT_BASE_TILES: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_BASE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
pub const DEFAULT_HAZARD_TILES: &str =
    "https://disaportaldata.gsi.go.jp/raster/01_flood_l2_shinsuishin_kuni_data/{z}/{x}/{y}.png";
pub const DEFAULT_HAZARD_ATTRIBUTION: &str =
    "Hazard map by the Geospatial Information Authority of Japan";

const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

/// Knobs for the embedded map. Every field has a sensible default, so a
/// `[map]` config section only needs the values it wants to change.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub element_id: String,
    pub zoom: u32,
    pub width_px: u32,
    pub height_px: u32,
    pub base_tiles: String,
    pub base_attribution: String,
    pub hazard_tiles: String,
    pub hazard_attribution: String,
    pub hazard_opacity: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            element_id: "photoland-map".to_string(),
            zoom: 15,
            width_px: 400,
            height_px: 400,
            base_tiles: DEFAULT_BASE_TILES.to_string(),
            base_attribution: DEFAULT_BASE_ATTRIBUTION.to_string(),
            hazard_tiles: DEFAULT_HAZARD_TILES.to_string(),
            hazard_attribution: DEFAULT_HAZARD_ATTRIBUTION.to_string(),
            hazard_opacity: 0.7,
        }
    }
}

/// Renders the three HTML fragments for a Leaflet map centred on a
/// coordinate: asset includes for the page head, the map div for the page
/// body, and the script wiring up base tiles, the flood hazard overlay and
/// a layer control.
///
/// Rendering is pure. The same settings and coordinate always produce
/// byte-identical fragments, so report output is reproducible and the
/// fragments can be asserted on directly in tests.
#[derive(Debug, Clone, Default)]
pub struct MapComposer {
    settings: MapSettings,
}

impl MapComposer {
    pub fn new(settings: MapSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    pub fn compose(&self, coordinate: Coordinate) -> MapFragments {
        MapFragments {
            header: self.render_header(),
            body: self.render_body(),
            script: self.render_script(coordinate),
        }
    }

    fn render_header(&self) -> String {
        format!(
            "<script src=\"{js}\"></script>\n\
             <link rel=\"stylesheet\" href=\"{css}\"/>\n\
             <style>#{id} {{ width: {w}px; height: {h}px; }}</style>\n",
            js = LEAFLET_JS,
            css = LEAFLET_CSS,
            id = self.settings.element_id,
            w = self.settings.width_px,
            h = self.settings.height_px,
        )
    }

    fn render_body(&self) -> String {
        format!(
            "<div class=\"report-map\" id=\"{}\"></div>\n",
            self.settings.element_id
        )
    }

    fn render_script(&self, coordinate: Coordinate) -> String {
        // Layer options go through serde_json so attributions with quotes
        // or non-ASCII text stay valid JS string literals.
        let base_options = serde_json::json!({
            "attribution": self.settings.base_attribution,
        });
        let hazard_options = serde_json::json!({
            "attribution": self.settings.hazard_attribution,
            "fmt": "image/png",
            "opacity": self.settings.hazard_opacity,
        });

        format!(
            "var map = L.map(\"{id}\").setView([{lat}, {lon}], {zoom});\n\
             var base_layer = L.tileLayer(\"{base}\", {base_options});\n\
             base_layer.addTo(map);\n\
             var hazard_layer = L.tileLayer(\"{hazard}\", {hazard_options});\n\
             hazard_layer.addTo(map);\n\
             L.control.layers({{\"OpenStreetMap\": base_layer}}, {{\"Flood hazard\": hazard_layer}}).addTo(map);\n",
            id = self.settings.element_id,
            lat = coordinate.lat_deg,
            lon = coordinate.lon_deg,
            zoom = self.settings.zoom,
            base = self.settings.base_tiles,
            base_options = base_options,
            hazard = self.settings.hazard_tiles,
            hazard_options = hazard_options,
        )
    }
}
