use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::fs;
use anyhow::{Context, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub input: InputConfig,
    pub map: MapConfig,
    pub output: OutputConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    pub dataset_csv: PathBuf,
    pub centroids_geojson: PathBuf,
    /// CSV column names; defaults match the exhibition catalog export.
    #[serde(default)]
    pub columns: ColumnConfig,
    /// GeoJSON property names carrying the country name and centroid.
    #[serde(default)]
    pub properties: PropertyConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ColumnConfig {
    pub nationality: String,
    pub start_date: String,
    pub city: String,
    pub country: String,
    pub venue: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            nationality: "nationality".to_string(),
            start_date: "e.startdate".to_string(),
            city: "e.city".to_string(),
            country: "e.country".to_string(),
            venue: "e.venue".to_string(),
            latitude: "e.latitude".to_string(),
            longitude: "e.longitude".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PropertyConfig {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for PropertyConfig {
    fn default() -> Self {
        PropertyConfig {
            name: "NAME".to_string(),
            latitude: "LAT".to_string(),
            longitude: "LON".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    /// Year slider range, inclusive on both ends.
    pub min_year: u16,
    pub max_year: u16,
    #[serde(default)]
    pub style: StyleConfig,
    /// Map panels served by the frontend, each with its own selection.
    pub panels: Vec<PanelConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelConfig {
    pub id: String,
    pub default_year: u16,
    pub default_nationality: Option<String>,
    #[serde(default = "default_show_lines")]
    pub show_lines: bool,
}

fn default_show_lines() -> bool {
    true
}

/// Marker and line styling baked into the emitted primitives.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub cluster_radius: f64,
    pub cluster_fill_opacity: f64,
    pub city_radius: f64,
    pub city_color: String,
    pub city_fill_opacity: f64,
    pub line_weight: f64,
    /// Used for nationalities missing from the color table.
    pub fallback_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            cluster_radius: 17.0,
            cluster_fill_opacity: 0.5,
            city_radius: 8.0,
            city_color: "orange".to_string(),
            city_fill_opacity: 0.7,
            line_weight: 2.0,
            fallback_color: "gray".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub view_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [input]
            dataset_csv = "data/exhibitions.csv"
            centroids_geojson = "data/europe.geojson"

            [map]
            min_year = 1900
            max_year = 1920

            [[map.panels]]
            id = "map1"
            default_year = 1905

            [output]
            view_dir = "out/views"

            [server]
            port = 3000
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.input.columns.start_date, "e.startdate");
        assert_eq!(config.input.properties.name, "NAME");
        assert_eq!(config.map.style, StyleConfig::default());
        assert_eq!(config.map.style.cluster_radius, 17.0);
        assert_eq!(config.map.style.fallback_color, "gray");
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
        assert!(config.map.panels[0].show_lines);
        assert_eq!(config.map.panels[0].default_nationality, None);
    }

    #[test]
    fn style_overrides_apply() {
        let config: AppConfig = toml::from_str(
            r#"
            [input]
            dataset_csv = "d.csv"
            centroids_geojson = "e.geojson"

            [map]
            min_year = 1900
            max_year = 1910

            [map.style]
            line_weight = 3.5

            [[map.panels]]
            id = "main"
            default_year = 1902
            default_nationality = "France"
            show_lines = false

            [output]
            view_dir = "out"

            [server]
            port = 8080
            static_dir = "www"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.map.style.line_weight, 3.5);
        // untouched knobs keep their defaults
        assert_eq!(config.map.style.city_color, "orange");
        assert_eq!(
            config.map.panels[0].default_nationality.as_deref(),
            Some("France")
        );
        assert!(!config.map.panels[0].show_lines);
        assert_eq!(config.server.static_dir, PathBuf::from("www"));
    }

    #[test]
    fn shipped_config_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml");
        let config = AppConfig::load_from_file(Path::new(path)).expect("shipped config");

        assert_eq!(config.map.min_year, 1900);
        assert_eq!(config.map.max_year, 1920);
        assert_eq!(config.map.panels.len(), 2);
        assert_eq!(config.map.panels[0].id, "map1");
        assert_eq!(config.map.panels[0].default_year, 1905);
        assert_eq!(config.map.panels[1].default_year, 1915);
        assert_eq!(config.server.port, 3000);
    }
}
