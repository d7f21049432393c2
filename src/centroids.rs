use crate::config::PropertyConfig;
use anyhow::{Context, Result, anyhow};
use geo::Point;
use geojson::GeoJson;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

/// Country name -> centroid lookup built from the reference GeoJSON.
///
/// Lookups are exact string matches against the feature name property. A
/// nationality that does not match any feature name simply gets no centroid,
/// and therefore no cluster marker and no connecting lines.
#[derive(Debug, Clone, Default)]
pub struct CentroidTable {
    centroids: HashMap<String, Point<f64>>,
}

impl CentroidTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Point<f64>> {
        self.centroids.get(name).copied()
    }

    pub fn load(path: &Path, properties: &PropertyConfig) -> Result<Self> {
        println!("Loading country centroids from {:?}...", path);
        let file = File::open(path)
            .with_context(|| format!("Failed to open centroid GeoJSON: {:?}", path))?;
        let reader = BufReader::new(file);
        let geojson = GeoJson::from_reader(reader).context("Failed to parse centroid GeoJSON")?;
        let table = Self::from_geojson(geojson, properties)?;
        println!("Loaded centroids for {} countries", table.len());
        Ok(table)
    }

    /// Builds the lookup from a parsed document. Features with a missing
    /// name or non-finite coordinates are dropped, not fatal.
    pub fn from_geojson(geojson: GeoJson, properties: &PropertyConfig) -> Result<Self> {
        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => return Err(anyhow!("Centroid reference must be a FeatureCollection")),
        };

        let mut centroids = HashMap::new();

        for feature in collection.features {
            let props = match feature.properties.as_ref() {
                Some(p) => p,
                None => {
                    warn!("Skipping centroid feature without properties");
                    continue;
                }
            };

            let name = match props.get(&properties.name) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };

            let lat = property_f64(props.get(&properties.latitude));
            let lon = property_f64(props.get(&properties.longitude));

            match (name, lat, lon) {
                (Some(name), Some(lat), Some(lon)) => {
                    // Duplicate names: the later feature wins
                    centroids.insert(name, Point::new(lon, lat));
                }
                _ => {
                    warn!("Invalid or missing centroid properties: {:?}", props);
                }
            }
        }

        Ok(CentroidTable { centroids })
    }
}

/// Numeric property, accepting either JSON numbers or numeric strings.
/// NaN and infinities are rejected.
fn property_f64(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(geojson: &str) -> CentroidTable {
        let parsed: GeoJson = geojson.parse().expect("geojson should parse");
        CentroidTable::from_geojson(parsed, &PropertyConfig::default())
            .expect("table should build")
    }

    #[test]
    fn extracts_named_centroids() {
        let table = table(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,
                 "properties":{"NAME":"Austria","LAT":47.59,"LON":14.14}},
                {"type":"Feature","geometry":null,
                 "properties":{"NAME":"France","LAT":"46.56","LON":"2.55"}}
            ]}"#,
        );
        assert_eq!(table.len(), 2);

        let austria = table.get("Austria").expect("Austria present");
        assert_eq!(austria.y(), 47.59);
        assert_eq!(austria.x(), 14.14);

        // numeric strings parse too, matching the loosely typed source files
        let france = table.get("France").expect("France present");
        assert_eq!(france.y(), 46.56);
    }

    #[test]
    fn lookup_miss_returns_none() {
        let table = table(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,
                 "properties":{"NAME":"Austria","LAT":47.59,"LON":14.14}}
            ]}"#,
        );
        assert!(table.get("Ruritania").is_none());
        assert!(table.get("austria").is_none(), "matching is case sensitive");
    }

    #[test]
    fn malformed_features_are_dropped() {
        let table = table(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,
                 "properties":{"LAT":47.0,"LON":14.0}},
                {"type":"Feature","geometry":null,
                 "properties":{"NAME":"","LAT":47.0,"LON":14.0}},
                {"type":"Feature","geometry":null,
                 "properties":{"NAME":"Nowhere","LAT":"not a number","LON":1.0}},
                {"type":"Feature","geometry":null,
                 "properties":{"NAME":"NanLand","LAT":"NaN","LON":1.0}},
                {"type":"Feature","geometry":null,
                 "properties":{"NAME":"Valid","LAT":1.0,"LON":2.0}}
            ]}"#,
        );
        assert_eq!(table.len(), 1);
        assert!(table.get("Valid").is_some());
        assert!(table.get("NanLand").is_none());
    }

    #[test]
    fn duplicate_names_keep_the_last_feature() {
        let table = table(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":null,
                 "properties":{"NAME":"Austria","LAT":1.0,"LON":1.0}},
                {"type":"Feature","geometry":null,
                 "properties":{"NAME":"Austria","LAT":47.59,"LON":14.14}}
            ]}"#,
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Austria").expect("present").y(), 47.59);
    }

    #[test]
    fn non_feature_collection_is_an_error() {
        let parsed: GeoJson = r#"{"type":"Feature","geometry":null,"properties":{}}"#
            .parse()
            .expect("geojson should parse");
        let err = CentroidTable::from_geojson(parsed, &PropertyConfig::default())
            .expect_err("should fail");
        assert!(err.to_string().contains("FeatureCollection"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = CentroidTable::load(
            Path::new("/definitely/not/here.geojson"),
            &PropertyConfig::default(),
        )
        .expect_err("should fail");
        assert!(err.to_string().contains("Failed to open"));
    }

    #[test]
    fn loads_the_shipped_fixture() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/europe.geojson");
        let table =
            CentroidTable::load(Path::new(path), &PropertyConfig::default()).expect("fixture");
        assert!(table.len() >= 37);
        assert!(table.get("Austria").is_some());
        assert!(table.get("United Kingdom").is_some());
    }
}
