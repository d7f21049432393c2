use crate::centroids::CentroidTable;
use crate::config::StyleConfig;
use crate::palette;
use crate::processing;
use crate::state::SelectionState;
use crate::types::ExhibitionRecord;
use serde::Serialize;
use tracing::warn;

/// Aggregated marker for one nationality, placed at the country centroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMarker {
    pub nationality: String,
    pub lat: f64,
    pub lon: f64,
    pub color: String,
    pub artists: u32,
    pub radius: f64,
    pub fill_opacity: f64,
}

/// Marker for one exhibition city, carrying the popup statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityMarker {
    pub city: String,
    pub country: String,
    pub year: String,
    pub lat: f64,
    pub lon: f64,
    pub color: String,
    pub radius: f64,
    pub fill_opacity: f64,
    pub nationalities: u32,
    pub venues: u32,
    pub artists: u32,
}

/// Line from an exhibition city to the artist's nationality centroid.
/// One per qualifying record, not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionLine {
    pub nationality: String,
    /// City end, [lat, lon].
    pub from: [f64; 2],
    /// Centroid end, [lat, lon].
    pub to: [f64; 2],
    pub color: String,
    pub weight: f64,
}

/// Everything one panel draws for its current selection. The client clears
/// its dynamic layers and redraws from this wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub year: u16,
    pub clusters: Vec<ClusterMarker>,
    pub cities: Vec<CityMarker>,
    pub lines: Vec<ConnectionLine>,
}

/// Runs the full pipeline for one selection: filter, aggregate, join against
/// the centroid table, and compose style-resolved primitives.
pub fn build_view(
    records: &[ExhibitionRecord],
    centroids: &CentroidTable,
    selection: &SelectionState,
    style: &StyleConfig,
) -> MapView {
    let filtered = processing::apply_selection(records, selection);
    let counts = processing::count_nationalities(&filtered);
    let aggregates = processing::aggregate_cities(&filtered);

    let mut view = MapView {
        year: selection.year,
        clusters: Vec::new(),
        cities: Vec::new(),
        lines: Vec::new(),
    };

    for (nationality, artists) in &counts.entries {
        // A nationality absent from the reference gets no cluster; the
        // count entry still exists for anything downstream that lists it.
        let Some(centroid) = centroids.get(nationality) else {
            continue;
        };
        view.clusters.push(ClusterMarker {
            nationality: nationality.clone(),
            lat: centroid.y(),
            lon: centroid.x(),
            color: color_for(nationality, style),
            artists: *artists,
            radius: style.cluster_radius,
            fill_opacity: style.cluster_fill_opacity,
        });
    }

    for aggregate in aggregates {
        let Some(coordinate) = aggregate.coordinate else {
            warn!(
                "City '{}' has no usable coordinates, skipping marker",
                aggregate.city
            );
            continue;
        };
        view.cities.push(CityMarker {
            city: aggregate.city,
            country: aggregate.country,
            year: aggregate.year,
            lat: coordinate.y(),
            lon: coordinate.x(),
            color: style.city_color.clone(),
            radius: style.city_radius,
            fill_opacity: style.city_fill_opacity,
            nationalities: aggregate.nationalities,
            venues: aggregate.venues,
            artists: aggregate.artists,
        });
    }

    if selection.show_lines {
        for record in &filtered {
            let Some(coordinate) = record.coordinate else {
                warn!(
                    "Skipping line for '{}' ({}): invalid city coordinates",
                    record.city, record.nationality
                );
                continue;
            };
            let Some(centroid) = centroids.get(&record.nationality) else {
                continue;
            };
            view.lines.push(ConnectionLine {
                nationality: record.nationality.clone(),
                from: [coordinate.y(), coordinate.x()],
                to: [centroid.y(), centroid.x()],
                color: color_for(&record.nationality, style),
                weight: style.line_weight,
            });
        }
    }

    view
}

fn color_for(nationality: &str, style: &StyleConfig) -> String {
    palette::color_for(nationality)
        .map(str::to_string)
        .unwrap_or_else(|| style.fallback_color.clone())
}
