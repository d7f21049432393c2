use crate::state::SelectionState;
use crate::types::{CityAggregate, ExhibitionRecord, NationalityCounts};
use geo::Point;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Records whose start-date field textually equals the target year.
///
/// Exact string equality against the decimal form of the year; a padded or
/// otherwise reformatted source value never matches.
pub fn filter_by_year(records: &[ExhibitionRecord], year: u16) -> Vec<&ExhibitionRecord> {
    let needle = year.to_string();
    records.iter().filter(|r| r.start_date == needle).collect()
}

/// Year filter plus nationality filter. An empty selection keeps everything.
pub fn apply_selection<'a>(
    records: &'a [ExhibitionRecord],
    selection: &SelectionState,
) -> Vec<&'a ExhibitionRecord> {
    filter_by_year(records, selection.year)
        .into_iter()
        .filter(|r| {
            selection.nationalities.is_empty()
                || selection.nationalities.iter().any(|n| *n == r.nationality)
        })
        .collect()
}

/// Artist count per nationality. Records without a nationality are skipped
/// (and counted as skipped), not treated as an error.
pub fn count_nationalities(records: &[&ExhibitionRecord]) -> NationalityCounts {
    let mut entries: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut skipped = 0;

    for record in records {
        if record.nationality.is_empty() {
            warn!(
                "Record for city '{}' is missing a nationality, skipping",
                record.city
            );
            skipped += 1;
            continue;
        }
        match index.get(record.nationality.as_str()) {
            Some(&i) => entries[i].1 += 1,
            None => {
                index.insert(record.nationality.as_str(), entries.len());
                entries.push((record.nationality.clone(), 1));
            }
        }
    }

    NationalityCounts { entries, skipped }
}

struct CityScratch<'a> {
    country: &'a str,
    year: &'a str,
    coordinate: Option<Point<f64>>,
    nationalities: HashSet<&'a str>,
    venues: HashSet<&'a str>,
    artists: u32,
}

/// Per-city statistics over the filtered view, one entry per distinct city
/// in first-occurrence order. Single grouped pass; coordinate-less records
/// still count, the aggregate just keeps the first usable coordinate.
pub fn aggregate_cities(records: &[&ExhibitionRecord]) -> Vec<CityAggregate> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_city: HashMap<&str, CityScratch> = HashMap::new();

    for record in records {
        let entry = by_city.entry(record.city.as_str()).or_insert_with(|| {
            order.push(record.city.as_str());
            CityScratch {
                country: record.country.as_str(),
                year: record.start_date.as_str(),
                coordinate: None,
                nationalities: HashSet::new(),
                venues: HashSet::new(),
                artists: 0,
            }
        });
        if entry.coordinate.is_none() {
            entry.coordinate = record.coordinate;
        }
        entry.nationalities.insert(record.nationality.as_str());
        entry.venues.insert(record.venue.as_str());
        entry.artists += 1;
    }

    order
        .into_iter()
        .filter_map(|city| {
            by_city.remove(city).map(|scratch| CityAggregate {
                city: city.to_string(),
                country: scratch.country.to_string(),
                year: scratch.year.to_string(),
                coordinate: scratch.coordinate,
                nationalities: scratch.nationalities.len() as u32,
                venues: scratch.venues.len() as u32,
                artists: scratch.artists,
            })
        })
        .collect()
}
