use crate::config::{ColumnConfig, InputConfig};
use crate::types::ExhibitionRecord;
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use geo::Point;
use std::fs::File;
use std::io::Read;

pub fn load_records(config: &InputConfig) -> Result<Vec<ExhibitionRecord>> {
    println!("Loading dataset from {:?}...", config.dataset_csv);
    let file = File::open(&config.dataset_csv)
        .with_context(|| format!("Failed to open dataset CSV: {:?}", config.dataset_csv))?;
    let records = read_records(file, &config.columns)?;
    println!("Loaded {} exhibition records", records.len());
    Ok(records)
}

pub fn read_records<R: Read>(reader: R, columns: &ColumnConfig) -> Result<Vec<ExhibitionRecord>> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let headers = rdr.headers()?.clone();

    // Identify indices for all configured columns up front
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("Column '{}' not found in dataset CSV", name))
    };

    let nationality_idx = find(&columns.nationality)?;
    let start_date_idx = find(&columns.start_date)?;
    let city_idx = find(&columns.city)?;
    let country_idx = find(&columns.country)?;
    let venue_idx = find(&columns.venue)?;
    let latitude_idx = find(&columns.latitude)?;
    let longitude_idx = find(&columns.longitude)?;

    let mut records = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();

        let coordinate = parse_coordinate(
            record.get(latitude_idx).unwrap_or(""),
            record.get(longitude_idx).unwrap_or(""),
        );

        records.push(ExhibitionRecord {
            nationality: field(nationality_idx),
            start_date: field(start_date_idx),
            city: field(city_idx),
            country: field(country_idx),
            venue: field(venue_idx),
            coordinate,
        });
    }

    Ok(records)
}

fn parse_coordinate(latitude: &str, longitude: &str) -> Option<Point<f64>> {
    let lat: f64 = latitude.trim().parse().ok()?;
    let lon: f64 = longitude.trim().parse().ok()?;
    if lat.is_finite() && lon.is_finite() {
        Some(Point::new(lon, lat))
    } else {
        None
    }
}
