use geo::Point;

/// One row of the exhibitions dataset.
#[derive(Debug, Clone)]
pub struct ExhibitionRecord {
    /// Artist's country of origin; may be empty in the source data.
    pub nationality: String,
    /// Exhibition start date exactly as it appears in the source; matched textually.
    pub start_date: String,
    pub city: String,
    pub country: String,
    pub venue: String,
    /// None when the source latitude/longitude did not parse as numbers.
    pub coordinate: Option<Point<f64>>,
}

/// Artist counts per nationality over one filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct NationalityCounts {
    // (nationality, artists), first-occurrence order
    pub entries: Vec<(String, u32)>,
    /// Records skipped because the nationality field was empty.
    pub skipped: u32,
}

/// Per-city statistics over one filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct CityAggregate {
    pub city: String,
    /// Country and year of the city's first record in the view.
    pub country: String,
    pub year: String,
    /// First valid coordinate seen for this city, if any.
    pub coordinate: Option<Point<f64>>,
    /// Distinct nationality values among the city's records.
    pub nationalities: u32,
    /// Distinct venue values among the city's records.
    pub venues: u32,
    /// Total records for this city.
    pub artists: u32,
}
