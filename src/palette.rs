//! Static display colors per artist nationality.
//!
//! CSS color names, handed to the map client as-is. Nationalities missing
//! from the table render in the configured fallback color.

/// Full color table, in display order.
pub const COUNTRY_COLORS: &[(&str, &str)] = &[
    ("Armenia", "maroon"),
    ("Austria", "darkred"),
    ("Bosnia and Herzegovina", "darkblue"),
    ("Belgium", "yellow"),
    ("Bulgaria", "purple"),
    ("Belarus", "cyan"),
    ("Switzerland", "darkgreen"),
    ("Czech Republic", "teal"),
    ("Germany", "blue"),
    ("Denmark", "darkorange"),
    ("Estonia", "indigo"),
    ("Spain", "red"),
    ("Finland", "lightgreen"),
    ("France", "orange"),
    ("United Kingdom", "navy"),
    ("Georgia", "brown"),
    ("Greece", "lime"),
    ("Croatia", "steelblue"),
    ("Hungary", "darkmagenta"),
    ("Ireland", "forestgreen"),
    ("Italy", "green"),
    ("Lithuania", "lavender"),
    ("Luxembourg", "khaki"),
    ("Latvia", "orchid"),
    ("Montenegro", "goldenrod"),
    ("Netherlands", "orange"),
    ("Norway", "lightblue"),
    ("Poland", "darkcyan"),
    ("Portugal", "dodgerblue"),
    ("Romania", "magenta"),
    ("Serbia", "darkslateblue"),
    ("Russia", "black"),
    ("Sweden", "skyblue"),
    ("Slovenia", "silver"),
    ("Slovakia", "mediumblue"),
    ("Turkey", "cyan"),
    ("Ukraine", "blueviolet"),
];

/// Countries eligible for the nationality selector.
const EUROPEAN_COUNTRIES: &[&str] = &[
    "Armenia",
    "Austria",
    "Bosnia and Herzegovina",
    "Belgium",
    "Bulgaria",
    "Belarus",
    "Switzerland",
    "Czech Republic",
    "Germany",
    "Denmark",
    "Estonia",
    "Spain",
    "Finland",
    "France",
    "United Kingdom",
    "Georgia",
    "Greece",
    "Croatia",
    "Hungary",
    "Ireland",
    "Italy",
    "Lithuania",
    "Luxembourg",
    "Latvia",
    "Montenegro",
    "Netherlands",
    "Norway",
    "Poland",
    "Portugal",
    "Romania",
    "Serbia",
    "Russia",
    "Sweden",
    "Slovenia",
    "Slovakia",
    "Turkey",
    "Ukraine",
];

pub fn color_for(nationality: &str) -> Option<&'static str> {
    COUNTRY_COLORS
        .iter()
        .find(|(name, _)| *name == nationality)
        .map(|(_, color)| *color)
}

/// The color table restricted to the European list, table order preserved.
pub fn restricted_colors() -> Vec<(&'static str, &'static str)> {
    COUNTRY_COLORS
        .iter()
        .filter(|(name, _)| EUROPEAN_COUNTRIES.contains(name))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_nationality() {
        assert_eq!(color_for("Austria"), Some("darkred"));
        assert_eq!(color_for("Russia"), Some("black"));
    }

    #[test]
    fn unknown_nationality_has_no_color() {
        assert_eq!(color_for("Ruritania"), None);
        assert_eq!(color_for(""), None);
    }

    #[test]
    fn restricted_set_keeps_table_order() {
        let restricted = restricted_colors();
        // The European list currently covers the whole table; the filter is
        // still applied so a table extension stays opt-in.
        assert_eq!(restricted.len(), COUNTRY_COLORS.len());
        assert_eq!(restricted.first(), Some(&("Armenia", "maroon")));
        assert_eq!(restricted.last(), Some(&("Ukraine", "blueviolet")));
    }
}
