/// Aggregate labels published alongside countries in the OWID table.
///
/// Rows carrying one of these locations are dropped from the working table.
/// This is a fixed list, not a geographic test: any other OWID aggregate
/// (for example "Europe" or "International") stays in.
pub const NON_COUNTRY_LOCATIONS: [&str; 11] = [
    "World",
    "High income",
    "Upper middle income",
    "Lower middle income",
    "Low income",
    "European Union",
    "Asia",
    "Africa",
    "North America",
    "South America",
    "Oceania",
];

/// Returns true if `location` is one of the [`NON_COUNTRY_LOCATIONS`].
pub fn is_non_country(location: &str) -> bool {
    NON_COUNTRY_LOCATIONS.contains(&location)
}
