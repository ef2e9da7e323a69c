pub const MAX_DEFAULT_COUNTRIES: usize = 3;

pub const DEFAULT_PREFERENCES: [&str; 5] = [
    "United States",
    "United Kingdom",
    "Germany",
    "Canada",
    "Australia",
];

/// Initial country selection for a list of available countries.
///
/// Preferred countries that are available win, in preference order, capped at
/// [`MAX_DEFAULT_COUNTRIES`]. With no match the first available countries are
/// used instead. An empty result means there is nothing to select and the
/// caller must stop.
pub fn default_selection<S: AsRef<str>>(available: &[String], preferences: &[S]) -> Vec<String> {
    let preferred: Vec<String> = preferences
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| available.iter().any(|a| a.as_str() == *p))
        .take(MAX_DEFAULT_COUNTRIES)
        .map(str::to_string)
        .collect();

    if !preferred.is_empty() {
        return preferred;
    }

    available
        .iter()
        .take(MAX_DEFAULT_COUNTRIES)
        .cloned()
        .collect()
}
