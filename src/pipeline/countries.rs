use std::collections::BTreeSet;

use crate::dataset::Dataset;
use crate::models::ContinentFilter;

/// Sorted distinct locations whose continent matches `continent`. Rows with no
/// continent (aggregates such as "World") only show up under `All`.
pub fn available_countries(dataset: &Dataset, continent: &ContinentFilter) -> Vec<String> {
    dataset
        .records()
        .iter()
        .filter(|r| continent.matches(r.continent.as_deref()))
        .map(|r| r.location.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Options for the continent picker: `All` first, then each continent.
pub fn continent_options(dataset: &Dataset) -> Vec<ContinentFilter> {
    std::iter::once(ContinentFilter::All)
        .chain(dataset.continents().into_iter().map(ContinentFilter::Named))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::sample;

    #[test]
    fn all_includes_rows_without_continent() {
        let all = available_countries(&sample(), &ContinentFilter::All);
        assert_eq!(all, vec!["A", "B", "C", "World"]);
    }

    #[test]
    fn named_continent_is_sorted_and_deduplicated() {
        let europe = available_countries(&sample(), &ContinentFilter::Named("Europe".into()));
        assert_eq!(europe, vec!["A", "C"]);
        assert!(available_countries(&sample(), &ContinentFilter::Named("Oceania".into())).is_empty());
    }

    #[test]
    fn continents_partition_all_minus_null_rows() {
        let dataset = sample();
        let all: BTreeSet<String> = available_countries(&dataset, &ContinentFilter::All)
            .into_iter()
            .collect();

        let mut union = BTreeSet::new();
        for option in continent_options(&dataset).into_iter().skip(1) {
            let countries = available_countries(&dataset, &option);
            assert!(countries.iter().all(|c| all.contains(c)));
            union.extend(countries);
        }

        let expected: BTreeSet<String> = all.into_iter().filter(|c| c != "World").collect();
        assert_eq!(union, expected);
    }

    #[test]
    fn options_start_with_all() {
        assert_eq!(
            continent_options(&sample()),
            vec![
                ContinentFilter::All,
                ContinentFilter::Named("Asia".into()),
                ContinentFilter::Named("Europe".into()),
            ]
        );
    }
}
