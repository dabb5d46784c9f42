use std::collections::{BTreeMap, HashMap};

use super::model::TitleRecord;

/// Separator between the genres of one `listed_in` cell.
pub const GENRE_DELIMITER: &str = ", ";

// ---------------------------------------------------------------------------
// Tally – ordered label → count
// ---------------------------------------------------------------------------

/// An ordered category → count mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tally {
    pub entries: Vec<(String, u64)>,
}

impl Tally {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, n)| *n)
    }
}

/// Counts in first-appearance order, sorted descending by count.
/// The sort is stable so ties keep the order in which labels first appeared.
#[derive(Default)]
struct Counter {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl Counter {
    fn add(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), 1));
            }
        }
    }

    fn into_tally(self, top_n: Option<usize>) -> Tally {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = top_n {
            entries.truncate(n);
        }
        Tally { entries }
    }
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Frequency of each distinct non-missing value, most frequent first,
/// optionally keeping only the `top_n` largest.
pub fn value_counts<'a, I>(values: I, top_n: Option<usize>) -> Tally
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counter = Counter::default();
    for value in values.into_iter().flatten() {
        counter.add(value);
    }
    counter.into_tally(top_n)
}

/// Frequency of the individual tokens of delimited values. Each value is
/// split on `delimiter`, tokens are trimmed and empty tokens skipped.
pub fn token_counts<'a, I>(values: I, delimiter: &str, top_n: Option<usize>) -> Tally
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counter = Counter::default();
    for value in values.into_iter().flatten() {
        for token in value.split(delimiter).map(str::trim) {
            if !token.is_empty() {
                counter.add(token);
            }
        }
    }
    counter.into_tally(top_n)
}

/// Number of records per `year_added`, ascending by year. Records without a
/// year are left out; years with no records are simply absent.
pub fn year_series<'a, I>(records: I) -> Vec<(i32, u64)>
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    let mut per_year: BTreeMap<i32, u64> = BTreeMap::new();
    for year in records.into_iter().filter_map(|r| r.year_added) {
        *per_year.entry(year).or_default() += 1;
    }
    per_year.into_iter().collect()
}

// -- Column helpers used by the dashboard --

/// Title counts per content type. Unbounded.
pub fn type_counts<'a, I>(records: I) -> Tally
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    value_counts(records.into_iter().map(|r| Some(r.kind.label())), None)
}

/// The `top_n` most frequent raw country cells.
pub fn top_countries<'a, I>(records: I, top_n: usize) -> Tally
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    value_counts(records.into_iter().map(|r| r.country.as_deref()), Some(top_n))
}

/// The `top_n` most frequent individual genres.
pub fn top_genres<'a, I>(records: I, top_n: usize) -> Tally
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    token_counts(
        records.into_iter().map(|r| r.listed_in.as_deref()),
        GENRE_DELIMITER,
        Some(top_n),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_view, Choice, FilterSelection};
    use crate::data::model::fixtures::{record, table, three_titles};

    #[test]
    fn value_counts_orders_by_frequency_then_first_appearance() {
        let values = [Some("b"), Some("a"), None, Some("a"), Some("c"), Some("b"), Some("d")];
        let tally = value_counts(values, None);
        assert_eq!(
            tally.entries,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
        assert_eq!(tally.total(), 6);
        assert_eq!(value_counts(values, Some(1)).len(), 1);
    }

    #[test]
    fn token_counts_split_and_trim() {
        let values = [Some("Dramas, Comedies"), Some(" Comedies ,  Horror"), None, Some("")];
        let tally = token_counts(values, GENRE_DELIMITER, None);
        assert_eq!(tally.get("Comedies"), Some(2));
        assert_eq!(tally.get("Dramas"), Some(1));
        assert_eq!(tally.get("Horror"), Some(1));
        assert_eq!(tally.len(), 3);
    }

    #[test]
    fn multi_country_cells_are_not_exploded() {
        let t = table(vec![
            record("Movie", Some("India, United Kingdom"), None, None),
            record("Movie", Some("India"), None, None),
            record("Movie", None, None, None),
        ]);
        let tally = top_countries(&t.records, 10);
        assert_eq!(tally.get("India"), Some(1));
        assert_eq!(tally.get("India, United Kingdom"), Some(1));
        assert_eq!(tally.total(), 2);
    }

    #[test]
    fn top_n_truncates() {
        let records: Vec<_> = (0..15)
            .map(|i| record("Movie", Some(&format!("Country {i}")), None, None))
            .collect();
        assert_eq!(top_countries(&records, 10).len(), 10);
        assert_eq!(top_countries(&records, 20).len(), 15);
    }

    #[test]
    fn year_series_is_chronological() {
        let t = table(vec![
            record("Movie", None, Some("2021-01-01"), None),
            record("Movie", None, Some("2018-01-01"), None),
            record("Movie", None, Some("2021-05-01"), None),
            record("Movie", None, Some("2021-09-01"), None),
            record("Movie", None, None, None),
            record("Movie", None, Some("2015-01-01"), None),
        ]);
        // 2021 is the most frequent year but stays last.
        assert_eq!(year_series(&t.records), vec![(2015, 1), (2018, 1), (2021, 3)]);
    }

    #[test]
    fn empty_input_yields_empty_results() {
        let records: Vec<TitleRecord> = Vec::new();
        assert!(type_counts(&records).is_empty());
        assert!(top_countries(&records, 10).is_empty());
        assert!(top_genres(&records, 10).is_empty());
        assert!(year_series(&records).is_empty());
    }

    #[test]
    fn example_catalog() {
        let t = three_titles();
        let selection = FilterSelection {
            year: Choice::Only(2020),
            ..Default::default()
        };
        let view = filtered_view(&t, &selection);
        assert_eq!(view.len(), 2);
        assert_eq!(type_counts(view).entries, vec![("Movie".to_string(), 2)]);

        let genres = top_genres(&t.records, 10);
        assert_eq!(
            genres.entries,
            vec![("Drama".to_string(), 3), ("Comedy".to_string(), 1)]
        );
    }
}
