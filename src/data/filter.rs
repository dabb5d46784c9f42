use std::collections::BTreeSet;
use std::fmt;

use super::model::{TitleRecord, TitleTable};

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// A single-valued filter choice. `All` places no constraint on the field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str("All"),
            Choice::Only(v) => write!(f, "{v}"),
        }
    }
}

/// The three user selections driving the filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub year: Choice<i32>,
    pub country: Choice<String>,
    /// Genre search text; empty means no filter.
    pub genre: String,
}

impl FilterSelection {
    /// Whether every predicate is a pass-through.
    pub fn is_identity(&self) -> bool {
        self.year == Choice::All && self.country == Choice::All && self.genre.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Whether a record satisfies every active predicate.
///
/// * year    – exact match on `year_added`; a missing year never matches
/// * country – exact string equality on the raw cell, so `"India, Japan"`
///   does not match `"India"`
/// * genre   – case-insensitive substring of the raw `listed_in`
pub fn matches(record: &TitleRecord, selection: &FilterSelection) -> bool {
    if let Choice::Only(year) = selection.year {
        if record.year_added != Some(year) {
            return false;
        }
    }
    if let Choice::Only(country) = &selection.country {
        if record.country.as_deref() != Some(country.as_str()) {
            return false;
        }
    }
    if !selection.genre.is_empty() {
        let needle = selection.genre.to_lowercase();
        match &record.listed_in {
            Some(genres) if genres.to_lowercase().contains(&needle) => {}
            _ => return false,
        }
    }
    true
}

/// Return the records passing `selection`, in input order.
pub fn filter_records<'a, I>(records: I, selection: &FilterSelection) -> Vec<&'a TitleRecord>
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    records
        .into_iter()
        .filter(|r| matches(r, selection))
        .collect()
}

/// The filtered view of the base table. Always derived from the whole table.
pub fn filtered_view<'a>(table: &'a TitleTable, selection: &FilterSelection) -> Vec<&'a TitleRecord> {
    filter_records(&table.records, selection)
}

// ---------------------------------------------------------------------------
// Options offered by the selection widgets
// ---------------------------------------------------------------------------

/// `All` followed by the distinct present years, ascending.
pub fn year_options(table: &TitleTable) -> Vec<Choice<i32>> {
    let years: BTreeSet<i32> = table.records.iter().filter_map(|r| r.year_added).collect();
    std::iter::once(Choice::All)
        .chain(years.into_iter().map(Choice::Only))
        .collect()
}

/// `All` followed by the distinct raw country cells, sorted.
pub fn country_options(table: &TitleTable) -> Vec<Choice<String>> {
    let countries: BTreeSet<&str> = table
        .records
        .iter()
        .filter_map(|r| r.country.as_deref())
        .collect();
    std::iter::once(Choice::All)
        .chain(countries.into_iter().map(|c| Choice::Only(c.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, table, three_titles};

    fn selection(year: Option<i32>, country: Option<&str>, genre: &str) -> FilterSelection {
        FilterSelection {
            year: year.map_or(Choice::All, Choice::Only),
            country: country.map_or(Choice::All, |c| Choice::Only(c.to_string())),
            genre: genre.to_string(),
        }
    }

    fn varied() -> TitleTable {
        table(vec![
            record("Movie", Some("India, United Kingdom"), Some("2019-01-05"), Some("Dramas, Comedies")),
            record("Movie", Some("India"), Some("2019-02-01"), Some("International Movies")),
            record("TV Show", None, None, Some("Kids' TV")),
            record("TV Show", Some("India"), Some("2020-06-12"), None),
            record("Movie", Some("United States"), Some("2019-08-21"), Some("Stand-Up Comedy")),
        ])
    }

    #[test]
    fn all_selections_are_identity() {
        let t = varied();
        let sel = FilterSelection::default();
        assert!(sel.is_identity());
        let view = filtered_view(&t, &sel);
        assert_eq!(view.len(), t.len());
        assert!(view.iter().zip(&t.records).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = varied();
        let selections = [
            selection(Some(2019), None, ""),
            selection(None, Some("India"), ""),
            selection(None, None, "comed"),
            selection(Some(2019), Some("India"), "inter"),
            selection(Some(1990), None, ""),
        ];
        for sel in &selections {
            let once = filtered_view(&t, sel);
            let twice = filter_records(once.iter().copied(), sel);
            assert_eq!(once, twice, "selection {sel:?}");
        }
    }

    #[test]
    fn country_is_exact_match() {
        let t = varied();
        let view = filtered_view(&t, &selection(None, Some("India"), ""));
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.country.as_deref() == Some("India")));
    }

    #[test]
    fn genre_is_case_insensitive_substring() {
        let t = table(vec![record("Movie", None, None, Some("Dramas, Comedies"))]);
        assert_eq!(filtered_view(&t, &selection(None, None, "drama")).len(), 1);
        assert_eq!(filtered_view(&t, &selection(None, None, "COMEDIES")).len(), 1);
        assert_eq!(filtered_view(&t, &selection(None, None, "horror")).len(), 0);
    }

    #[test]
    fn missing_fields_never_match_active_filters() {
        let t = varied();
        // The undated, country-less title never survives a year or country filter.
        for sel in [
            selection(Some(2019), None, ""),
            selection(None, Some("India"), ""),
        ] {
            assert!(filtered_view(&t, &sel)
                .iter()
                .all(|r| !(r.country.is_none() && r.year_added.is_none())));
        }
        // A record without genres never matches a genre search.
        let view = filtered_view(&t, &selection(Some(2020), None, "a"));
        assert!(view.is_empty());
    }

    #[test]
    fn predicates_are_conjunctive() {
        let t = varied();
        let view = filtered_view(&t, &selection(Some(2019), Some("India"), ""));
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].listed_in.as_deref(), Some("International Movies"));
    }

    #[test]
    fn year_filter_on_example_catalog() {
        let t = three_titles();
        assert_eq!(filtered_view(&t, &selection(Some(2020), None, "")).len(), 2);
    }

    #[test]
    fn widget_options_are_sorted_and_start_with_all() {
        let t = varied();
        assert_eq!(
            year_options(&t),
            vec![Choice::All, Choice::Only(2019), Choice::Only(2020)]
        );
        let countries: Vec<String> = country_options(&t).iter().map(ToString::to_string).collect();
        assert_eq!(
            countries,
            vec!["All", "India", "India, United Kingdom", "United States"]
        );
    }

    #[test]
    fn empty_table_has_only_all_options() {
        let t = table(Vec::new());
        assert_eq!(year_options(&t), vec![Choice::All]);
        assert_eq!(country_options(&t), vec![Choice::All]);
        assert!(filtered_view(&t, &FilterSelection::default()).is_empty());
    }
}
