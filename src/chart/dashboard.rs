use super::cloud::{layout, WordCloud};
use super::spec::{
    country_bar_chart, genre_cloud_request, genre_pie_chart, growth_line_chart, type_bar_chart,
    BarChartSpec, LineChartSpec, PieChartSpec,
};
use crate::config::DashboardConfig;
use crate::data::aggregate::{top_countries, top_genres, type_counts, year_series};
use crate::data::filter::{filtered_view, FilterSelection};
use crate::data::model::{TitleRecord, TitleTable};

// ---------------------------------------------------------------------------
// Preview – head of the filtered view
// ---------------------------------------------------------------------------

/// The first rows of the filtered view as display strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Preview {
    pub fn new(table: &TitleTable, view: &[&TitleRecord], max_rows: usize) -> Self {
        let width = table.source_columns.len();
        let rows = view
            .iter()
            .take(max_rows)
            .map(|record| {
                let mut row: Vec<String> = (0..width)
                    .map(|i| record.cells.get(i).cloned().flatten().unwrap_or_default())
                    .collect();
                row.push(record.year_added.map(|y| y.to_string()).unwrap_or_default());
                row
            })
            .collect();
        Preview {
            columns: table.display_columns(),
            rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard – everything one render pass shows
// ---------------------------------------------------------------------------

/// One full recomputation: filter, aggregate and present.
///
/// Only the type chart and the preview follow the selection. Countries,
/// yearly growth and the genre pie always describe the whole catalog.
/// The word cloud does too, so it is laid out once per load by
/// [`genre_cloud`] instead of on every pass.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub filtered_count: usize,
    pub preview: Preview,
    pub type_chart: BarChartSpec,
    pub country_chart: BarChartSpec,
    pub growth_chart: LineChartSpec,
    pub genre_chart: PieChartSpec,
}

impl Dashboard {
    pub fn build(base: &TitleTable, selection: &FilterSelection, config: &DashboardConfig) -> Self {
        let view = filtered_view(base, selection);
        log::debug!(
            "Selection {selection:?} keeps {} of {} titles",
            view.len(),
            base.len()
        );

        Dashboard {
            filtered_count: view.len(),
            preview: Preview::new(base, &view, config.preview_rows),
            type_chart: type_bar_chart(&type_counts(view.iter().copied())),
            country_chart: country_bar_chart(&top_countries(&base.records, config.top_n)),
            growth_chart: growth_line_chart(&year_series(&base.records)),
            genre_chart: genre_pie_chart(&top_genres(&base.records, config.top_n)),
        }
    }
}

/// Word cloud of every `listed_in` value in the base table.
pub fn genre_cloud(base: &TitleTable, config: &DashboardConfig) -> WordCloud {
    let cloud = layout(&genre_cloud_request(&base.records, &config.word_cloud));
    log::debug!("Word cloud placed {} words", cloud.words.len());
    cloud
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Choice;
    use crate::data::model::fixtures::{record, table, three_titles};

    fn catalog() -> TitleTable {
        table(vec![
            record("Movie", Some("United States"), Some("2019-01-05"), Some("Dramas, Comedies")),
            record("TV Show", Some("India"), Some("2020-02-01"), Some("International TV Shows, TV Dramas")),
            record("Movie", Some("India"), Some("2020-03-09"), Some("Dramas")),
            record("Movie", Some("Japan"), None, Some("Anime Features")),
            record("TV Show", Some("United States"), Some("2021-12-24"), None),
            record("Movie", Some("India"), Some("2021-04-04"), Some("Comedies, Dramas")),
            record("Movie", Some("United Kingdom"), Some("2019-06-30"), Some("Documentaries")),
        ])
    }

    fn labels(spec: &BarChartSpec) -> Vec<(String, f64)> {
        spec.bars.iter().map(|b| (b.label.clone(), b.value)).collect()
    }

    #[test]
    fn only_type_chart_and_preview_follow_filters() {
        let base = catalog();
        let config = DashboardConfig::default();
        let unfiltered = Dashboard::build(&base, &FilterSelection::default(), &config);

        let selection = FilterSelection {
            year: Choice::Only(2020),
            country: Choice::Only("India".into()),
            genre: "drama".into(),
        };
        let filtered = Dashboard::build(&base, &selection, &config);

        assert_eq!(filtered.filtered_count, 2);
        assert_eq!(
            labels(&filtered.type_chart),
            vec![("TV Show".to_string(), 1.0), ("Movie".to_string(), 1.0)]
        );
        assert_ne!(labels(&filtered.type_chart), labels(&unfiltered.type_chart));
        assert_eq!(filtered.preview.rows.len(), 2);

        assert_eq!(filtered.country_chart, unfiltered.country_chart);
        assert_eq!(filtered.growth_chart, unfiltered.growth_chart);
        assert_eq!(filtered.genre_chart, unfiltered.genre_chart);
    }

    #[test]
    fn base_charts_describe_whole_catalog() {
        let base = catalog();
        let dash = Dashboard::build(&base, &FilterSelection::default(), &DashboardConfig::default());

        assert_eq!(
            labels(&dash.country_chart),
            vec![
                ("India".to_string(), 3.0),
                ("United States".to_string(), 2.0),
                ("Japan".to_string(), 1.0),
                ("United Kingdom".to_string(), 1.0),
            ]
        );
        assert_eq!(
            dash.growth_chart.points,
            vec![[2019.0, 2.0], [2020.0, 2.0], [2021.0, 2.0]]
        );
        assert_eq!(dash.genre_chart.slices[0].label, "Dramas");
        assert_eq!(dash.genre_chart.slices[0].value, 3);
    }

    #[test]
    fn empty_view_renders_empty_outputs() {
        let base = catalog();
        let selection = FilterSelection {
            year: Choice::Only(1999),
            ..Default::default()
        };
        let dash = Dashboard::build(&base, &selection, &DashboardConfig::default());
        assert_eq!(dash.filtered_count, 0);
        assert!(dash.preview.rows.is_empty());
        assert_eq!(dash.preview.columns.len(), 5);
        assert!(dash.type_chart.bars.is_empty());
        assert!(!dash.country_chart.bars.is_empty());
    }

    #[test]
    fn empty_catalog_does_not_fail() {
        let base = table(Vec::new());
        let dash = Dashboard::build(&base, &FilterSelection::default(), &DashboardConfig::default());
        assert!(dash.type_chart.bars.is_empty());
        assert!(dash.country_chart.bars.is_empty());
        assert!(dash.growth_chart.points.is_empty());
        assert!(dash.genre_chart.slices.is_empty());
        assert!(genre_cloud(&base, &DashboardConfig::default()).words.is_empty());
    }

    #[test]
    fn genre_cloud_reads_base_table() {
        let cloud = genre_cloud(&catalog(), &DashboardConfig::default());
        let words: Vec<_> = cloud.words.iter().map(|w| w.text.to_lowercase()).collect();
        assert_eq!(words.first().map(String::as_str), Some("dramas"));
        assert!(words.iter().any(|w| w == "anime"));
    }

    #[test]
    fn preview_shows_first_rows_with_year_column() {
        let base = catalog();
        let dash = Dashboard::build(&base, &FilterSelection::default(), &DashboardConfig::default());
        assert_eq!(dash.preview.rows.len(), 5);
        assert_eq!(
            dash.preview.columns,
            vec!["type", "country", "date_added", "listed_in", "year_added"]
        );
        assert_eq!(
            dash.preview.rows[3],
            vec!["Movie", "Japan", "", "Anime Features", ""]
        );
        assert_eq!(dash.preview.rows[0][4], "2019");
    }

    #[test]
    fn example_catalog_pins_inputs() {
        let base = three_titles();
        let selection = FilterSelection {
            year: Choice::Only(2020),
            ..Default::default()
        };
        let dash = Dashboard::build(&base, &selection, &DashboardConfig::default());
        assert_eq!(labels(&dash.type_chart), vec![("Movie".to_string(), 2.0)]);
        let genres: Vec<_> = dash
            .genre_chart
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect();
        assert_eq!(genres, vec![("Drama", 3), ("Comedy", 1)]);
    }
}
