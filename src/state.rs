use std::path::Path;
use std::sync::Arc;

use crate::chart::cloud::WordCloud;
use crate::chart::dashboard::{genre_cloud, Dashboard};
use crate::config::DashboardConfig;
use crate::data::filter::{country_options, year_options, Choice, FilterSelection};
use crate::data::loader::load_file;
use crate::data::model::TitleTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Base table (None until a file loaded successfully).
    pub dataset: Option<Arc<TitleTable>>,

    /// Current year / country / genre selections.
    pub selection: FilterSelection,

    /// Choices offered by the year and country selectors.
    pub year_options: Vec<Choice<i32>>,
    pub country_options: Vec<Choice<String>>,

    /// Output of the latest filter → aggregate → present pass.
    pub dashboard: Option<Dashboard>,

    /// Genre word cloud of the base table, laid out once per load.
    pub cloud: Option<WordCloud>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            selection: FilterSelection::default(),
            year_options: Vec::new(),
            country_options: Vec::new(),
            dashboard: None,
            cloud: None,
            status_message: None,
        }
    }

    /// Load a catalog file, replacing the current one on success. On failure
    /// the error is kept for display and the previous table is dropped.
    pub fn load(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => self.set_dataset(table),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                self.dataset = None;
                self.dashboard = None;
                self.cloud = None;
                self.year_options.clear();
                self.country_options.clear();
            }
        }
    }

    /// Ingest a newly loaded base table, reset selections and recompute.
    pub fn set_dataset(&mut self, table: TitleTable) {
        if table.is_empty() {
            log::warn!("Catalog has no titles; every chart will be empty");
        }
        self.cloud = Some(genre_cloud(&table, &self.config));
        self.year_options = year_options(&table);
        self.country_options = country_options(&table);
        self.selection = FilterSelection::default();
        self.dataset = Some(Arc::new(table));
        self.status_message = None;
        self.refresh();
    }

    /// Recompute the dashboard from the base table and current selections.
    pub fn refresh(&mut self) {
        self.dashboard = self
            .dataset
            .as_ref()
            .map(|base| Dashboard::build(base, &self.selection, &self.config));
    }

    pub fn set_year(&mut self, year: Choice<i32>) {
        if self.selection.year != year {
            log::debug!("Year filter: {year}");
            self.selection.year = year;
            self.refresh();
        }
    }

    pub fn set_country(&mut self, country: Choice<String>) {
        if self.selection.country != country {
            log::debug!("Country filter: {country}");
            self.selection.country = country;
            self.refresh();
        }
    }

    pub fn set_genre(&mut self, genre: String) {
        if self.selection.genre != genre {
            log::debug!("Genre search: {genre:?}");
            self.selection.genre = genre;
            self.refresh();
        }
    }

    /// Back to `All` / `All` / empty search.
    pub fn clear_filters(&mut self) {
        if !self.selection.is_identity() {
            self.selection = FilterSelection::default();
            self.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::three_titles;

    fn loaded() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(three_titles());
        state
    }

    #[test]
    fn new_dataset_builds_dashboard_and_options() {
        let state = loaded();
        let dash = state.dashboard.as_ref().expect("dashboard");
        assert_eq!(dash.filtered_count, 3);
        assert_eq!(
            state.year_options,
            vec![Choice::All, Choice::Only(2020), Choice::Only(2021)]
        );
        assert_eq!(state.country_options.len(), 3);
    }

    #[test]
    fn changing_one_filter_recomputes_from_base() {
        let mut state = loaded();
        state.set_year(Choice::Only(2021));
        assert_eq!(state.dashboard.as_ref().unwrap().filtered_count, 1);

        // Switching year must not compound with the previous view.
        state.set_year(Choice::Only(2020));
        assert_eq!(state.dashboard.as_ref().unwrap().filtered_count, 2);

        state.set_country(Choice::Only("IN".into()));
        assert_eq!(state.dashboard.as_ref().unwrap().filtered_count, 1);

        state.set_genre("comedy".into());
        assert_eq!(state.dashboard.as_ref().unwrap().filtered_count, 0);

        state.clear_filters();
        assert_eq!(state.dashboard.as_ref().unwrap().filtered_count, 3);
    }

    #[test]
    fn word_cloud_is_laid_out_once_per_load() {
        let mut state = loaded();
        let cloud = state.cloud.clone().expect("cloud");
        assert!(!cloud.words.is_empty());

        state.set_year(Choice::Only(2021));
        state.set_country(Choice::Only("IN".into()));
        state.set_genre("comedy".into());
        assert_eq!(state.cloud.as_ref(), Some(&cloud));

        state.set_dataset(TitleTable::new(Vec::new(), Vec::new()));
        assert!(state.cloud.as_ref().is_some_and(|c| c.words.is_empty()));
    }

    #[test]
    fn new_dataset_resets_selection() {
        let mut state = loaded();
        state.set_genre("drama".into());
        state.set_dataset(three_titles());
        assert!(state.selection.is_identity());
    }

    #[test]
    fn failed_load_reports_and_clears() {
        let mut state = loaded();
        state.load(Path::new("/no/such/catalog.csv"));
        assert!(state.dataset.is_none());
        assert!(state.dashboard.is_none());
        assert!(state.cloud.is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error")));
    }
}
