use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::Choice;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Year ----
    ui.strong("Select Year");
    let mut year = state.selection.year.clone();
    egui::ComboBox::from_id_salt("year_filter")
        .selected_text(year.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.year_options {
                ui.selectable_value(&mut year, option.clone(), option.to_string());
            }
        });
    state.set_year(year);
    ui.add_space(6.0);

    // ---- Country ----
    ui.strong("Select Country");
    let mut country = state.selection.country.clone();
    egui::ComboBox::from_id_salt("country_filter")
        .selected_text(country.to_string())
        .width(ui.available_width())
        .height(400.0)
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.country_options {
                ui.selectable_value(&mut country, option.clone(), option.to_string());
            }
        });
    state.set_country(country);
    ui.add_space(6.0);

    // ---- Genre ----
    ui.strong("Search Genre");
    let mut genre = state.selection.genre.clone();
    let response = ui.add(
        egui::TextEdit::singleline(&mut genre).hint_text("e.g. Drama, Comedy"),
    );
    if response.changed() {
        state.set_genre(genre);
    }

    ui.add_space(10.0);
    ui.separator();

    if ui
        .add_enabled(!state.selection.is_identity(), egui::Button::new("Clear filters"))
        .clicked()
    {
        state.clear_filters();
    }

    if let Choice::Only(country) = &state.selection.country {
        if country.contains(',') {
            ui.label(
                RichText::new("Multi-country entries match only this exact list.")
                    .small()
                    .weak(),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(dash)) = (&state.dataset, &state.dashboard) {
            ui.label(format!(
                "{} titles loaded, {} match the filters",
                ds.len(),
                dash.filtered_count
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open catalog")
        .add_filter("Supported files", &["csv", "tsv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
