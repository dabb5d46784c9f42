use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::chart::dashboard::Preview;

const ROW_HEIGHT: f32 = 20.0;

/// Render the head of the filtered view as a striped grid.
pub fn preview_table(ui: &mut Ui, preview: &Preview) {
    if preview.rows.is_empty() {
        ui.label(RichText::new("No titles match the current filters.").weak());
    }

    egui::ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .columns(
                    Column::initial(140.0).at_least(40.0).clip(true).resizable(true),
                    preview.columns.len(),
                )
                .header(ROW_HEIGHT, |mut header| {
                    for name in &preview.columns {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|mut body| {
                    for row in &preview.rows {
                        body.row(ROW_HEIGHT, |mut table_row| {
                            for cell in row {
                                table_row.col(|ui| {
                                    ui.add(egui::Label::new(cell).truncate());
                                });
                            }
                        });
                    }
                });
        });
}
