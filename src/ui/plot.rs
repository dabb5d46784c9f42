use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{
    self, pos2, vec2, Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui,
};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::chart::cloud::WordCloud;
use crate::chart::dashboard::Dashboard;
use crate::chart::spec::{BarChartSpec, LineChartSpec, Orientation, PieChartSpec};
use crate::state::AppState;
use crate::ui::table;

const CHART_HEIGHT: f32 = 320.0;
const PIE_RADIUS: f32 = 150.0;
/// Largest arc drawn as one convex polygon.
const PIE_CHUNK: f64 = 0.25;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the preview and every chart of the current dashboard.
pub fn dashboard_view(ui: &mut Ui, state: &AppState) {
    let Some(dash) = &state.dashboard else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let text = if state.status_message.is_some() {
                "The catalog could not be loaded. Open another file (File → Open…)"
            } else {
                "Open a catalog to start  (File → Open…)"
            };
            ui.heading(text);
        });
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            sections(ui, dash, state.cloud.as_ref());
        });
}

fn sections(ui: &mut Ui, dash: &Dashboard, cloud: Option<&WordCloud>) {
    ui.heading("Filtered Dataset Preview");
    table::preview_table(ui, &dash.preview);
    ui.add_space(12.0);

    ui.heading("Total Movies vs TV Shows");
    if dash.type_chart.bars.is_empty() {
        ui.label(RichText::new("No titles match the current filters.").weak());
    }
    bar_chart(ui, "type_chart", &dash.type_chart);
    ui.add_space(12.0);

    ui.heading("Top Countries Producing Most Titles");
    bar_chart(ui, "country_chart", &dash.country_chart);
    ui.add_space(12.0);

    ui.heading("Content Growth Over Years");
    line_chart(ui, "growth_chart", &dash.growth_chart);
    ui.add_space(12.0);

    ui.heading("Top Genres");
    pie_chart(ui, &dash.genre_chart);
    ui.add_space(12.0);

    egui::CollapsingHeader::new(RichText::new("Genre Word Cloud").strong())
        .id_salt("word_cloud")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            match cloud {
                Some(cloud) => word_cloud(ui, cloud),
                None => {
                    ui.label(RichText::new("No genre text to show.").weak());
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Label of the category drawn at `position`, empty between categories.
fn category_label(labels: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

fn bar_chart(ui: &mut Ui, id: &str, spec: &BarChartSpec) {
    let bars: Vec<Bar> = spec
        .bars
        .iter()
        .enumerate()
        .map(|(i, b)| Bar::new(i as f64, b.value).name(&b.label).fill(b.color).width(0.6))
        .collect();

    let mut chart = BarChart::new(bars).name(&spec.title);
    let labels: Vec<String> = spec.bars.iter().map(|b| b.label.clone()).collect();
    let categories = move |mark: GridMark, _range: &RangeInclusive<f64>| category_label(&labels, mark.value);

    let mut plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false);

    plot = match spec.orientation {
        Orientation::Vertical => plot
            .x_axis_label(&spec.category_axis)
            .y_axis_label(&spec.value_axis)
            .x_axis_formatter(categories)
            .include_y(0.0),
        Orientation::Horizontal => {
            chart = chart.horizontal();
            plot.x_axis_label(&spec.value_axis)
                .y_axis_label(&spec.category_axis)
                .y_axis_formatter(categories)
                .include_x(0.0)
        }
    };

    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(chart);
        if spec.value_labels {
            for (i, b) in spec.bars.iter().enumerate() {
                let text = Text::new(
                    PlotPoint::new(i as f64, b.value),
                    RichText::new(format!("{}", b.value)).strong(),
                )
                .anchor(Align2::CENTER_BOTTOM);
                plot_ui.text(text);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Line chart
// ---------------------------------------------------------------------------

fn line_chart(ui: &mut Ui, id: &str, spec: &LineChartSpec) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(&spec.x_axis)
        .y_axis_label(&spec.y_axis)
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            if mark.value.fract() == 0.0 {
                format!("{:.0}", mark.value)
            } else {
                String::new()
            }
        })
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(spec.points.clone()))
                .name(&spec.title)
                .color(spec.color)
                .width(2.0);
            plot_ui.line(line);
            if spec.markers {
                plot_ui.points(
                    Points::new(PlotPoints::from(spec.points.clone()))
                        .radius(4.0)
                        .color(spec.color),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Angle of `offset` measured clockwise from 12 o'clock, in `[0, TAU)`.
fn clockwise_angle(offset: egui::Vec2) -> f64 {
    let angle = (offset.x as f64).atan2(-(offset.y as f64));
    angle.rem_euclid(TAU)
}

/// Index of the slice covering `angle`.
fn slice_at(spec: &PieChartSpec, angle: f64) -> Option<usize> {
    spec.slices
        .iter()
        .position(|s| angle >= s.start_angle && angle < s.start_angle + s.sweep)
}

fn arc_point(center: Pos2, radius: f32, angle: f64) -> Pos2 {
    pos2(
        center.x + radius * angle.sin() as f32,
        center.y - radius * angle.cos() as f32,
    )
}

fn pie_chart(ui: &mut Ui, spec: &PieChartSpec) {
    if spec.slices.is_empty() {
        ui.label(RichText::new("No genres to show.").weak());
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) =
            ui.allocate_painter(vec2(PIE_RADIUS * 2.0 + 20.0, PIE_RADIUS * 2.0 + 20.0), Sense::hover());
        let center = response.rect.center();

        for slice in &spec.slices {
            let chunks = (slice.sweep / PIE_CHUNK).ceil().max(1.0) as usize;
            let step = slice.sweep / chunks as f64;
            for c in 0..chunks {
                let from = slice.start_angle + step * c as f64;
                let mut points = vec![center];
                for k in 0..=4 {
                    points.push(arc_point(center, PIE_RADIUS, from + step * k as f64 / 4.0));
                }
                painter.add(Shape::convex_polygon(points, slice.color, Stroke::NONE));
            }
            painter.line_segment(
                [center, arc_point(center, PIE_RADIUS, slice.start_angle)],
                Stroke::new(1.0, Color32::WHITE),
            );
        }

        if let Some(pointer) = response.hover_pos() {
            let offset = pointer - center;
            if offset.length() <= PIE_RADIUS {
                if let Some(i) = slice_at(spec, clockwise_angle(offset)) {
                    let slice = &spec.slices[i];
                    response.on_hover_text(format!(
                        "{}: {} ({:.1}%)",
                        slice.label,
                        slice.value,
                        slice.fraction * 100.0
                    ));
                }
            }
        }

        // ---- Legend ----
        ui.vertical(|ui: &mut Ui| {
            ui.strong(&spec.title);
            for slice in &spec.slices {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, slice.color);
                    ui.label(format!("{}  {:.1}%", slice.label, slice.fraction * 100.0));
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Word cloud
// ---------------------------------------------------------------------------

fn word_cloud(ui: &mut Ui, cloud: &WordCloud) {
    if cloud.words.is_empty() {
        ui.label(RichText::new("No genre text to show.").weak());
        return;
    }

    let scale = (ui.available_width() / cloud.width).min(1.0);
    let (response, painter) =
        ui.allocate_painter(vec2(cloud.width, cloud.height) * scale, Sense::hover());
    let origin = response.rect.min;

    painter.rect_filled(response.rect, 4.0, Color32::WHITE);
    for word in &cloud.words {
        painter.text(
            origin + word.rect.center().to_vec2() * scale,
            Align2::CENTER_CENTER,
            &word.text,
            FontId::proportional(word.font_size * scale),
            word.color,
        );
    }
}
