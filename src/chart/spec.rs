use std::f64::consts::TAU;

use eframe::egui::Color32;

use crate::color::{generate_palette, ramp};
use crate::config::WordCloudConfig;
use crate::data::aggregate::Tally;
use crate::data::model::TitleRecord;

// ---------------------------------------------------------------------------
// Chart specifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

/// Bars are drawn in order: position 0, 1, 2 … along the category axis.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub title: String,
    pub category_axis: String,
    pub value_axis: String,
    pub orientation: Orientation,
    pub bars: Vec<BarSpec>,
    /// Print the value next to every bar.
    pub value_labels: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChartSpec {
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    /// `[x, y]` in ascending x.
    pub points: Vec<[f64; 2]>,
    pub markers: bool,
    pub color: Color32,
}

/// One pie slice. Angles are radians measured clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub fraction: f64,
    pub start_angle: f64,
    pub sweep: f64,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChartSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// Input handed to the word-cloud layout: raw text plus canvas settings.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudRequest {
    pub text: String,
    pub width: f32,
    pub height: f32,
    pub max_words: usize,
    pub max_font_size: f32,
    pub min_font_size: f32,
}

// ---------------------------------------------------------------------------
// Presenters: aggregation result → chart specification
// ---------------------------------------------------------------------------

/// One coloured vertical bar per content type, in tally order.
pub fn type_bar_chart(tally: &Tally) -> BarChartSpec {
    let colors = generate_palette(tally.len());
    BarChartSpec {
        title: "Total Movies vs TV Shows".into(),
        category_axis: "Type".into(),
        value_axis: "Number of Titles".into(),
        orientation: Orientation::Vertical,
        bars: tally
            .entries
            .iter()
            .zip(colors)
            .map(|((label, count), color)| BarSpec {
                label: label.clone(),
                value: *count as f64,
                color,
            })
            .collect(),
        value_labels: true,
    }
}

/// Horizontal bars in tally order, coloured by value.
pub fn country_bar_chart(tally: &Tally) -> BarChartSpec {
    let min = tally.entries.iter().map(|(_, n)| *n).min().unwrap_or(0) as f64;
    let max = tally.entries.iter().map(|(_, n)| *n).max().unwrap_or(0) as f64;
    BarChartSpec {
        title: format!("Top {} Countries", tally.len()),
        category_axis: "Country".into(),
        value_axis: "Number of Titles".into(),
        orientation: Orientation::Horizontal,
        bars: tally
            .entries
            .iter()
            .map(|(label, count)| BarSpec {
                label: label.clone(),
                value: *count as f64,
                color: ramp(*count as f64, min, max),
            })
            .collect(),
        value_labels: false,
    }
}

/// Titles added per year with point markers. Missing years stay missing.
pub fn growth_line_chart(series: &[(i32, u64)]) -> LineChartSpec {
    LineChartSpec {
        title: "Content Added Per Year".into(),
        x_axis: "Year".into(),
        y_axis: "Number of Titles".into(),
        points: series
            .iter()
            .map(|&(year, count)| [year as f64, count as f64])
            .collect(),
        markers: true,
        color: Color32::from_rgb(229, 9, 20),
    }
}

/// One slice per genre weighted by its count.
pub fn genre_pie_chart(tally: &Tally) -> PieChartSpec {
    let total = tally.total();
    let colors = generate_palette(tally.len());
    let mut slices = Vec::with_capacity(tally.len());

    if total > 0 {
        let mut start_angle = 0.0;
        for ((label, count), color) in tally.entries.iter().zip(colors) {
            let fraction = *count as f64 / total as f64;
            let sweep = fraction * TAU;
            slices.push(PieSlice {
                label: label.clone(),
                value: *count,
                fraction,
                start_angle,
                sweep,
                color,
            });
            start_angle += sweep;
        }
    }

    PieChartSpec {
        title: format!("Top {} Genres", slices.len()),
        slices,
    }
}

/// The space-joined raw genre cells of `records`; tokenizing is left to the
/// word-cloud layout.
pub fn genre_cloud_request<'a, I>(records: I, config: &WordCloudConfig) -> WordCloudRequest
where
    I: IntoIterator<Item = &'a TitleRecord>,
{
    let text = records
        .into_iter()
        .filter_map(|r| r.listed_in.as_deref())
        .collect::<Vec<_>>()
        .join(" ");
    WordCloudRequest {
        text,
        width: config.width,
        height: config.height,
        max_words: config.max_words,
        max_font_size: config.max_font_size,
        min_font_size: config.min_font_size,
    }
}
