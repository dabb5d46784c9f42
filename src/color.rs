use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Continuous ramp: value → Color32
// ---------------------------------------------------------------------------

/// Colour for `value` on a cool-to-warm ramp spanning `[min, max]`.
/// A degenerate range maps everything to the warm end.
pub fn ramp(value: f64, min: f64, max: f64) -> Color32 {
    let range = max - min;
    let t = if range.abs() < f64::EPSILON {
        1.0
    } else {
        ((value - min) / range).clamp(0.0, 1.0) as f32
    };
    // Hue runs blue → violet → red, skipping green.
    let hue = 240.0 + 130.0 * t;
    to_color32(Hsl::new(hue, 0.8, 0.45 + 0.05 * t))
}

fn to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
