use std::collections::HashMap;

use eframe::egui::{pos2, vec2, Color32, Pos2, Rect, Vec2};

use super::spec::WordCloudRequest;
use crate::color::generate_palette;

/// Words never shown in the cloud.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "for", "from", "in", "into", "is", "of", "on", "or",
    "the", "to", "with",
];

/// Glyph box approximation relative to the font size.
const CHAR_WIDTH: f32 = 0.55;
const LINE_HEIGHT: f32 = 1.15;

/// Font sizes tried per word shrink by this factor when a word does not fit.
const SHRINK: f32 = 0.85;
const SPIRAL_STEP: f32 = 0.1;
const SPIRAL_GROWTH: f32 = 1.5;
const PALETTE_SIZE: usize = 8;

/// A word with its position on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: u64,
    pub font_size: f32,
    /// Bounding box in canvas coordinates (origin top-left).
    pub rect: Rect,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WordCloud {
    pub width: f32,
    pub height: f32,
    pub words: Vec<PlacedWord>,
}

// ---------------------------------------------------------------------------
// Word frequencies
// ---------------------------------------------------------------------------

/// Split `text` into words: a letter or digit followed by letters, digits
/// or apostrophes. Trailing apostrophes and possessive `'s` are dropped.
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_start_matches('\''))
        .map(|w| w.strip_suffix("'s").unwrap_or(w).trim_end_matches('\''))
        .filter(|w| w.chars().count() > 1)
}

/// Count words case-insensitively, most frequent first (ties in order of
/// first appearance), keeping at most `max_words`. Each word is reported in
/// its most frequent spelling.
pub fn word_frequencies(text: &str, max_words: usize) -> Vec<(String, u64)> {
    struct Entry {
        count: u64,
        spellings: Vec<(String, u64)>,
    }

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, Entry> = HashMap::new();

    for word in words(text) {
        let key = word.to_lowercase();
        if STOP_WORDS.contains(&key.as_str()) {
            continue;
        }
        let entry = counts.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Entry {
                count: 0,
                spellings: Vec::new(),
            }
        });
        entry.count += 1;
        match entry.spellings.iter_mut().find(|(s, _)| s == word) {
            Some((_, n)) => *n += 1,
            None => entry.spellings.push((word.to_string(), 1)),
        }
    }

    let mut result: Vec<(String, u64)> = order
        .iter()
        .filter_map(|key| counts.get(key))
        .map(|entry| {
            let mut best = &entry.spellings[0];
            for candidate in &entry.spellings[1..] {
                if candidate.1 > best.1 {
                    best = candidate;
                }
            }
            (best.0.clone(), entry.count)
        })
        .collect();
    result.sort_by(|a, b| b.1.cmp(&a.1));
    result.truncate(max_words);
    result
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Estimated bounding box of `text` at `font_size`.
pub fn text_extent(text: &str, font_size: f32) -> Vec2 {
    vec2(
        text.chars().count() as f32 * font_size * CHAR_WIDTH,
        font_size * LINE_HEIGHT,
    )
}

/// Place the most frequent words of the request on its canvas.
///
/// Font size grows with the square root of the relative frequency. Each word
/// walks an Archimedean spiral out from the centre until its box overlaps no
/// placed word; when the spiral leaves the canvas the word is retried smaller
/// and finally skipped.
pub fn layout(request: &WordCloudRequest) -> WordCloud {
    let frequencies = word_frequencies(&request.text, request.max_words);
    let canvas = Rect::from_min_size(Pos2::ZERO, vec2(request.width, request.height));
    let colors = generate_palette(PALETTE_SIZE);
    let max_count = frequencies.first().map_or(1, |(_, n)| *n).max(1) as f32;

    let mut placed: Vec<PlacedWord> = Vec::with_capacity(frequencies.len());

    for (rank, (text, count)) in frequencies.into_iter().enumerate() {
        let relative = (count as f32 / max_count).sqrt();
        let mut font_size = request.min_font_size
            + (request.max_font_size - request.min_font_size) * relative;

        let rect = loop {
            if let Some(rect) = find_spot(&text, font_size, canvas, &placed) {
                break Some(rect);
            }
            if font_size <= request.min_font_size {
                break None;
            }
            font_size = (font_size * SHRINK).max(request.min_font_size);
        };

        match rect {
            Some(rect) => placed.push(PlacedWord {
                text,
                count,
                font_size,
                rect,
                color: colors[rank % PALETTE_SIZE],
            }),
            None => log::debug!("Word cloud: no room for '{text}'"),
        }
    }

    WordCloud {
        width: request.width,
        height: request.height,
        words: placed,
    }
}

fn find_spot(text: &str, font_size: f32, canvas: Rect, placed: &[PlacedWord]) -> Option<Rect> {
    let size = text_extent(text, font_size);
    if size.x > canvas.width() || size.y > canvas.height() {
        return None;
    }
    let center = canvas.center();
    let aspect = canvas.height() / canvas.width();
    let max_radius = canvas.width().hypot(canvas.height());

    let mut theta: f32 = 0.0;
    loop {
        let radius = SPIRAL_GROWTH * theta;
        if radius > max_radius {
            return None;
        }
        let at = pos2(
            center.x + radius * theta.cos(),
            center.y + radius * theta.sin() * aspect,
        );
        let rect = Rect::from_center_size(at, size);
        if canvas.contains_rect(rect) && placed.iter().all(|w| !w.rect.intersects(rect)) {
            return Some(rect);
        }
        theta += SPIRAL_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, width: f32, height: f32) -> WordCloudRequest {
        WordCloudRequest {
            text: text.to_string(),
            width,
            height,
            max_words: 200,
            max_font_size: 48.0,
            min_font_size: 8.0,
        }
    }

    #[test]
    fn frequencies_ignore_case_punctuation_and_stop_words() {
        let freq = word_frequencies(
            "Dramas, International Movies Comedies, Dramas International TV Shows, Kids' TV & Horror Movies",
            10,
        );
        assert_eq!(freq[0], ("Dramas".to_string(), 2));
        assert!(freq.contains(&("Kids".to_string(), 1)));
        assert!(freq.contains(&("TV".to_string(), 2)));
        assert!(freq.iter().all(|(w, _)| w != "&"));

        let freq = word_frequencies("the drama and THE Drama of Drama", 10);
        assert_eq!(freq, vec![("Drama".to_string(), 3)]);
    }

    #[test]
    fn frequencies_respect_max_words() {
        let freq = word_frequencies("alpha beta gamma delta beta", 2);
        assert_eq!(freq, vec![("beta".to_string(), 2), ("alpha".to_string(), 1)]);
    }

    #[test]
    fn empty_text_lays_out_nothing() {
        let cloud = layout(&request("", 800.0, 400.0));
        assert!(cloud.words.is_empty());
        assert_eq!(cloud.width, 800.0);
    }

    #[test]
    fn placed_words_stay_inside_and_do_not_overlap() {
        let text = "Dramas Comedies Dramas Documentaries Thrillers Dramas Comedies \
                    Action Adventure Romantic Movies Horror Music Musicals Anime Dramas";
        let cloud = layout(&request(text, 400.0, 200.0));
        assert!(!cloud.words.is_empty());

        let canvas = Rect::from_min_size(Pos2::ZERO, vec2(400.0, 200.0));
        for (i, a) in cloud.words.iter().enumerate() {
            assert!(canvas.contains_rect(a.rect), "{} leaves the canvas", a.text);
            for b in &cloud.words[i + 1..] {
                assert!(!a.rect.intersects(b.rect), "{} overlaps {}", a.text, b.text);
            }
        }

        assert_eq!(cloud.words[0].text, "Dramas");
        assert!(cloud.words.iter().all(|w| w.font_size <= cloud.words[0].font_size));
    }

    #[test]
    fn words_too_large_for_canvas_are_skipped() {
        let cloud = layout(&request("Documentaries", 20.0, 5.0));
        assert!(cloud.words.is_empty());
    }
}
