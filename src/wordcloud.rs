//! Word-cloud layout: font sizes from counts, spiral placement without
//! overlaps. Drawing happens in `ui::cloud`.

use eframe::egui::Color32;

use crate::color::generate_palette;
use crate::settings::WordCloudSettings;

/// Approximate glyph advance as a fraction of the font size.
const CHAR_WIDTH: f32 = 0.6;
/// Line height as a fraction of the font size.
const LINE_HEIGHT: f32 = 1.2;
/// Spiral growth in pixels per radian.
const SPIRAL_STEP: f32 = 3.0;
/// Distance between sample points along the spiral, in pixels.
const PROBE_SPACING: f32 = 4.0;
/// Font shrink factor applied when a word finds no free spot.
const SHRINK: f32 = 0.75;
const PALETTE_SIZE: usize = 12;
/// Layout stops once this many words in a row found no room.
pub const MAX_CONSECUTIVE_DROPS: usize = 20;

/// A word with its final box on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: f32,
    /// Top-left corner in canvas pixels.
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub color: Color32,
}

impl PlacedWord {
    fn overlaps(&self, other: &PlacedWord) -> bool {
        self.pos[0] < other.pos[0] + other.size[0]
            && other.pos[0] < self.pos[0] + self.size[0]
            && self.pos[1] < other.pos[1] + other.size[1]
            && other.pos[1] < self.pos[1] + self.size[1]
    }
}

/// A laid-out word cloud on a `width × height` canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCloud {
    /// File stem used when saved (`data_scientist`).
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub words: Vec<PlacedWord>,
}

impl WordCloud {
    pub fn file_name(&self) -> String {
        format!("{}.png", self.name)
    }
}

/// Lay out the `max_words` most frequent words.
///
/// `freqs` must be sorted most frequent first. Words that do not fit even
/// at `min_font_size` are dropped, and after `MAX_CONSECUTIVE_DROPS` drops
/// in a row the canvas counts as full.
pub fn layout(name: &str, freqs: &[(String, usize)], params: &WordCloudSettings) -> WordCloud {
    let palette = generate_palette(PALETTE_SIZE);
    let words: Vec<&(String, usize)> = freqs.iter().take(params.max_words).collect();

    let max_count = words.first().map_or(0, |w| w.1);
    let min_count = words.last().map_or(0, |w| w.1);

    let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());
    let mut drops = 0;
    for (i, (text, count)) in words.iter().map(|w| (&w.0, w.1)).enumerate() {
        if drops >= MAX_CONSECUTIVE_DROPS {
            log::debug!("Word cloud full after {} words", placed.len());
            break;
        }
        let mut font_size = scale_font(count, min_count, max_count, params);
        let color = palette[(params.seed + i * 5) % PALETTE_SIZE];

        loop {
            let size = [
                text.chars().count() as f32 * font_size * CHAR_WIDTH,
                font_size * LINE_HEIGHT,
            ];
            let candidate = PlacedWord {
                text: text.clone(),
                font_size,
                pos: [0.0, 0.0],
                size,
                color,
            };
            if let Some(word) = find_spot(candidate, &placed, params) {
                placed.push(word);
                drops = 0;
                break;
            }
            if font_size <= params.min_font_size {
                log::debug!("Dropping '{text}' from word cloud: no space left");
                drops += 1;
                break;
            }
            font_size = (font_size * SHRINK).max(params.min_font_size);
        }
    }

    WordCloud {
        name: name.to_string(),
        width: params.width,
        height: params.height,
        words: placed,
    }
}

/// Linear interpolation between min and max font size by count.
fn scale_font(count: usize, min_count: usize, max_count: usize, params: &WordCloudSettings) -> f32 {
    if max_count <= min_count {
        return params.max_font_size;
    }
    let t = (count - min_count) as f32 / (max_count - min_count) as f32;
    params.min_font_size + t * (params.max_font_size - params.min_font_size)
}

/// Walk an Archimedean spiral out from the canvas centre until the word's
/// box fits inside the canvas without touching a placed word.
fn find_spot(
    mut word: PlacedWord,
    placed: &[PlacedWord],
    params: &WordCloudSettings,
) -> Option<PlacedWord> {
    let [w, h] = word.size;
    if w > params.width || h > params.height {
        return None;
    }
    let centre = [params.width / 2.0, params.height / 2.0];
    let max_radius = (params.width.powi(2) + params.height.powi(2)).sqrt() / 2.0;

    let mut theta: f32 = 0.0;
    loop {
        let r = SPIRAL_STEP * theta;
        if r > max_radius {
            return None;
        }
        let x = centre[0] + r * theta.cos() - w / 2.0;
        let y = centre[1] + r * theta.sin() - h / 2.0;
        if x >= 0.0 && y >= 0.0 && x + w <= params.width && y + h <= params.height {
            word.pos = [x, y];
            if !placed.iter().any(|p| p.overlaps(&word)) {
                return Some(word);
            }
        }
        theta += PROBE_SPACING / r.max(PROBE_SPACING);
    }
}
