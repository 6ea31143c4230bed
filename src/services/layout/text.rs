//! Text measurement and truncation for the builtin Helvetica faces.

use crate::models::layout::FontWeight;
use crate::models::settings::TextMetrics;

pub const ELLIPSIS: &str = "...";

/// Advance widths (1/1000 em) for printable ASCII 32..=126, Helvetica
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance widths (1/1000 em) for printable ASCII 32..=126, Helvetica-Bold
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for characters outside the ASCII table
const FALLBACK_ADVANCE: u16 = 556;

fn advance(ch: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    let code = ch as u32;
    if (32..=126).contains(&code) {
        table[(code - 32) as usize]
    } else {
        FALLBACK_ADVANCE
    }
}

impl TextMetrics {
    /// Rendered width in points, or `None` when measurement is unavailable
    pub fn measure(&self, text: &str, size: f32, weight: FontWeight) -> Option<f32> {
        match self {
            TextMetrics::Helvetica => {
                let units: u32 = text.chars().map(|ch| advance(ch, weight) as u32).sum();
                Some(units as f32 * size / 1000.0)
            }
            TextMetrics::CharacterCount => None,
        }
    }

    /// Measured width, or a rough per-character estimate
    pub fn width_or_estimate(&self, text: &str, size: f32, weight: FontWeight) -> f32 {
        self.measure(text, size, weight)
            .unwrap_or_else(|| text.chars().count() as f32 * size * 0.5)
    }
}

/// Cap `text` at `max_chars` characters, ending in an ellipsis when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Fit `text` to both a character cap and, when measurable, a width.
///
/// Returns an empty string when not even the ellipsis fits.
pub fn fit_text(
    text: &str,
    max_chars: usize,
    max_width: f32,
    size: f32,
    weight: FontWeight,
    metrics: TextMetrics,
) -> String {
    let capped = truncate_chars(text, max_chars);
    let fits = |candidate: &str| match metrics.measure(candidate, size, weight) {
        Some(width) => width <= max_width,
        None => true,
    };

    if fits(&capped) {
        return capped;
    }

    let chars: Vec<char> = text.chars().collect();
    let longest = if chars.len() > max_chars {
        max_chars.saturating_sub(ELLIPSIS.len())
    } else {
        chars.len().saturating_sub(1)
    };

    for keep in (0..=longest).rev() {
        let mut candidate: String = chars[..keep].iter().collect();
        candidate.push_str(ELLIPSIS);
        if fits(&candidate) {
            return candidate;
        }
    }
    String::new()
}
