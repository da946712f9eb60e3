//! Sparkline rendering of the timing history.
//!
//! Each value maps to one of eight block glyphs scaled against the largest
//! value in the sequence. With color on, values well under the peak are
//! green and values near it are red; the bands are relative, so a run of
//! uniformly slow calls still looks neutral.

use crate::ansi::{self, GREEN, RED};

/// Lower one-eighth block through full block (U+2581..=U+2588).
pub const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Relative-magnitude band of a value within its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Under half the peak
    Fast,
    Normal,
    /// Over two thirds of the peak
    Slow,
}

impl Band {
    pub fn classify(value: u64, max: u64) -> Self {
        let (v, max) = (u128::from(value), u128::from(max));
        if v * 2 < max {
            Band::Fast
        } else if v * 3 > max * 2 {
            Band::Slow
        } else {
            Band::Normal
        }
    }

    fn color(self) -> Option<&'static str> {
        match self {
            Band::Fast => Some(GREEN),
            Band::Slow => Some(RED),
            Band::Normal => None,
        }
    }
}

/// Glyph index in `0..=7` for `value` scaled against `max` (taken as 1 when 0).
pub fn bucket_index(value: u64, max: u64) -> usize {
    let max = u128::from(max.max(1));
    let idx = u128::from(value) * 7 / max;
    idx.min(7) as usize
}

/// Render `values` as a string of glyphs.
///
/// An empty sequence renders as an empty string.
pub fn render(values: &[u64], color: bool) -> String {
    let max = values.iter().copied().max().unwrap_or(0).max(1);
    let mut out = String::with_capacity(values.len() * if color { 12 } else { 3 });

    for &v in values {
        let glyph = GLYPHS[bucket_index(v, max)];
        match Band::classify(v, max).color().filter(|_| color) {
            Some(c) => {
                out.push_str(c);
                out.push(glyph);
                out.push_str(ansi::RESET);
            }
            None => out.push(glyph),
        }
    }
    out
}
