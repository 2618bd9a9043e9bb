//! Text wrapping and claim box sizing.
//!
//! The graph model never talks to a font system directly. Hosts plug one in
//! through [`TextMeasure`]; [`EstimatedMeasure`] is a font-free stand-in that
//! is good enough for headless layout.
//!
//! # Quick Start
//!
//! ```
//! # use argmap_core::measure::{EstimatedMeasure, measure_text};
//! # use argmap_core::style::StyleConfig;
//! let metrics = measure_text(&EstimatedMeasure::default(), "Rain makes the ground wet", &StyleConfig::default());
//!
//! assert_eq!(metrics.lines().len(), 1);
//! assert!(metrics.size().width() > 20.0);
//! assert_eq!(metrics.size().height(), 16.0 + 3.0 + 10.0);
//! ```

use crate::{geometry::Size, style::StyleConfig};

/// Measures rendered text.
pub trait TextMeasure {
    /// Width of a single line of `text` rendered at `font_size`.
    fn line_width(&self, text: &str, font_size: f32) -> f32;
}

/// Approximates every glyph as a fixed fraction of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedMeasure {
    glyph_ratio: f32,
}

impl EstimatedMeasure {
    /// Creates a measure where each character is `glyph_ratio * font_size` wide
    pub fn new(glyph_ratio: f32) -> Self {
        Self { glyph_ratio }
    }
}

impl Default for EstimatedMeasure {
    fn default() -> Self {
        // Average advance of a proportional sans-serif face
        Self::new(0.55)
    }
}

impl TextMeasure for EstimatedMeasure {
    fn line_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.glyph_ratio
    }
}

/// Wrapped lines of a claim and the box they need.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMetrics {
    lines: Vec<String>,
    size: Size,
}

impl TextMetrics {
    pub fn new(lines: Vec<String>, size: Size) -> Self {
        Self { lines, size }
    }

    /// Metrics of a box that takes no space
    pub fn empty() -> Self {
        Self::new(Vec::new(), Size::default())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Box size including claim padding
    pub fn size(&self) -> Size {
        self.size
    }
}

/// Greedily breaks `text` into lines no wider than `max_width`.
///
/// Words are separated by any whitespace and rejoined with single spaces.
/// A word that is wider than `max_width` on its own gets a line of its own
/// rather than being split. Text without words yields a single empty line.
pub fn wrap_text(
    measure: &impl TextMeasure,
    text: &str,
    max_width: f32,
    font_size: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if measure.line_width(&candidate, font_size) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }

    lines
}

/// Wraps and sizes the text of a regular claim.
///
/// Text is measured at `scale * fontSize` and the widest line is scaled back,
/// so the box size is in diagram units regardless of the device scale.
pub fn measure_text(measure: &impl TextMeasure, text: &str, style: &StyleConfig) -> TextMetrics {
    let claim = style.claim();
    let font_size = style.scale() * claim.font_size();
    let lines = wrap_text(measure, text, claim.max_width(), font_size);

    let text_width = lines
        .iter()
        .map(|line| measure.line_width(line, font_size))
        .fold(0.0f32, f32::max);

    let text_size = Size::new(
        text_width / style.scale(),
        lines.len() as f32 * claim.line_height(),
    );

    TextMetrics::new(lines, text_size.add_padding(claim.padding()))
}
