// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for guide layout.
//!
//! Axes, legends and titles need text extents to reserve space before their marks are
//! generated. Shaping stays downstream, so guides accept a [`TextMeasurer`] and callers plug
//! in whatever backend they have, or the [`HeuristicTextMeasurer`].

/// Text styling inputs relevant to measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in chart coordinates (typically pixels).
    pub font_size: f64,
}

impl TextStyle {
    /// Creates a style with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self { font_size }
    }
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// A minimal text measurement interface used by guide generators.
pub trait TextMeasurer {
    /// Measures a single line of text.
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics;
}

/// A heuristic measurer: ~0.6em average glyph width, baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        TextMetrics {
            advance_width: 0.6 * style.font_size * text.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
        }
    }
}
