// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! A legend is a vertical list of color swatches with text labels. It is measured first (so
//! layout can reserve or place it) and then arranged at an origin.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartpipe_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::{Point, Rect};
use peniko::color::palette::css;
use peniko::{Brush, Color};

use crate::layout::Size;
use crate::measure::{TextMeasurer, TextStyle};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// A simple legend row item.
#[derive(Clone, Debug)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// An unpositioned legend specification (swatches + labels).
///
/// Use this with a measure/arrange layout pass:
/// - Measure: call [`LegendSwatchesSpec::measure`] to get a desired size.
/// - Arrange: call [`LegendSwatchesSpec::marks`] once you know the origin.
#[derive(Clone, Debug)]
pub struct LegendSwatchesSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatchesSpec {
    /// Creates a new legend specification with defaults.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            swatch_size: 12.0,
            row_gap: 6.0,
            label_dx: 6.0,
            font_size: 11.0,
            text_fill: css::BLACK.into(),
            items,
        }
    }

    fn row_height(&self) -> f64 {
        self.swatch_size.max(self.font_size)
    }

    /// Measures the desired legend size (width/height).
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Size {
        if self.items.is_empty() {
            return Size::default();
        }
        let style = TextStyle::new(self.font_size);
        let label_w = self
            .items
            .iter()
            .map(|item| measurer.measure(&item.label, style).advance_width)
            .fold(0.0_f64, f64::max);
        let rows = self.items.len() as f64;
        Size {
            width: self.swatch_size + self.label_dx + label_w,
            height: rows * self.row_height() + (rows - 1.0) * self.row_gap,
        }
    }

    /// Generates legend marks (swatch + label per item) with the top-left corner at `origin`.
    pub fn marks(&self, origin: Point) -> Vec<Mark> {
        let row_height = self.row_height();
        let mut out = Vec::with_capacity(2 * self.items.len());

        for (i, item) in self.items.iter().enumerate() {
            let y = origin.y + i as f64 * (row_height + self.row_gap);
            let swatch = Rect::new(
                origin.x,
                y + 0.5 * (row_height - self.swatch_size),
                origin.x + self.swatch_size,
                y + 0.5 * (row_height + self.swatch_size),
            );
            let id = MarkId::from_raw(self.id_base + i as u64);
            out.push(
                Mark::rect(id, swatch, item.fill.clone()).with_z_index(z_order::LEGEND_SWATCHES),
            );

            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    (swatch.x1 + self.label_dx, y + 0.5 * row_height),
                    item.label.clone(),
                )
                .with_font_size(self.font_size)
                .with_fill(self.text_fill.clone())
                .with_anchor(TextAnchor::Start)
                .with_baseline(TextBaseline::Middle)
                .with_z_index(z_order::LEGEND_LABELS)
                .mark(),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use chartpipe_core::{MarkKind, MarkPayload};

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    fn doping_legend() -> LegendSwatchesSpec {
        LegendSwatchesSpec::new(
            1,
            vec![
                LegendItem::solid("Doping Allegations", css::DARK_ORANGE),
                LegendItem::solid("No Allegations", css::STEEL_BLUE),
            ],
        )
    }

    #[test]
    fn measure_covers_longest_label() {
        let measurer = HeuristicTextMeasurer;
        let spec = doping_legend();
        let size = spec.measure(&measurer);
        let longest = measurer
            .measure("Doping Allegations", TextStyle::new(spec.font_size))
            .advance_width;
        assert_eq!(size.width, spec.swatch_size + spec.label_dx + longest);
        assert_eq!(size.height, 2.0 * 12.0 + 6.0);
    }

    #[test]
    fn one_swatch_and_label_per_item() {
        let marks = doping_legend().marks(Point::new(100.0, 50.0));
        assert_eq!(marks.len(), 4);
        assert_eq!(marks[0].kind(), MarkKind::Rect);
        let MarkPayload::Text(label) = &marks[3].payload else {
            panic!("second label is text");
        };
        assert_eq!(label.text, "No Allegations");
        assert!(label.pos.y > 50.0 + 12.0);
    }

    #[test]
    fn empty_legend_measures_zero() {
        let spec = LegendSwatchesSpec::new(1, Vec::new());
        assert_eq!(spec.measure(&HeuristicTextMeasurer), Size::default());
        assert!(spec.marks(Point::ZERO).is_empty());
    }
}
