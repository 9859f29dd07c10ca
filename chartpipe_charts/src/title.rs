// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart titles.
//!
//! Titles are placed in the strip above the plot (see [`crate::ChartLayout::title_top`]) and
//! rendered as text marks.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartpipe_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;

use crate::text_mark::TextMarkSpec;
use crate::z_order;
use crate::{TextMeasurer, TextStyle};

/// A chart-level title.
#[derive(Clone, Debug)]
pub struct TitleSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Title text (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Brush,
}

impl TitleSpec {
    /// Creates a 20px black title.
    pub fn new(id: MarkId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            font_size: 20.0,
            fill: css::BLACK.into(),
        }
    }

    /// Emits the title mark centered horizontally and vertically within `title_rect`.
    pub fn marks(&self, measurer: &dyn TextMeasurer, title_rect: Rect) -> Vec<Mark> {
        let x = 0.5 * (title_rect.x0 + title_rect.x1);
        let th = measurer
            .measure(&self.text, TextStyle::new(self.font_size))
            .line_height();
        let top = title_rect.y0 + 0.5 * (title_rect.height() - th).max(0.0);

        alloc::vec![
            TextMarkSpec::new(self.id, (x, top + 0.5 * th), self.text.clone())
                .with_font_size(self.font_size)
                .with_fill(self.fill.clone())
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Middle)
                .with_z_index(z_order::TITLES)
                .mark(),
        ]
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use chartpipe_core::MarkPayload;

    use super::*;
    use crate::HeuristicTextMeasurer;

    #[test]
    fn title_is_centered_in_its_strip() {
        let measurer = HeuristicTextMeasurer;
        let title = TitleSpec::new(MarkId::from_raw(10), "United States GDP");
        let marks = title.marks(&measurer, Rect::new(0.0, 0.0, 600.0, 40.0));
        assert_eq!(marks.len(), 1);
        let MarkPayload::Text(t) = &marks[0].payload else {
            panic!("title is text");
        };
        assert_eq!(t.pos.x, 300.0);
        assert!((t.pos.y - 20.0).abs() < 1e-9);
        assert_eq!(t.anchor, TextAnchor::Middle);
    }
}
