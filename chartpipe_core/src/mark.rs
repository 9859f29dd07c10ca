// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks and their payloads.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

use kurbo::{BezPath, Circle, Point, Rect, Shape};
use peniko::Brush;

/// A stable mark identity.
///
/// Renderers sort by `(z_index, MarkId)` for a deterministic paint order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Wraps a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives an id for row `row` of data series `series`.
    ///
    /// Series ids occupy the upper 32 bits so row ids never collide with guide ids, which are
    /// allocated below `1 << 32`.
    pub const fn for_row(series: u32, row: u64) -> Self {
        Self(((series as u64 + 1) << 32) | (row & 0xFFFF_FFFF))
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor point is on the vertical middle of the line.
    Middle,
    /// The anchor point is on the alphabetic baseline.
    Alphabetic,
    /// The anchor point is on the top of the line.
    Hanging,
    /// The anchor point is on the ideographic baseline.
    Ideographic,
}

/// The shape kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Circle.
    Circle,
    /// Single line of text.
    Text,
    /// Stroked and/or filled path.
    Path,
}

/// Rectangle geometry and fill.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Rectangle in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
}

/// Circle geometry and fill.
#[derive(Clone, Debug, PartialEq)]
pub struct CirclePayload {
    /// Circle in scene coordinates.
    pub circle: Circle,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint (ignored when `stroke_width` is zero).
    pub stroke: Brush,
    /// Stroke width.
    pub stroke_width: f64,
}

/// A line of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// A path with fill and stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Path geometry.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; zero disables stroking.
    pub stroke_width: f64,
}

/// Resolved geometry and paint of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// See [`RectPayload`].
    Rect(RectPayload),
    /// See [`CirclePayload`].
    Circle(CirclePayload),
    /// See [`TextPayload`].
    Text(Box<TextPayload>),
    /// See [`PathPayload`].
    Path(PathPayload),
}

impl MarkPayload {
    /// Returns the shape kind.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Circle(_) => MarkKind::Circle,
            Self::Text(_) => MarkKind::Text,
            Self::Path(_) => MarkKind::Path,
        }
    }

    /// Returns geometric bounds.
    ///
    /// Text is unshaped, so its bounds are unknown here and `None` is returned; callers that
    /// need text extents should estimate them with a text measurer.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect.abs()),
            Self::Circle(c) => Some(c.circle.bounding_box()),
            Self::Text(_) => None,
            Self::Path(p) => Some(p.path.bounding_box()),
        }
    }
}

/// One rendered shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Paint order; lower values are painted first.
    pub z_index: i32,
    /// Geometry and paint.
    pub payload: MarkPayload,
    /// Hover text shown by an interactive renderer.
    pub tooltip: Option<String>,
}

impl Mark {
    /// Creates a mark with `z_index = 0` and no tooltip.
    pub fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            payload,
            tooltip: None,
        }
    }

    /// Creates a filled rectangle mark.
    pub fn rect(id: MarkId, rect: Rect, fill: impl Into<Brush>) -> Self {
        Self::new(
            id,
            MarkPayload::Rect(RectPayload {
                rect,
                fill: fill.into(),
            }),
        )
    }

    /// Creates a filled, unstroked circle mark.
    pub fn circle(id: MarkId, circle: Circle, fill: impl Into<Brush>) -> Self {
        Self::new(
            id,
            MarkPayload::Circle(CirclePayload {
                circle,
                fill: fill.into(),
                stroke: Brush::default(),
                stroke_width: 0.0,
            }),
        )
    }

    /// Creates a text mark.
    pub fn text(id: MarkId, text: TextPayload) -> Self {
        Self::new(id, MarkPayload::Text(Box::new(text)))
    }

    /// Creates a path mark.
    pub fn path(id: MarkId, path: PathPayload) -> Self {
        Self::new(id, MarkPayload::Path(path))
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Attaches hover text.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Returns the shape kind.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use peniko::color::palette::css;

    #[test]
    fn row_ids_do_not_collide_with_guide_ids() {
        let row = MarkId::for_row(0, 0);
        assert!(row.0 >= 1 << 32);
        assert_ne!(MarkId::for_row(0, 7), MarkId::for_row(1, 7));
    }

    #[test]
    fn circle_bounds_cover_radius() {
        let m = Mark::circle(
            MarkId::from_raw(1),
            Circle::new((10.0, 20.0), 6.0),
            css::STEEL_BLUE,
        );
        let b = m.payload.bounds().expect("circle has bounds");
        assert!((b.x0 - 4.0).abs() < 1e-9);
        assert!((b.y1 - 26.0).abs() < 1e-9);
        assert_eq!(m.kind(), MarkKind::Circle);
    }

    #[test]
    fn text_has_no_intrinsic_bounds() {
        let m = Mark::text(
            MarkId::from_raw(2),
            TextPayload {
                pos: Point::new(0.0, 0.0),
                text: String::from("hello"),
                font_size: 12.0,
                angle: 0.0,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
                fill: css::BLACK.into(),
            },
        );
        assert!(m.payload.bounds().is_none());
    }
}
