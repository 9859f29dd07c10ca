// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule marks: stroked straight segments, used for axis domain lines and ticks.

use chartpipe_core::{Mark, MarkId, PathPayload};
use kurbo::{BezPath, Point};
use peniko::{Brush, Color};

use crate::z_order;

/// A rule mark spec (a stroked line segment).
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Start point in scene coordinates.
    pub from: Point,
    /// End point in scene coordinates.
    pub to: Point,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

impl RuleMarkSpec {
    /// Creates a new rule between two points.
    pub fn new(id: MarkId, from: impl Into<Point>, to: impl Into<Point>) -> Self {
        Self {
            id,
            from: from.into(),
            to: to.into(),
            stroke: Brush::default(),
            stroke_width: 1.0,
            z_index: z_order::AXIS_RULES,
        }
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Generates the rule mark.
    pub fn mark(&self) -> Mark {
        let mut path = BezPath::new();
        path.move_to(self.from);
        path.line_to(self.to);
        Mark::path(
            self.id,
            PathPayload {
                path,
                fill: Color::TRANSPARENT.into(),
                stroke: self.stroke.clone(),
                stroke_width: self.stroke_width,
            },
        )
        .with_z_index(self.z_index)
    }
}
