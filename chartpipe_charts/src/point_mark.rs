// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartpipe_core::{CirclePayload, Mark, MarkId, MarkPayload};
use kurbo::{Circle, Point};
use peniko::Brush;
use peniko::color::palette::css;

use crate::scale::ScaleContinuous;

/// One point: its position in data units, whether it uses the highlight fill, and optional
/// hover text.
#[derive(Clone, Debug, PartialEq)]
pub struct PointDatum {
    /// X value in data units.
    pub x: f64,
    /// Y value in data units.
    pub y: f64,
    /// Paint with [`PointMarkSpec::highlight_fill`] instead of [`PointMarkSpec::fill`].
    pub highlighted: bool,
    /// Hover text.
    pub tooltip: Option<String>,
}

/// A scatter series of circles.
#[derive(Clone, Debug)]
pub struct PointMarkSpec {
    /// Series number used to derive row mark ids.
    pub series: u32,
    /// X scale mapping data x into scene x.
    pub x_scale: ScaleContinuous,
    /// Y scale mapping data y into scene y.
    pub y_scale: ScaleContinuous,
    /// Circle radius in scene coordinates.
    pub radius: f64,
    /// Fill for ordinary points.
    pub fill: Brush,
    /// Fill for highlighted points.
    pub highlight_fill: Brush,
    /// Outline paint.
    pub stroke: Brush,
    /// Outline width; zero disables the outline.
    pub stroke_width: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

impl PointMarkSpec {
    /// Creates a point mark spec with radius 6 and black outlines.
    pub fn new(series: u32, x_scale: ScaleContinuous, y_scale: ScaleContinuous) -> Self {
        Self {
            series,
            x_scale,
            y_scale,
            radius: 6.0,
            fill: Brush::default(),
            highlight_fill: Brush::default(),
            stroke: css::BLACK.into(),
            stroke_width: 1.0,
            z_index: crate::z_order::SERIES_POINTS,
        }
    }

    /// Sets the ordinary and highlighted fills.
    pub fn with_fills(mut self, fill: impl Into<Brush>, highlight_fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self.highlight_fill = highlight_fill.into();
        self
    }

    /// Generates one circle per datum whose position maps to finite coordinates.
    ///
    /// Mark identity is derived from `(series, row)`, so skipped rows leave gaps in the id
    /// sequence rather than renumbering later rows.
    pub fn marks(&self, data: &[PointDatum]) -> Vec<Mark> {
        data.iter()
            .enumerate()
            .filter_map(|(row, datum)| {
                let center = Point::new(self.x_scale.map(datum.x), self.y_scale.map(datum.y));
                if !center.is_finite() {
                    return None;
                }
                let fill = if datum.highlighted {
                    &self.highlight_fill
                } else {
                    &self.fill
                };
                let mark = Mark::new(
                    MarkId::for_row(self.series, row as u64),
                    MarkPayload::Circle(CirclePayload {
                        circle: Circle::new(center, self.radius),
                        fill: fill.clone(),
                        stroke: self.stroke.clone(),
                        stroke_width: self.stroke_width,
                    }),
                )
                .with_z_index(self.z_index);
                Some(match &datum.tooltip {
                    Some(t) => mark.with_tooltip(t.clone()),
                    None => mark,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scale::ScaleLinear;

    fn spec() -> PointMarkSpec {
        PointMarkSpec::new(
            1,
            ScaleContinuous::Linear(ScaleLinear::new((1990.0, 2020.0), (0.0, 300.0))),
            ScaleContinuous::Linear(ScaleLinear::new((36.0, 40.0), (0.0, 400.0))),
        )
        .with_fills(css::STEEL_BLUE, css::DARK_ORANGE)
    }

    fn point(x: f64, y: f64, highlighted: bool) -> PointDatum {
        PointDatum {
            x,
            y,
            highlighted,
            tooltip: None,
        }
    }

    #[test]
    fn highlighted_points_use_highlight_fill() {
        let marks = spec().marks(&[point(1995.0, 37.0, true), point(2000.0, 38.0, false)]);
        let fills: Vec<Brush> = marks
            .iter()
            .map(|m| match &m.payload {
                MarkPayload::Circle(c) => c.fill.clone(),
                other => panic!("expected circle, got {other:?}"),
            })
            .collect();
        assert_eq!(fills[0], Brush::from(css::DARK_ORANGE));
        assert_eq!(fills[1], Brush::from(css::STEEL_BLUE));
    }

    #[test]
    fn circles_have_radius_six_at_mapped_centers() {
        let marks = spec().marks(&[point(2005.0, 39.0, false)]);
        let MarkPayload::Circle(c) = &marks[0].payload else {
            panic!("expected circle");
        };
        assert_eq!(c.circle.radius, 6.0);
        assert!((c.circle.center.x - 150.0).abs() < 1e-9);
        assert!((c.circle.center.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_points_are_skipped_without_renumbering() {
        let marks = spec().marks(&[point(f64::NAN, 37.0, false), point(2000.0, 38.0, false)]);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].id, MarkId::for_row(1, 1));
    }
}
