// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An axis is a single [`AxisSpec`] on the bottom or left edge of the plot. Arranging it
//! generates a domain line, ticks, tick labels and an optional caption.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use chartpipe_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::{Point, Rect};
use peniko::Brush;
use peniko::color::palette::css;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::format::format_tick_with_step;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleBand, ScaleContinuous, ScaleLinear, ScaleSpec};
use crate::text_mark::TextMarkSpec;
use crate::{time, z_order};

/// Axis styling.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Paint for the domain line and tick marks.
    pub rule: Brush,
    /// Stroke width for the domain line and tick marks.
    pub rule_width: f64,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis caption.
    pub title_fill: Brush,
    /// Font size for the axis caption.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            rule: css::BLACK.into(),
            rule_width: 1.0,
            label_fill: css::BLACK.into(),
            label_font_size: 10.0,
            title_fill: css::BLACK.into(),
            title_font_size: 12.0,
        }
    }
}

/// Axis orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        self == Self::Bottom
    }
}

type TickFormatter = Arc<dyn Fn(f64, f64) -> String>;

/// An axis specification.
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// The axis scale specification.
    pub scale: ScaleSpec,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks for continuous scales.
    pub tick_count: usize,
    /// Explicit tick values, overriding generated ticks.
    ///
    /// For band scales these are band indices.
    pub tick_values: Option<Vec<f64>>,
    /// Tick line length, pointing away from the plot.
    pub tick_size: f64,
    /// Gap between the tick end and the tick label.
    pub tick_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional axis caption.
    pub title: Option<String>,
    /// Optional tick label formatter `(value, step) -> label`.
    pub tick_formatter: Option<TickFormatter>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_values", &self.tick_values)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("style", &self.style)
            .field("title", &self.title)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

/// A scale instantiated for a concrete plot rectangle.
#[derive(Clone, Copy, Debug)]
enum Resolved {
    Continuous(ScaleContinuous),
    Band(ScaleBand),
}

impl Resolved {
    fn at(&self, v: f64) -> f64 {
        match self {
            Self::Continuous(s) => s.map(v),
            Self::Band(b) => b.center(discrete_index(v)),
        }
    }
}

impl AxisSpec {
    /// Creates a new axis specification: 10 ticks of size 6, 3px tick padding, no caption.
    pub fn new(id_base: u64, scale: impl Into<ScaleSpec>, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_values: None,
            tick_size: 6.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
            title: None,
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Sets explicit tick values.
    pub fn with_tick_values(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.tick_values = Some(values.into_iter().collect());
        self
    }

    /// Sets a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Sets the axis caption.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn range(&self, plot: Rect) -> (f64, f64) {
        if self.orient.is_horizontal() {
            (plot.x0, plot.x1)
        } else {
            (plot.y1, plot.y0)
        }
    }

    /// Returns the continuous scale for `plot`, or `None` for a band axis.
    ///
    /// Vertical axes map the domain minimum to the bottom of the plot.
    pub fn scale_continuous(&self, plot: Rect) -> Option<ScaleContinuous> {
        let range = self.range(plot);
        match self.scale {
            ScaleSpec::Linear(s) => Some(ScaleContinuous::Linear(
                s.instantiate_resolved(range, self.tick_count),
            )),
            ScaleSpec::Time(s) => Some(ScaleContinuous::Time(s.instantiate(range))),
            ScaleSpec::Band(_) => None,
        }
    }

    /// Returns the band scale for `plot`, or `None` for a continuous axis.
    pub fn scale_band(&self, plot: Rect) -> Option<ScaleBand> {
        match self.scale {
            ScaleSpec::Band(s) => Some(s.instantiate(self.range(plot))),
            ScaleSpec::Linear(_) | ScaleSpec::Time(_) => None,
        }
    }

    fn resolve(&self, plot: Rect) -> Resolved {
        match self.scale_band(plot) {
            Some(band) => Resolved::Band(band),
            None => Resolved::Continuous(
                self.scale_continuous(plot)
                    .unwrap_or(ScaleContinuous::Linear(ScaleLinear::new(
                        (0.0, 1.0),
                        self.range(plot),
                    ))),
            ),
        }
    }

    /// Returns the tick values and their (best-effort) step.
    pub fn tick_values(&self) -> (Vec<f64>, f64) {
        if let Some(values) = &self.tick_values {
            return (values.clone(), tick_step(values));
        }
        let ticks = match self.scale {
            ScaleSpec::Linear(s) => {
                ScaleLinear::new(s.resolved_domain(self.tick_count), (0.0, 1.0))
                    .ticks(self.tick_count)
            }
            ScaleSpec::Time(s) => s.instantiate((0.0, 1.0)).ticks(self.tick_count),
            ScaleSpec::Band(s) => (0..s.count).map(|i| i as f64).collect(),
        };
        let step = tick_step(&ticks);
        (ticks, step)
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        if let Some(f) = &self.tick_formatter {
            return f(v, step);
        }
        match self.scale {
            ScaleSpec::Time(_) => time::format_year(v),
            ScaleSpec::Band(_) => alloc::format!("{}", discrete_index(v)),
            ScaleSpec::Linear(_) => format_tick_with_step(v, step),
        }
    }

    /// Generates axis marks for the plot rectangle and the reserved axis rectangle.
    ///
    /// Ticks whose position falls outside the plot extent are skipped.
    pub fn marks(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let resolved = self.resolve(plot);
        let (ticks, step) = self.tick_values();
        let horizontal = self.orient.is_horizontal();
        let (lo, hi) = if horizontal {
            (plot.x0, plot.x1)
        } else {
            (plot.y0, plot.y1)
        };
        // Edge of the plot the axis sits on, and the outward direction across it.
        let (edge, out_dir) = match self.orient {
            AxisOrient::Bottom => (plot.y1, 1.0),
            AxisOrient::Left => (plot.x0, -1.0),
        };
        let point = |along: f64, across: f64| {
            if horizontal {
                Point::new(along, across)
            } else {
                Point::new(across, along)
            }
        };
        let (anchor, baseline) = match self.orient {
            AxisOrient::Bottom => (TextAnchor::Middle, TextBaseline::Hanging),
            AxisOrient::Left => (TextAnchor::End, TextBaseline::Middle),
        };
        let tick_size = self.tick_size.abs();
        let label_offset = tick_size + self.tick_padding.max(0.0);

        let mut out = Vec::with_capacity(2 * ticks.len() + 2);
        out.push(
            RuleMarkSpec::new(MarkId::from_raw(self.id_base), point(lo, edge), point(hi, edge))
                .with_stroke(self.style.rule.clone(), self.style.rule_width)
                .mark(),
        );

        for (i, v) in ticks.iter().copied().enumerate() {
            let t = resolved.at(v);
            if !t.is_finite() || t < lo - 1.0e-9 || t > hi + 1.0e-9 {
                continue;
            }
            out.push(
                RuleMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1 + i as u64),
                    point(t, edge),
                    point(t, edge + out_dir * tick_size),
                )
                .with_stroke(self.style.rule.clone(), self.style.rule_width)
                .mark(),
            );
            out.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 1000 + i as u64),
                    point(t, edge + out_dir * label_offset),
                    self.format_tick(v, step),
                )
                .with_font_size(self.style.label_font_size)
                .with_fill(self.style.label_fill.clone())
                .with_anchor(anchor)
                .with_baseline(baseline)
                .with_z_index(z_order::AXIS_LABELS)
                .mark(),
            );
        }

        if let Some(title) = &self.title {
            // The caption sits at the outer edge of `axis_rect`.
            let fs = self.style.title_font_size;
            let mid = 0.5 * (lo + hi);
            let (pos, angle, baseline) = match self.orient {
                AxisOrient::Bottom => {
                    (Point::new(mid, axis_rect.y1 - fs), 0.0, TextBaseline::Hanging)
                }
                AxisOrient::Left => {
                    (Point::new(axis_rect.x0 + 0.5 * fs, mid), -90.0, TextBaseline::Middle)
                }
            };
            out.push(
                TextMarkSpec::new(MarkId::from_raw(self.id_base + 9000), pos, title.clone())
                    .with_font_size(fs)
                    .with_fill(self.style.title_fill.clone())
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(baseline)
                    .with_angle(angle)
                    .with_z_index(z_order::AXIS_TITLES)
                    .mark(),
            );
        }

        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

fn discrete_index(v: f64) -> usize {
    if !v.is_finite() || v < 0.0 {
        return 0;
    }
    let v = v.round().min(1.0e9);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "value is clamped to a non-negative range"
    )]
    {
        v as usize
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use chartpipe_core::{MarkKind, MarkPayload};

    use super::*;
    use crate::scale::{ScaleBandSpec, ScaleLinearSpec, ScaleTimeSpec};

    fn labels(marks: &[Mark]) -> Vec<String> {
        marks
            .iter()
            .filter(|m| m.z_index == z_order::AXIS_LABELS)
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn custom_formatter_is_used_for_labels() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis_rect = Rect::new(0.0, 50.0, 100.0, 60.0);
        let axis = AxisSpec::bottom(1, ScaleLinearSpec::new((0.0, 10.0)))
            .with_tick_formatter(|_v, _step| String::from("X"));
        let texts = labels(&axis.marks(plot, axis_rect));
        assert!(!texts.is_empty());
        assert!(texts.iter().all(|t| t == "X"));
    }

    #[test]
    fn band_axis_labels_only_selected_categories_at_band_centers() {
        let plot = Rect::new(50.0, 20.0, 570.0, 350.0);
        let axis_rect = Rect::new(50.0, 350.0, 570.0, 400.0);
        let cats: Vec<String> = (0..25).map(|i| alloc::format!("c{i}")).collect();
        let names = cats.clone();
        let axis = AxisSpec::bottom(1, ScaleBandSpec::new(cats.len()))
            .with_tick_values(crate::decimated_indices(cats.len(), 10).into_iter().map(|i| i as f64))
            .with_tick_formatter(move |v, _| names[discrete_index(v)].clone());
        let marks = axis.marks(plot, axis_rect);
        let texts = labels(&marks);
        assert_eq!(texts, ["c0", "c3", "c6", "c9", "c12", "c15", "c18", "c21", "c24"]);

        let band = axis.scale_band(plot).expect("band axis");
        let first_label = marks
            .iter()
            .find(|m| m.id == MarkId::from_raw(1000 + 1))
            .expect("first label");
        let MarkPayload::Text(t) = &first_label.payload else {
            panic!("label is text");
        };
        assert!((t.pos.x - band.center(0)).abs() < 1e-9);
    }

    #[test]
    fn left_axis_caption_is_rotated() {
        let plot = Rect::new(70.0, 40.0, 570.0, 350.0);
        let axis_rect = Rect::new(0.0, 40.0, 70.0, 350.0);
        let axis = AxisSpec::left(1, ScaleLinearSpec::new((0.0, 100.0))).with_title("GDP");
        let marks = axis.marks(plot, axis_rect);
        let caption = marks
            .iter()
            .find(|m| m.z_index == z_order::AXIS_TITLES)
            .expect("caption");
        let MarkPayload::Text(t) = &caption.payload else {
            panic!("caption is text");
        };
        assert_eq!(t.angle, -90.0);
        assert!(t.pos.x < plot.x0);
        assert!((t.pos.y - 195.0).abs() < 1e-9);
    }

    #[test]
    fn year_axis_uses_year_labels() {
        let d0 = time::year_start_seconds(1994).expect("year");
        let d1 = time::year_start_seconds(2015).expect("year");
        let plot = Rect::new(0.0, 0.0, 800.0, 400.0);
        let axis_rect = Rect::new(0.0, 400.0, 800.0, 440.0);
        let axis = AxisSpec::bottom(1, ScaleTimeSpec::years((d0, d1)));
        let texts = labels(&axis.marks(plot, axis_rect));
        assert!(texts.contains(&String::from("2000")));
        assert!(texts.iter().all(|t| t.len() == 4));
    }

    #[test]
    fn domain_line_spans_plot() {
        let plot = Rect::new(10.0, 10.0, 110.0, 60.0);
        let axis = AxisSpec::bottom(7, ScaleLinearSpec::new((0.0, 1.0)));
        let marks = axis.marks(plot, Rect::new(10.0, 60.0, 110.0, 80.0));
        let domain = marks
            .iter()
            .find(|m| m.id == MarkId::from_raw(7))
            .expect("domain line");
        assert_eq!(domain.kind(), MarkKind::Path);
        let b = domain.payload.bounds().expect("path bounds");
        assert_eq!((b.x0, b.x1, b.y0), (10.0, 110.0, 60.0));
    }
}
