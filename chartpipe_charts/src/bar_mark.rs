// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chartpipe_core::{Mark, MarkId};
use kurbo::Rect;
use peniko::Brush;

use crate::scale::{ScaleBand, ScaleContinuous};

/// One bar: its band, its value and optional hover text.
#[derive(Clone, Debug, PartialEq)]
pub struct BarDatum {
    /// Band index along x.
    pub band: usize,
    /// Bar value in data units.
    pub value: f64,
    /// Hover text.
    pub tooltip: Option<String>,
}

/// Vertical bars over a band scale.
///
/// This generates one [`chartpipe_core::MarkKind::Rect`] mark per datum, spanning from the
/// baseline to the datum value.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Series number used to derive row mark ids.
    pub series: u32,
    /// Band scale used for bar positions along x.
    pub band: ScaleBand,
    /// Continuous scale used for bar positions along y.
    pub y_scale: ScaleContinuous,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Fill paint for bars.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl BarMarkSpec {
    /// Creates a bar mark spec with `baseline = 0` and a default fill (`Brush::default()`).
    pub fn new(series: u32, band: ScaleBand, y_scale: ScaleContinuous) -> Self {
        Self {
            series,
            band,
            y_scale,
            baseline: 0.0,
            fill: Brush::default(),
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in data units.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Generates one mark per datum, in datum order.
    ///
    /// Mark identity is derived from `(series, row)`. Non-finite values collapse to the
    /// baseline, producing a zero-height bar.
    pub fn marks(&self, data: &[BarDatum]) -> Vec<Mark> {
        let bw = self.band.band_width();
        let y0 = self.y_scale.map(self.baseline);

        data.iter()
            .enumerate()
            .map(|(row, datum)| {
                let v = if datum.value.is_finite() {
                    datum.value
                } else {
                    self.baseline
                };
                let y = self.y_scale.map(v);
                let x = self.band.x(datum.band);
                let mark = Mark::rect(
                    MarkId::for_row(self.series, row as u64),
                    Rect::new(x, y.min(y0), x + bw, y.max(y0)),
                    self.fill.clone(),
                )
                .with_z_index(self.z_index);
                match &datum.tooltip {
                    Some(t) => mark.with_tooltip(t.clone()),
                    None => mark,
                }
            })
            .collect()
    }
}
