// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart building blocks for `chartpipe_core`.
//!
//! This crate is a small layer above `chartpipe_core`:
//! - **Scales** map data values into screen coordinates.
//! - **Series** (bars, points) and **guides** (axes, titles, legends) generate
//!   `chartpipe_core::Mark`s.
//! - **Layout** splits a fixed canvas into a plot rectangle and margin strips.
//! - **Tooltip** models the single hover tooltip shared by a chart's data marks.
//!
//! Text shaping is out of scope; text marks store unshaped strings and guides measure text
//! through a [`TextMeasurer`].

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
mod bar_mark;
mod chart_spec;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod layout;
mod legend;
mod measure;
mod point_mark;
mod rule_mark;
mod scale;
mod text_mark;
mod time;
mod title;
mod tooltip;
mod z_order;

pub use axis::{AxisOrient, AxisSpec, AxisStyle};
pub use bar_mark::{BarDatum, BarMarkSpec};
pub use chart_spec::ChartSpec;
pub use format::format_tick_with_step;
pub use layout::{ChartLayout, ChartLayoutSpec, LegendPlacement, Margins, Size};
pub use legend::{LegendItem, LegendSwatchesSpec};
pub use measure::{HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
pub use point_mark::{PointDatum, PointMarkSpec};
pub use rule_mark::RuleMarkSpec;
pub use scale::{
    ScaleBand, ScaleBandSpec, ScaleContinuous, ScaleLinear, ScaleLinearSpec, ScaleSpec, ScaleTime,
    ScaleTimeSpec, decimated_indices, distinct_categories,
};
pub use text_mark::TextMarkSpec;
pub use time::{
    format_minutes, format_year, year_of, year_start_seconds, year_start_timestamp,
    year_ticks_seconds,
};
pub use title::TitleSpec;
pub use tooltip::{FADE_IN_MS, FADE_OUT_MS, Fade, TOOLTIP_OFFSET, TOOLTIP_OPACITY, Tooltip};
pub use z_order::*;
