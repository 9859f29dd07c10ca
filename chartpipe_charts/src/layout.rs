// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-margin chart layout.
//!
//! The canvas is split into a plot rectangle (canvas minus margins) and the four margin strips
//! around it. Axes are arranged into the strips adjacent to the plot, the title into the top
//! strip, and the legend inside the top-right corner of the plot.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Per-side margins between the canvas edge and the plot rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot.
    pub bottom: f64,
    /// Space left of the plot.
    pub left: f64,
}

impl Margins {
    /// Creates margins in CSS order: top, right, bottom, left.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Legend placement inside the top-right corner of the plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendPlacement {
    /// Inset from the plot's top and right edges.
    pub offset: f64,
}

impl Default for LegendPlacement {
    fn default() -> Self {
        Self { offset: 10.0 }
    }
}

/// Layout inputs for a single chart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayoutSpec {
    /// Outer canvas size.
    pub view_size: Size,
    /// Fixed margins around the plot.
    pub margins: Margins,
    /// Optional legend, given by its measured size and placement.
    pub legend: Option<(Size, LegendPlacement)>,
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// Strip above the plot, used for the chart title.
    pub title_top: Rect,
    /// The plot rectangle; scales map into this.
    pub plot: Rect,
    /// Strip left of the plot.
    pub axis_left: Rect,
    /// Strip below the plot.
    pub axis_bottom: Rect,
    /// Legend placement rectangle (if any).
    pub legend: Option<Rect>,
}

impl ChartLayout {
    /// Computes a layout from the provided specification.
    ///
    /// Margins larger than the canvas collapse the plot to zero size rather than inverting it.
    pub fn arrange(spec: &ChartLayoutSpec) -> Self {
        let w = spec.view_size.width.max(0.0);
        let h = spec.view_size.height.max(0.0);
        let m = spec.margins;
        let left = m.left.max(0.0).min(w);
        let top = m.top.max(0.0).min(h);
        let plot_w = (w - left - m.right.max(0.0)).max(0.0);
        let plot_h = (h - top - m.bottom.max(0.0)).max(0.0);

        let view = Rect::new(0.0, 0.0, w, h);
        let plot = Rect::new(left, top, left + plot_w, top + plot_h);

        Self {
            view,
            title_top: Rect::new(0.0, 0.0, w, plot.y0),
            plot,
            axis_left: Rect::new(0.0, plot.y0, plot.x0, plot.y1),
            axis_bottom: Rect::new(plot.x0, plot.y1, plot.x1, h.max(plot.y1)),
            legend: spec
                .legend
                .map(|(size, placement)| legend_rect(plot, size, placement)),
        }
    }
}

fn legend_rect(plot: Rect, size: Size, placement: LegendPlacement) -> Rect {
    let w = size.width.max(0.0);
    let h = size.height.max(0.0);
    let offset = placement.offset.max(0.0);

    Rect::new(
        plot.x1 - offset - w,
        plot.y0 + offset,
        plot.x1 - offset,
        plot.y0 + offset + h,
    )
}
