// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart composition.
//!
//! A [`ChartSpec`] owns the layout inputs and the guides of one chart (title, left and bottom
//! axes, legend). Series marks are supplied by a builder closure that receives the resolved
//! plot rectangle, so axis scales and series scales are instantiated from the same geometry.

extern crate alloc;

use alloc::vec::Vec;

use chartpipe_core::Mark;
use kurbo::{Point, Rect};

use crate::{
    AxisSpec, ChartLayout, ChartLayoutSpec, LegendPlacement, LegendSwatchesSpec, Margins, Size,
    TextMeasurer, TitleSpec,
};

/// A composed chart description that owns guide specs and layout inputs.
#[derive(Clone, Debug, Default)]
pub struct ChartSpec {
    /// Canvas size.
    pub view_size: Size,
    /// Fixed margins around the plot.
    pub margins: Margins,
    /// Optional title, drawn in the top margin.
    pub title: Option<TitleSpec>,
    /// Optional left axis.
    pub axis_left: Option<AxisSpec>,
    /// Optional bottom axis.
    pub axis_bottom: Option<AxisSpec>,
    /// Optional legend.
    pub legend: Option<(LegendSwatchesSpec, LegendPlacement)>,
}

impl ChartSpec {
    /// Creates an empty chart of the given size and margins.
    pub fn new(view_size: Size, margins: Margins) -> Self {
        Self {
            view_size,
            margins,
            ..Self::default()
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: TitleSpec) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the left axis.
    pub fn with_axis_left(mut self, axis: AxisSpec) -> Self {
        self.axis_left = Some(axis);
        self
    }

    /// Sets the bottom axis.
    pub fn with_axis_bottom(mut self, axis: AxisSpec) -> Self {
        self.axis_bottom = Some(axis);
        self
    }

    /// Sets the legend.
    pub fn with_legend(mut self, legend: LegendSwatchesSpec, placement: LegendPlacement) -> Self {
        self.legend = Some((legend, placement));
        self
    }

    /// Computes layout for this chart.
    pub fn layout(&self, measurer: &dyn TextMeasurer) -> ChartLayout {
        let legend = self
            .legend
            .as_ref()
            .map(|(spec, placement)| (spec.measure(measurer), *placement));
        ChartLayout::arrange(&ChartLayoutSpec {
            view_size: self.view_size,
            margins: self.margins,
            legend,
        })
    }

    /// Generates marks for the title, axes and legend, given a computed layout.
    pub fn guide_marks(&self, measurer: &dyn TextMeasurer, layout: &ChartLayout) -> Vec<Mark> {
        let mut out = Vec::new();

        if let Some(title) = &self.title {
            out.extend(title.marks(measurer, layout.title_top));
        }
        if let Some(axis) = &self.axis_bottom {
            out.extend(axis.marks(layout.plot, layout.axis_bottom));
        }
        if let Some(axis) = &self.axis_left {
            out.extend(axis.marks(layout.plot, layout.axis_left));
        }
        if let (Some((legend, _)), Some(rect)) = (&self.legend, layout.legend) {
            out.extend(legend.marks(Point::new(rect.x0, rect.y0)));
        }

        out
    }

    /// Produces the full mark list: series marks followed by guide marks.
    ///
    /// The series builder is invoked with the resolved plot rectangle.
    pub fn marks(
        &self,
        measurer: &dyn TextMeasurer,
        build_series: impl FnOnce(&Self, Rect) -> Vec<Mark>,
    ) -> (ChartLayout, Vec<Mark>) {
        let layout = self.layout(measurer);
        let mut marks = build_series(self, layout.plot);
        marks.extend(self.guide_marks(measurer, &layout));
        (layout, marks)
    }
}
