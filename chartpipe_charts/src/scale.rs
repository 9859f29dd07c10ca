// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: mappings from data values into scene coordinates.
//!
//! Specs (`*Spec`) carry the domain and options; instantiating a spec with an output range
//! yields a concrete scale. Axes and marks share scale instances so tick positions and mark
//! positions agree.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::time;

/// A scale specification (domain + options, no range yet).
#[derive(Clone, Copy, Debug)]
pub enum ScaleSpec {
    /// Continuous linear scale.
    Linear(ScaleLinearSpec),
    /// Continuous time scale over timestamps in seconds.
    Time(ScaleTimeSpec),
    /// Discrete band scale.
    Band(ScaleBandSpec),
}

impl From<ScaleLinearSpec> for ScaleSpec {
    fn from(value: ScaleLinearSpec) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleTimeSpec> for ScaleSpec {
    fn from(value: ScaleTimeSpec) -> Self {
        Self::Time(value)
    }
}

impl From<ScaleBandSpec> for ScaleSpec {
    fn from(value: ScaleBandSpec) -> Self {
        Self::Band(value)
    }
}

/// A continuous scale instance.
#[derive(Clone, Copy, Debug)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Time scale.
    Time(ScaleTime),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Returns tick values.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// Returns the minimum of the domain.
    pub fn domain_min(&self) -> f64 {
        match self {
            Self::Linear(s) => s.domain_min(),
            Self::Time(s) => s.domain_min(),
        }
    }

    /// Returns the maximum of the domain.
    pub fn domain_max(&self) -> f64 {
        match self {
            Self::Linear(s) => s.domain_max(),
            Self::Time(s) => s.domain_max(),
        }
    }
}

/// An affine mapping from a continuous domain to a continuous range.
///
/// A degenerate domain (`d0 == d1`) maps every value to the middle of the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to extend the domain outward to round tick values.
    pub nice: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return 0.5 * (r0 + r1);
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the minimum of the domain.
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the domain.
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }

    /// Returns the output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns “nice-ish” tick values covering the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
            .into_iter()
            .filter(|t| within(*t, self.domain))
            .collect()
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        match nice_ticks(self.domain.0, self.domain.1, tick_count).as_slice() {
            [first, .., last] => (*first, *last),
            _ => self.domain,
        }
    }

    /// Instantiates a concrete scale for a given output range, ignoring `nice`.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        ScaleLinear::new(self.domain, range)
    }

    /// Instantiates a concrete scale using the `resolved_domain` (respecting `nice`).
    pub fn instantiate_resolved(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

fn within(v: f64, (a, b): (f64, f64)) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let eps = 1.0e-9 * (hi - lo).abs().max(1.0);
    v >= lo - eps && v <= hi + eps
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

// Step multipliers switch at the geometric midpoints between 1, 2, 5 and 10.
const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = core::f64::consts::SQRT_2;

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor().clamp(-300.0, 300.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
    let base = 10_f64.powi(power as i32);
    let error = step / base;
    let nice = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete band scale for categorical charts.
///
/// The range is divided into `count` equal steps; each band is its step shrunk by the inner
/// padding fraction, and the outer padding (in step units) is split evenly at both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

/// Specification for a band scale (count + padding, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBandSpec {
    /// Number of bands.
    pub count: usize,
    /// Inner padding as a fraction of the step, in `[0, 1)`.
    pub padding_inner: f64,
    /// Outer padding in step units.
    pub padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`, with padding `0.1`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 0.99);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let n = self.count as f64;
        let denom = (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        (self.range.1 - self.range.0).abs() / denom
    }

    /// Returns the band width.
    pub fn band_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the start coordinate of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let start = r0.min(r1);
        let span = (r1 - r0).abs();
        let step = self.step();
        let n = self.count as f64;
        let used = step * (n - self.padding_inner);
        start + 0.5 * (span - used) + step * index as f64
    }

    /// Returns the center coordinate of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + 0.5 * self.band_width()
    }
}

impl ScaleBandSpec {
    /// Creates a new band scale spec with padding `0.1`.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 0.99);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleBand {
        ScaleBand::new(range, self.count).with_padding(self.padding_inner, self.padding_outer)
    }
}

/// A time scale: an affine mapping over timestamps in seconds, ticked at calendar years.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

/// Specification for a time scale (domain, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTimeSpec {
    /// Domain in seconds.
    pub domain: (f64, f64),
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Returns January 1 ticks inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        time::year_ticks_seconds(self.inner.domain_min(), self.inner.domain_max(), count)
    }

    /// Returns the minimum of the domain.
    pub fn domain_min(&self) -> f64 {
        self.inner.domain_min()
    }

    /// Returns the maximum of the domain.
    pub fn domain_max(&self) -> f64 {
        self.inner.domain_max()
    }
}

impl ScaleTimeSpec {
    /// Creates a new time scale spec with calendar-year ticks.
    pub fn years(domain: (f64, f64)) -> Self {
        Self { domain }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleTime {
        ScaleTime::new(self.domain, range)
    }
}

/// Returns the distinct categories in first-seen order.
pub fn distinct_categories<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter()
        .filter(|k| seen.insert(*k))
        .map(String::from)
        .collect()
}

/// Selects every `ceil(count / max_labels)`-th index, starting at zero.
///
/// Used to label a subset of band categories; the result has at most `max_labels` entries.
pub fn decimated_indices(count: usize, max_labels: usize) -> Vec<usize> {
    if count == 0 || max_labels == 0 {
        return Vec::new();
    }
    let stride = count.div_ceil(max_labels);
    (0..count).step_by(stride).collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn linear_maps_endpoints_inverted_for_vertical_axes() {
        let s = ScaleLinear::new((10.0, 20.0), (330.0, 0.0));
        assert_eq!(s.map(10.0), 330.0);
        assert_eq!(s.map(20.0), 0.0);
        assert!(s.map(12.0) > s.map(18.0));
    }

    #[test]
    fn degenerate_domain_maps_to_range_middle() {
        let s = ScaleLinearSpec::new((50.0, 50.0))
            .with_nice(true)
            .instantiate_resolved((300.0, 100.0), 10);
        let y = s.map(50.0);
        assert!(y.is_finite());
        assert_eq!(y, 200.0);
    }

    #[test]
    fn nice_extends_domain_to_round_values() {
        let spec = ScaleLinearSpec::new((0.0, 150.0)).with_nice(true);
        let (d0, d1) = spec.resolved_domain(10);
        assert_eq!(d0, 0.0);
        assert!((150.0..=200.0).contains(&d1));
        assert_eq!(spec.resolved_domain(10), ScaleLinearSpec::new((0.0, 160.0)).domain);
    }

    #[test]
    fn nice_step_switches_at_geometric_midpoints() {
        // 0.31 per tick is below sqrt(10) tenths, so the step rounds down to 0.2.
        let (d0, d1) = ScaleLinearSpec::new((0.0, 3.1)).with_nice(true).resolved_domain(10);
        assert_eq!(d0, 0.0);
        assert!((d1 - 3.2).abs() < 1e-9);
        // 7.2 per tick is above sqrt(50), so the step rounds up to 10.
        let spec = ScaleLinearSpec::new((0.0, 72.0)).with_nice(true);
        assert_eq!(spec.resolved_domain(10), (0.0, 80.0));

        let (d0, d1) = ScaleLinearSpec::new((36.5, 39.0 + 50.0 / 60.0))
            .with_nice(true)
            .resolved_domain(10);
        assert!((d0 - 36.5).abs() < 1e-9);
        assert!((d1 - 40.0).abs() < 1e-9);
    }

    #[test]
    fn band_geometry_matches_padded_slots() {
        let band = ScaleBand::new((0.0, 100.0), 4);
        // step = 100 / (4 - 0.1 + 0.2)
        let step = 100.0 / 4.1;
        assert!((band.step() - step).abs() < 1e-9);
        assert!((band.band_width() - 0.9 * step).abs() < 1e-9);
        // Outer padding is split evenly, so the first band starts `0.1 * step` in.
        assert!((band.x(0) - 0.1 * step).abs() < 1e-9);
        let last_end = band.x(3) + band.band_width();
        assert!((100.0 - last_end - 0.1 * step).abs() < 1e-9);
    }

    #[test]
    fn band_positions_are_monotonic_and_distinct() {
        let band = ScaleBand::new((0.0, 520.0), 275);
        let xs: Vec<f64> = (0..275).map(|i| band.x(i)).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert!(xs.iter().all(|x| *x >= 0.0 && *x <= 520.0));
    }

    #[test]
    fn time_scale_is_affine_and_order_preserving() {
        let s = ScaleTimeSpec::years((0.0, 100.0)).instantiate((0.0, 1000.0));
        assert_eq!(s.map(0.0), 0.0);
        assert_eq!(s.map(25.0), 250.0);
        assert_eq!(s.map(100.0), 1000.0);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let cats = distinct_categories(["b", "a", "b", "c", "a"]);
        assert_eq!(cats, ["b", "a", "c"]);
    }

    #[test]
    fn decimation_bounds_label_count() {
        assert_eq!(decimated_indices(3, 10), [0, 1, 2]);
        let idx = decimated_indices(275, 10);
        assert_eq!(idx.len(), 10);
        assert_eq!(idx[1], 28);
        assert!(decimated_indices(0, 10).is_empty());
    }
}
