// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time tick generation and formatting helpers.
//!
//! Time is modeled as a numeric value in **seconds**. Ticks fall on calendar years
//! (January 1, 00:00 UTC) and are formatted like `1998`.
//!
//! Durations measured in decimal minutes are formatted as `M:SS` by [`format_minutes`].

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use chrono::{DateTime, Datelike, NaiveDate};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Returns the calendar-year ticks inside `[min, max]` (seconds since the Unix epoch).
///
/// The year step is picked from `1, 2, 5, 10, 20, 50, ...` so that at most roughly `count`
/// ticks are produced. Each tick is January 1, 00:00 UTC of a year divisible by the step.
pub fn year_ticks_seconds(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let (Some(y0), Some(y1)) = (year_of(min), year_of(max)) else {
        return Vec::new();
    };

    let span = (y1 - y0).max(1);
    let count = i32::try_from(count).unwrap_or(i32::MAX);
    let step = [1, 2, 5, 10, 20, 50, 100, 200, 500, 1000]
        .into_iter()
        .find(|&s| span / s < count)
        .unwrap_or(1000);

    let first = y0.div_euclid(step) * step;
    (0..)
        .map(|i| first + i * step)
        .take_while(|&y| y <= y1)
        .filter_map(year_start_seconds)
        .filter(|&t| t >= min && t <= max)
        .collect()
}

/// Returns the Unix timestamp of January 1, 00:00 UTC of `year`.
pub fn year_start_timestamp(year: i32) -> Option<i64> {
    let date = NaiveDate::from_ymd_opt(year, 1, 1)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}

/// Returns the timestamp (seconds) of January 1, 00:00 UTC of `year`.
pub fn year_start_seconds(year: i32) -> Option<f64> {
    year_start_timestamp(year).map(|secs| secs as f64)
}

/// Returns the UTC calendar year containing the timestamp (seconds).
pub fn year_of(seconds: f64) -> Option<i32> {
    let secs = seconds.floor().clamp(i64::MIN as f64, i64::MAX as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
    let dt = DateTime::from_timestamp(secs as i64, 0)?;
    Some(dt.year())
}

/// Formats a timestamp (seconds) as its UTC calendar year.
pub fn format_year(seconds: f64) -> String {
    match year_of(seconds) {
        Some(y) => alloc::format!("{y}"),
        None => alloc::format!("{seconds}"),
    }
}

/// Formats a duration given in decimal minutes as `M:SS` (rounded to whole seconds).
///
/// `36.5` formats as `36:30`.
pub fn format_minutes(minutes: f64) -> String {
    if !minutes.is_finite() {
        return alloc::format!("{minutes}");
    }
    let sign = if minutes < 0.0 { "-" } else { "" };
    let secs = whole_seconds(minutes.abs() * 60.0);
    alloc::format!("{sign}{}:{:02}", secs / 60, secs % 60)
}

fn whole_seconds(v: f64) -> i64 {
    let secs_f = v.round().clamp(i64::MIN as f64, i64::MAX as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
    {
        secs_f as i64
    }
}
