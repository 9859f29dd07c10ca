// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain fitting: one pass over the records to find key and value extents.

use chartpipe_charts::{
    ScaleBandSpec, ScaleLinearSpec, ScaleSpec, ScaleTimeSpec, distinct_categories,
};

use crate::dataset::{Key, Record};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum KeyDomain {
    /// Distinct categories in first-seen order.
    Categories(Vec<String>),
    /// Earliest and latest instant, in seconds.
    Span(f64, f64),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Domain {
    pub(crate) key: KeyDomain,
    pub(crate) value: (f64, f64),
}

impl Domain {
    /// Scale spec for the x axis.
    pub(crate) fn key_scale(&self) -> ScaleSpec {
        match &self.key {
            KeyDomain::Categories(c) => ScaleBandSpec::new(c.len()).into(),
            KeyDomain::Span(min, max) => ScaleTimeSpec::years((*min, *max)).into(),
        }
    }

    /// Scale spec for the y axis, niced outward.
    pub(crate) fn value_scale(&self) -> ScaleSpec {
        ScaleLinearSpec::new(self.value).with_nice(true).into()
    }
}

/// Computes key and value domains in a single scan.
///
/// With a `baseline`, the value domain is widened to include it. An empty record list yields
/// an empty key domain and the value domain `(0, 1)`.
pub(crate) fn fit_domain(records: &[Record], baseline: Option<f64>) -> Domain {
    let mut value: Option<(f64, f64)> = baseline.map(|b| (b, b));
    let mut span: Option<(f64, f64)> = None;
    let mut categorical = false;

    for r in records {
        if r.value.is_finite() {
            value = Some(match value {
                None => (r.value, r.value),
                Some((lo, hi)) => (lo.min(r.value), hi.max(r.value)),
            });
        }
        match r.key {
            Key::Category(_) => categorical = true,
            Key::Instant(secs) => {
                let t = secs as f64;
                span = Some(match span {
                    None => (t, t),
                    Some((lo, hi)) => (lo.min(t), hi.max(t)),
                });
            }
        }
    }

    let key = match span {
        Some((min, max)) if !categorical => KeyDomain::Span(min, max),
        _ => KeyDomain::Categories(distinct_categories(records.iter().filter_map(|r| {
            match &r.key {
                Key::Category(c) => Some(c.as_str()),
                Key::Instant(_) => None,
            }
        }))),
    };

    let value = match value {
        Some(v) if records.is_empty() && baseline.is_some() => (v.0, v.0 + 1.0),
        Some(v) => v,
        None => (0.0, 1.0),
    };

    Domain { key, value }
}
