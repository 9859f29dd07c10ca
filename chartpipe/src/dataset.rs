// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dataset schemas and the transform from raw JSON into [`Record`]s.

use std::fmt;

use chartpipe_charts::{format_minutes, year_of, year_start_timestamp};
use serde::Deserialize;
use serde_json::Value;

use crate::error::DatasetError;

/// The two supported reference datasets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Dataset {
    /// Quarterly US GDP, rendered as a bar chart.
    Gdp,
    /// Alpe d'Huez climb times, rendered as a scatter plot.
    Cyclist,
}

impl Dataset {
    pub(crate) const ALL: [Self; 2] = [Self::Gdp, Self::Cyclist];

    /// Output file stem and config section name.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Gdp => "gdp",
            Self::Cyclist => "cyclist",
        }
    }

    /// Value baseline; bars grow from zero, points have none.
    pub(crate) fn baseline(self) -> Option<f64> {
        match self {
            Self::Gdp => Some(0.0),
            Self::Cyclist => None,
        }
    }

    /// Hover text for one record.
    pub(crate) fn tooltip(self, record: &Record) -> String {
        match self {
            Self::Gdp => format!("{}\n${} Billion", record.key, record.value),
            Self::Cyclist => format!(
                "Year: {}\nName: {}\nDoping: {}",
                record.key,
                record.label.as_deref().unwrap_or(""),
                record.flag.as_deref().unwrap_or("None"),
            ),
        }
    }

    /// Formats a y-axis tick.
    pub(crate) fn format_value(self, v: f64, step: f64) -> String {
        match self {
            Self::Gdp => chartpipe_charts::format_tick_with_step(v, step),
            Self::Cyclist => format_minutes(v),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a record along the x axis.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Key {
    /// A category label, kept verbatim.
    Category(String),
    /// Unix seconds.
    Instant(i64),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(c) => f.write_str(c),
            Self::Instant(secs) => match year_of(*secs as f64) {
                Some(year) => write!(f, "{year}"),
                None => write!(f, "{secs}"),
            },
        }
    }
}

/// One normalized data point.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Record {
    pub(crate) key: Key,
    /// Plotted quantity in display units (billions of dollars, or decimal minutes).
    pub(crate) value: f64,
    pub(crate) label: Option<String>,
    pub(crate) flag: Option<String>,
}

impl Record {
    pub(crate) fn flagged(&self) -> bool {
        self.flag.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct GdpPoint(String, f64);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CyclistEntry {
    year: i32,
    seconds: f64,
    name: String,
    #[serde(default)]
    doping: String,
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validates the container shape and maps every raw record into a [`Record`].
///
/// The first record that does not match its schema fails the whole transform.
pub(crate) fn normalize(dataset: Dataset, raw: &Value) -> Result<Vec<Record>, DatasetError> {
    let items = match dataset {
        Dataset::Gdp => raw
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| DatasetError::Shape {
                dataset,
                expected: "an object with a `data` array",
                found: match raw.get("data") {
                    Some(data) => kind_of(data),
                    None => kind_of(raw),
                },
            })?,
        Dataset::Cyclist => raw.as_array().ok_or_else(|| DatasetError::Shape {
            dataset,
            expected: "an array of records",
            found: kind_of(raw),
        })?,
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let record = |source: serde_json::Error| DatasetError::Record {
                dataset,
                index,
                source,
            };
            match dataset {
                Dataset::Gdp => {
                    let GdpPoint(date, value) = GdpPoint::deserialize(item).map_err(record)?;
                    Ok(Record {
                        key: Key::Category(date),
                        value,
                        label: None,
                        flag: None,
                    })
                }
                Dataset::Cyclist => {
                    let entry = CyclistEntry::deserialize(item).map_err(record)?;
                    let start = year_start_timestamp(entry.year).ok_or_else(|| {
                        record(serde::de::Error::custom(format!(
                            "year {} is out of range",
                            entry.year
                        )))
                    })?;
                    Ok(Record {
                        key: Key::Instant(start),
                        value: entry.seconds / 60.0,
                        label: Some(entry.name),
                        flag: Some(entry.doping).filter(|d| !d.is_empty()),
                    })
                }
            }
        })
        .collect()
}
