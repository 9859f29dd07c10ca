// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for each pipeline stage.

use thiserror::Error;

use crate::dataset::Dataset;

/// Failure to obtain the raw JSON resource.
#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("HTTP error fetching data: {0}")]
    Http(#[source] reqwest::Error),
    #[error("{url} responded with status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The fetched JSON does not match the dataset schema.
#[derive(Debug, Error)]
pub(crate) enum DatasetError {
    #[error("{dataset} data: expected {expected}, found {found}")]
    Shape {
        dataset: Dataset,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{dataset} data: record {index} is malformed: {source}")]
    Record {
        dataset: Dataset,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Any failure that ends a render session.
#[derive(Debug, Error)]
pub(crate) enum RenderError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_error_names_dataset_and_found_kind() {
        let err = RenderError::from(DatasetError::Shape {
            dataset: Dataset::Cyclist,
            expected: "an array of records",
            found: "null",
        });
        assert_eq!(
            err.to_string(),
            "cyclist data: expected an array of records, found null"
        );
    }

    #[test]
    fn record_error_reports_index() {
        let source = serde_json::from_str::<f64>("\"x\"").unwrap_err();
        let err = DatasetError::Record {
            dataset: Dataset::Gdp,
            index: 3,
            source,
        };
        assert!(err.to_string().starts_with("gdp data: record 3 is malformed"));
    }
}
