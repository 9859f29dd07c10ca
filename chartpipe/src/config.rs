// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settings loaded from an optional `chartpipe.{toml,json,yaml}` file.

use std::path::PathBuf;

use chartpipe_charts::{Margins, Size};
use serde::Deserialize;

use crate::dataset::Dataset;

/// Config file stem; the extension picks the format.
pub(crate) const SETTINGS_FILE: &str = "chartpipe";

const GDP_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/GDP-data.json";
const CYCLIST_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/cyclist-data.json";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) output_dir: PathBuf,
    pub(crate) gdp: ChartSettings,
    pub(crate) cyclist: ChartSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            gdp: ChartSettings::for_dataset(Dataset::Gdp),
            cyclist: ChartSettings::for_dataset(Dataset::Cyclist),
        }
    }
}

impl Settings {
    pub(crate) fn chart(&self, dataset: Dataset) -> &ChartSettings {
        match dataset {
            Dataset::Gdp => &self.gdp,
            Dataset::Cyclist => &self.cyclist,
        }
    }
}

/// Per-chart settings. Keys missing from the file take the defaults of the section's dataset.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct ChartSettings {
    pub(crate) url: String,
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) margin: MarginSettings,
    pub(crate) title: String,
    pub(crate) x_caption: String,
    pub(crate) y_caption: String,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub(crate) struct MarginSettings {
    pub(crate) top: f64,
    pub(crate) right: f64,
    pub(crate) bottom: f64,
    pub(crate) left: f64,
}

impl ChartSettings {
    pub(crate) fn for_dataset(dataset: Dataset) -> Self {
        match dataset {
            Dataset::Gdp => Self {
                url: GDP_URL.into(),
                width: 600.0,
                height: 400.0,
                margin: MarginSettings {
                    top: 40.0,
                    right: 30.0,
                    bottom: 50.0,
                    left: 70.0,
                },
                title: "United States GDP".into(),
                x_caption: "Year".into(),
                y_caption: "Gross Domestic Product (Billions)".into(),
            },
            Dataset::Cyclist => Self {
                url: CYCLIST_URL.into(),
                width: 900.0,
                height: 600.0,
                margin: MarginSettings {
                    top: 80.0,
                    right: 40.0,
                    bottom: 60.0,
                    left: 70.0,
                },
                title: "Doping in Professional Bicycle Racing".into(),
                x_caption: "Year".into(),
                y_caption: "Time in Minutes".into(),
            },
        }
    }

    pub(crate) fn view_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub(crate) fn margins(&self) -> Margins {
        let m = self.margin;
        Margins::new(m.top, m.right, m.bottom, m.left)
    }
}

/// Loads settings from `<name>.toml` (or `.json`/`.yaml`) if present, over compiled-in defaults.
pub(crate) fn load_settings(name: &str) -> anyhow::Result<Settings> {
    let mut builder = config::Config::builder();
    for dataset in Dataset::ALL {
        builder = set_chart_defaults(builder, dataset)?;
    }
    let settings = builder
        .set_default("output_dir", ".")?
        .add_source(config::File::with_name(name).required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn set_chart_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    dataset: Dataset,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    let d = ChartSettings::for_dataset(dataset);
    let key = |field: &str| format!("{}.{field}", dataset.name());
    builder
        .set_default(key("url"), d.url)?
        .set_default(key("width"), d.width)?
        .set_default(key("height"), d.height)?
        .set_default(key("margin.top"), d.margin.top)?
        .set_default(key("margin.right"), d.margin.right)?
        .set_default(key("margin.bottom"), d.margin.bottom)?
        .set_default(key("margin.left"), d.margin.left)?
        .set_default(key("title"), d.title)?
        .set_default(key("x_caption"), d.x_caption)?
        .set_default(key("y_caption"), d.y_caption)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_settings("definitely-not-a-chartpipe-config").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.gdp.margins(), Margins::new(40.0, 30.0, 50.0, 70.0));
        assert_eq!(settings.cyclist.view_size(), Size::new(900.0, 600.0));
    }

    #[test]
    fn file_overrides_individual_keys() {
        let dir = std::env::temp_dir().join(format!("chartpipe-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("chartpipe.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "output_dir = \"out\"\n\n[cyclist]\nwidth = 1000\n\n[cyclist.margin]\ntop = 90").unwrap();
        drop(file);

        let name = dir.join("chartpipe");
        let settings = load_settings(name.to_str().unwrap()).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.cyclist.width, 1000.0);
        assert_eq!(settings.cyclist.margin.top, 90.0);
        assert_eq!(settings.cyclist.margin.left, 70.0);
        assert_eq!(settings.cyclist.height, 600.0);
        assert_eq!(settings.gdp, ChartSettings::for_dataset(Dataset::Gdp));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
