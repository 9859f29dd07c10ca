// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fetches the GDP and cyclist datasets and renders each as an SVG chart with an HTML page
//! carrying its hover tooltip.

mod config;
mod dataset;
mod error;
mod fetch;
mod fit;
mod html;
mod render;
mod svg;

use anyhow::Context as _;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{SETTINGS_FILE, load_settings};
use crate::dataset::Dataset;
use crate::fetch::HttpSource;
use crate::render::RenderSession;
use crate::svg::TooltipMarkup;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings(SETTINGS_FILE)?;
    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            settings.output_dir.display()
        )
    })?;

    let source = HttpSource::new()?;
    let mut failed = 0_usize;

    for dataset in Dataset::ALL {
        let chart_settings = settings.chart(dataset).clone();
        let title = chart_settings.title.clone();
        let mut session = RenderSession::new(dataset, chart_settings);
        session.run(&source).await;

        let Some(chart) = session.chart() else {
            failed += 1;
            continue;
        };

        let svg = svg::to_svg_string(&chart.scene, chart.view, TooltipMarkup::Title);
        let svg_path = settings.output_dir.join(format!("{}.svg", dataset.name()));
        std::fs::write(&svg_path, svg)
            .with_context(|| format!("failed to write {}", svg_path.display()))?;

        let embedded = svg::to_svg_string(&chart.scene, chart.view, TooltipMarkup::DataAttribute);
        let html_path = settings.output_dir.join(format!("{}.html", dataset.name()));
        std::fs::write(&html_path, html::page(&title, &embedded))
            .with_context(|| format!("failed to write {}", html_path.display()))?;

        info!(
            %dataset,
            svg = %svg_path.display(),
            html = %html_path.display(),
            "chart written"
        );
    }

    if failed > 0 {
        warn!(failed, total = Dataset::ALL.len(), "some charts were not rendered");
    }
    Ok(())
}
