//! File output for chart values.

pub mod html;
pub mod svg;

use crate::chart::ScatterChart;
use crate::error::{ProfileError, Result};
use std::fs;
use std::path::Path;

pub use html::render_html_chart;
pub use svg::render_svg_chart;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Svg,
    Html,
}

impl OutputFormat {
    /// `.html`/`.htm` select HTML; everything else is SVG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("html") | Some("htm") => OutputFormat::Html,
            _ => OutputFormat::Svg,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Html => "html",
        }
    }
}

/// Write `chart` to `out`. `format` falls back to the extension of `out`.
pub fn write_chart(chart: &ScatterChart, out: &Path, format: Option<OutputFormat>) -> Result<()> {
    let format = format.unwrap_or_else(|| OutputFormat::from_path(out));

    if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| ProfileError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    match format {
        OutputFormat::Svg => render_svg_chart(chart, out)?,
        OutputFormat::Html => {
            let html = render_html_chart(chart)?;
            fs::write(out, html).map_err(|source| ProfileError::Io {
                path: out.to_path_buf(),
                source,
            })?;
        }
    }

    tracing::info!(path = %out.display(), ?format, points = chart.points.len(), "wrote chart");
    Ok(())
}
