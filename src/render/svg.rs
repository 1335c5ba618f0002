use crate::chart::ScatterChart;
use crate::error::{ProfileError, Result};
use plotters::prelude::*;
use std::path::Path;

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 768;

fn render_err(e: impl std::fmt::Display) -> ProfileError {
    ProfileError::Render(e.to_string())
}

/// Draw `chart` as a scatter plot into an SVG file.
pub fn render_svg_chart(chart: &ScatterChart, out: &Path) -> Result<()> {
    let root = SVGBackend::new(out, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let area = root
        .titled(&chart.title, ("sans-serif", 24))
        .map_err(render_err)?;

    let bounds = chart.bounds();
    let mut builder = ChartBuilder::on(&area);
    builder
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72);
    if let Some(subtitle) = &chart.subtitle {
        builder.caption(subtitle, ("sans-serif", 16));
    }

    let mut ctx = builder
        .build_cartesian_2d(bounds.x_min..bounds.x_max, bounds.y_min..bounds.y_max)
        .map_err(render_err)?;

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()
        .map_err(render_err)?;

    ctx.draw_series(
        chart
            .points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
    )
    .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}
