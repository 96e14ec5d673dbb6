//! Renders concentration trajectories to PNG charts.

use anyhow::Result;
use kinetik_core::simulation::state::TrajectorySelection;
use plotters::prelude::*;
use std::path::Path;

/// Evenly spaced hues, one per series, from red through violet.
fn rainbow(n: usize) -> Vec<RGBAColor> {
    (0..n)
        .map(|i| {
            let hue = if n > 1 { 0.8 * i as f64 / (n - 1) as f64 } else { 0.0 };
            HSLColor(hue, 0.85, 0.45).to_rgba()
        })
        .collect()
}

/// Draws one line per selected species against time and saves it to `path`.
pub fn plot_concentrations(path: &Path, selection: &TrajectorySelection, title: &str) -> Result<()> {
    let root = BitMapBackend::new(path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let end_time = selection.times.last().copied().filter(|t| *t > 0.0).unwrap_or(1.0);
    let max_concentration = match selection.max_value() {
        m if m > 0.0 => m * 1.1,
        _ => 1.0,
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..end_time, 0f64..max_concentration)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Concentration")
        .draw()?;

    let colors = rainbow(selection.series.len());
    for (series, color) in selection.series.iter().zip(colors) {
        chart
            .draw_series(LineSeries::new(
                selection.times.iter().copied().zip(series.values.iter().copied()),
                color.stroke_width(2),
            ))?
            .label(series.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
