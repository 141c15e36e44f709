use filament_common::{ContactMatrix, CONTACT, SELF_MARK};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

// Sequential light-to-dark palette, lightest for "no contact".
const EMPTY_COLOR: RGBColor = RGBColor(250, 235, 221);
const CONTACT_COLOR: RGBColor = RGBColor(221, 44, 69);
const SELF_COLOR: RGBColor = RGBColor(3, 5, 26);

pub fn cell_color(value: u8) -> RGBColor {
    match value {
        SELF_MARK => SELF_COLOR,
        CONTACT => CONTACT_COLOR,
        _ => EMPTY_COLOR,
    }
}

/// Draws the contact matrix as a heatmap with segment 0 in the top-left corner.
pub fn render_heatmap(
    matrix: &ContactMatrix,
    out_path: &Path,
    dimensions: (u32, u32),
    caption: &str,
) -> Result<(), Box<dyn Error>> {
    let n = matrix.size() as f64;

    let root = BitMapBackend::new(out_path, dimensions).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..n, 0.0..n)?;

    // Rows are drawn top-down, so the y labels count down from the top edge.
    let row_label = |y: &f64| format!("{:.0}", n - y);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("segment")
        .y_desc("segment")
        .y_label_formatter(&row_label)
        .draw()?;

    chart.draw_series((0..matrix.size()).flat_map(move |a| {
        let top = n - a as f64;
        matrix.row(a).iter().enumerate().map(move |(b, &value)| {
            Rectangle::new(
                [(b as f64, top - 1.0), (b as f64 + 1.0, top)],
                cell_color(value).filled(),
            )
        })
    }))?;

    root.present()?;
    Ok(())
}
