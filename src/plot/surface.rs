//! Draws one variable over latitude and longitude as a triangulated 3D surface.

use std::path::Path;

use anyhow::{anyhow, Result};
use delaunator::{triangulate, Point};
use plotters::{coord::Shift, prelude::*};
use tracing::warn;

use crate::config::PlotConfig;

use super::{padded, SurfacePlot};

const COLOUR_BAR_WIDTH: u32 = 260;
const COLOUR_BAR_STEPS: usize = 64;

/// Renders `plot` to `path`.
pub fn render(path: &Path, plot: &SurfacePlot, config: &PlotConfig) -> Result<()> {
    let root = BitMapBackend::new(path, config.surface_size).into_drawing_area();
    let triangles = triangles(plot);
    if triangles.is_empty() {
        warn!(file = %path.display(), "points are collinear, drawing without a surface");
    }

    draw(&root, plot, &triangles, config)
        .map_err(|e| anyhow!("Failed to draw `{}`: {}", path.display(), e))
}

/// Delaunay triangles over (latitude, longitude) as point index triples.
pub fn triangles(plot: &SurfacePlot) -> Vec<[usize; 3]> {
    let points: Vec<Point> = plot
        .points
        .latitudes
        .iter()
        .zip(&plot.points.longitudes)
        .map(|(&x, &y)| Point { x, y })
        .collect();

    triangulate(&points)
        .triangles
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect()
}

/// Blue through red as `t` goes from 0 to 1.
pub fn jet(t: f64) -> HSLColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    HSLColor((1.0 - t) * 240.0 / 360.0, 1.0, 0.5)
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: &SurfacePlot,
    triangles: &[[usize; 3]],
    config: &PlotConfig,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let width = root.dim_in_pixel().0;
    let (plot_area, bar_area) =
        root.split_horizontally(width.saturating_sub(COLOUR_BAR_WIDTH) as i32);

    let points = &plot.points;
    let (lat_min, lat_max) = bounds(&points.latitudes);
    let (lon_min, lon_max) = bounds(&points.longitudes);
    let (v_min, v_max) = plot.value_range().unwrap_or((0.0, 1.0));

    // Values rise from the ground plane at zero unless some lie below it.
    let floor = v_min.min(0.0);
    let top = v_max + config.z_padding;

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(plot.title(config), ("sans-serif", 32))
        .margin(40)
        .build_cartesian_3d(lat_min..lat_max, floor..top, lon_min..lon_max)?;

    let pitch = config.view_elevation.to_radians();
    let yaw = config.view_azimuth.to_radians();
    chart.with_projection(|mut pb| {
        pb.pitch = pitch;
        pb.yaw = yaw;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .label_style(("sans-serif", 16))
        .draw()?;

    let (c_min, c_max) = padded(v_min, v_max);
    let at = |i: usize| (points.latitudes[i], points.values[i], points.longitudes[i]);

    chart.draw_series(triangles.iter().map(|t| {
        let mean = t.iter().map(|&i| points.values[i]).sum::<f64>() / 3.0;
        let colour = jet((mean - c_min) / (c_max - c_min));
        Polygon::new(vec![at(t[0]), at(t[1]), at(t[2])], colour.mix(0.9).filled())
    }))?;

    if config.drop_lines {
        let marker = BLACK.mix(0.5);
        chart.draw_series((0..points.len()).map(|i| {
            let (x, y, z) = at(i);
            PathElement::new(vec![(x, floor, z), (x, y, z)], BLACK.stroke_width(1))
        }))?;
        chart.draw_series((0..points.len()).map(|i| Circle::new(at(i), 3, marker.filled())))?;
        chart.draw_series((0..points.len()).map(|i| {
            let (x, _, z) = at(i);
            Circle::new((x, floor, z), 3, marker.filled())
        }))?;
    }

    let axis_font = ("sans-serif", 22).into_font();
    let lat_mid = (lat_min + lat_max) / 2.0;
    let lon_mid = (lon_min + lon_max) / 2.0;
    chart.draw_series([
        Text::new("Latitude".to_string(), (lat_mid, floor, lon_min), axis_font.clone()),
        Text::new("Longitude".to_string(), (lat_max, floor, lon_mid), axis_font.clone()),
        Text::new(plot.z_label.clone(), (lat_min, top, lon_min), axis_font),
    ])?;

    draw_colour_bar(&bar_area, &plot.z_label, c_min, c_max)?;

    root.present()?;

    Ok(())
}

fn draw_colour_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    label: &str,
    min: f64,
    max: f64,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let mut bar = ChartBuilder::on(area)
        .margin_top(150)
        .margin_bottom(150)
        .margin_right(100)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..1.0, min..max)?;

    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .y_desc(label)
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 20))
        .draw()?;

    let step = (max - min) / COLOUR_BAR_STEPS as f64;
    bar.draw_series((0..COLOUR_BAR_STEPS).map(|i| {
        let lower = min + step * i as f64;
        let colour = jet((i as f64 + 0.5) / COLOUR_BAR_STEPS as f64);
        Rectangle::new([(0.0, lower), (1.0, lower + step)], colour.filled())
    }))?;

    Ok(())
}

fn bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min.is_finite() && max.is_finite() {
        padded(min, max)
    } else {
        (0.0, 1.0)
    }
}

// -- Tests -------------------------------------------------------------------
