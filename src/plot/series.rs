//! Draws variables against time as a PNG line chart.

use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDateTime};
use plotters::{
    coord::{
        combinators::WithKeyPoints,
        types::{RangedCoordf64, RangedDateTime},
        Shift,
    },
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use crate::config::PlotConfig;

use super::{padded, tick_values, SeriesPlot};

const TITLE_LINE_HEIGHT: i32 = 34;

/// Renders `plot` to `path`.
pub fn render(path: &Path, plot: &SeriesPlot, config: &PlotConfig) -> Result<()> {
    let root = BitMapBackend::new(path, config.series_size).into_drawing_area();

    draw(&root, plot, config).map_err(|e| anyhow!("Failed to draw `{}`: {}", path.display(), e))
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: &SeriesPlot,
    config: &PlotConfig,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let title_lines = plot.title_lines();
    let title_height = TITLE_LINE_HEIGHT * title_lines.len() as i32 + 20;
    let (title_area, chart_area) = root.split_vertically(title_height);

    let centre = title_area.dim_in_pixel().0 as i32 / 2;
    let title_style =
        TextStyle::from(("sans-serif", 26).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in title_lines.iter().enumerate() {
        title_area.draw(&Text::new(
            line.as_str(),
            (centre, 10 + TITLE_LINE_HEIGHT * i as i32),
            title_style.clone(),
        ))?;
    }

    let (start, end) = match plot.time_range() {
        Some(range) => time_bounds(range),
        None => return Ok(()),
    };
    let (min, max) = plot.value_range().unwrap_or((0.0, 1.0));

    let mut chart = ChartBuilder::on(&chart_area)
        .margin(30)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(
            RangedDateTime::from(start..end),
            value_axis(min, max, config.y_tick_step),
        )?;

    chart
        .configure_mesh()
        .x_desc("Date and Time")
        .y_desc(plot.y_label.as_str())
        .x_labels(12)
        .x_label_formatter(&|dt: &NaiveDateTime| dt.format("%Y/%m/%d %H:%M").to_string())
        .y_label_formatter(&|v: &f64| format!("{:.1}", v))
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .light_line_style(BLACK.mix(0.1))
        .draw()?;

    for (i, (variable, series)) in plot.series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();

        chart
            .draw_series(LineSeries::new(series.points(), color.stroke_width(2)))?
            .label(variable.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 30, y)], color.stroke_width(2))
            });
        chart.draw_series(
            series
                .points()
                .map(move |point| Circle::new(point, 5, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .label_font(("sans-serif", 20))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK.mix(0.4))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;

    Ok(())
}

// Labels sit at `min`, `min + step`, ... rather than plotters' round numbers.
fn value_axis(min: f64, max: f64, step: f64) -> WithKeyPoints<RangedCoordf64> {
    let (y_min, y_max) = padded(min, max);
    let ticks = tick_values(min, max, step);

    (y_min..y_max).with_key_points(ticks)
}

// A single timestamp still needs a span to draw against.
fn time_bounds((start, end): (NaiveDateTime, NaiveDateTime)) -> (NaiveDateTime, NaiveDateTime) {
    if start == end {
        (start - Duration::hours(1), end + Duration::hours(1))
    } else {
        (start, end)
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use plotters::coord::ranged1d::BoldPoints;

    use super::*;

    #[test]
    fn should_label_values_every_step_from_minimum() {
        let axis = value_axis(10.3, 22.9, 3.0);
        let labels = axis.key_points(BoldPoints(2));
        let expected = [10.3, 13.3, 16.3, 19.3, 22.3];

        assert_eq!(labels.len(), expected.len());
        for (label, want) in labels.iter().zip(expected) {
            assert!((label - want).abs() < 1e-9, "{} != {}", label, want);
        }
        assert_eq!(axis.range(), 10.3..22.9);
    }

    #[test]
    fn should_label_flat_series_once() {
        let axis = value_axis(4.0, 4.0, 3.0);

        assert_eq!(axis.key_points(BoldPoints(10)), vec![4.0]);
        assert_eq!(axis.range(), 3.0..5.0);
    }

    #[test]
    fn should_widen_single_timestamp() {
        let t = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        let (start, end) = time_bounds((t, t));

        assert_eq!(end - start, Duration::hours(2));
        assert_eq!(time_bounds((start, end)), (start, end));
    }
}
