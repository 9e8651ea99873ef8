//! Plot descriptions and rendering.
//!
//! [`SeriesPlot`] and [`SurfacePlot`] hold everything needed to draw one image:
//! data, labels, title and file name. Drawing itself is delegated to
//! `plotters` in the submodules.

pub mod series;
pub mod surface;

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;

use crate::{
    config::PlotConfig,
    selection::TimeBase,
    series::{SurfacePoints, TimeSeries},
};

/// Variables of one station plotted against time.
#[derive(Debug, Clone)]
pub struct SeriesPlot {
    pub station: String,
    pub y_label: String,
    /// `(variable, series)` in the order the variables were selected.
    pub series: Vec<(String, TimeSeries)>,
}

impl SeriesPlot {
    /// Fails if no variable was given or any variable has no values.
    pub fn new(station: &str, y_label: &str, series: Vec<(String, TimeSeries)>) -> Result<Self> {
        if series.is_empty() {
            return Err(anyhow!("No variables to plot for station {}", station));
        }
        if let Some((variable, _)) = series.iter().find(|(_, s)| s.is_empty()) {
            return Err(anyhow!(
                "No valid `{}` values for station {}",
                variable,
                station
            ));
        }

        Ok(SeriesPlot {
            station: station.to_string(),
            y_label: y_label.to_string(),
            series,
        })
    }

    /// One line per variable: its name and time span at this station.
    pub fn title_lines(&self) -> Vec<String> {
        self.series
            .iter()
            .filter_map(|(variable, s)| {
                let (start, end) = (s.start()?, s.end()?);
                Some(format!(
                    "{} from {} to {} UTC for {}",
                    title_case(variable),
                    start.format("%Y/%m/%d %H:%M"),
                    end.format("%Y/%m/%d %H:%M"),
                    self.station
                ))
            })
            .collect()
    }

    /// `station_var1_var2_YYYYMMDDHHMM.png`, stamped with the first time of
    /// the last variable.
    pub fn file_name(&self, config: &PlotConfig) -> String {
        let mut name = format!("{}_", self.station);
        for (variable, _) in &self.series {
            name.push_str(variable.trim());
            name.push('_');
        }
        if let Some(start) = self.series.last().and_then(|(_, s)| s.start()) {
            name.push_str(&start.format(&config.file_stamp_format).to_string());
        }
        name.push_str(".png");

        name
    }

    /// Earliest and latest timestamp over all variables.
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.series.iter().filter_map(|(_, s)| s.start()).min()?;
        let end = self.series.iter().filter_map(|(_, s)| s.end()).max()?;

        Some((start, end))
    }

    /// Smallest and largest value over all variables.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        value_range(self.series.iter().flat_map(|(_, s)| s.values.iter().copied()))
    }
}

/// One variable over space at a single datetime.
#[derive(Debug, Clone)]
pub struct SurfacePlot {
    pub variable: String,
    pub datetime: NaiveDateTime,
    pub time_base: TimeBase,
    pub z_label: String,
    pub points: SurfacePoints,
}

impl SurfacePlot {
    /// Fails if there are too few points to triangulate.
    pub fn new(
        variable: &str,
        datetime: NaiveDateTime,
        time_base: TimeBase,
        z_label: &str,
        points: SurfacePoints,
    ) -> Result<Self> {
        if points.len() < 3 {
            return Err(anyhow!(
                "Only {} valid `{}` values at {}, a surface needs 3",
                points.len(),
                variable,
                datetime.format("%Y/%m/%d-%H:%M")
            ));
        }

        Ok(SurfacePlot {
            variable: variable.to_string(),
            datetime,
            time_base,
            z_label: z_label.to_string(),
            points,
        })
    }

    pub fn title(&self, config: &PlotConfig) -> String {
        format!(
            "{} {} on {} UTC ({} Time)",
            config.project_name,
            title_case(&self.variable),
            self.datetime.format("%Y-%m-%d %H:%M:%S"),
            self.time_base
        )
    }

    /// `YYYYMMDDHHMM_var.png`
    pub fn file_name(&self, config: &PlotConfig) -> String {
        format!(
            "{}_{}.png",
            self.datetime.format(&config.file_stamp_format),
            self.variable
        )
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        value_range(self.points.values.iter().copied())
    }
}

/// Replaces underscores with spaces and capitalises each word.
pub fn title_case(variable: &str) -> String {
    let mut title = String::with_capacity(variable.len());
    let mut in_word = false;

    for c in variable.trim().replace('_', " ").chars() {
        if c.is_alphabetic() {
            if in_word {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(c);
            in_word = false;
        }
    }

    title
}

/// Tick positions `min, min + step, ...` up to `max`.
pub fn tick_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || max <= min {
        return vec![min];
    }
    let count = ((max - min) / step).floor() as usize + 1;

    (0..count).map(|k| min + k as f64 * step).collect()
}

/// Widens a degenerate range so it can be drawn.
pub fn padded(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |range, v| match range {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

// -- Tests -------------------------------------------------------------------
