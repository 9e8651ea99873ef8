//! Assembles plottable series from grouped rows, dropping missing observations.

use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;

/// Values of one variable against time. Both vectors have equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub values: Vec<f64>,
    pub datetimes: Vec<NaiveDateTime>,
}

impl TimeSeries {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.datetimes.first().copied()
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.datetimes.last().copied()
    }

    pub fn points(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.datetimes.iter().copied().zip(self.values.iter().copied())
    }
}

/// Values of one variable over space. All vectors have equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfacePoints {
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    pub values: Vec<f64>,
}

impl SurfacePoints {
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Collects the non-missing `values` at `rows`, paired with their datetimes.
pub fn assemble_time_series(
    rows: &[usize],
    values: &[String],
    datetimes: &[NaiveDateTime],
    missing: &str,
) -> Result<TimeSeries> {
    let mut series = TimeSeries::default();

    for &row in rows {
        let raw = cell(values, row)?;
        if raw == missing {
            continue;
        }
        let datetime = datetimes
            .get(row)
            .copied()
            .ok_or_else(|| anyhow!("Row {} has no datetime", row))?;

        series.values.push(parse_value(raw, row)?);
        series.datetimes.push(datetime);
    }

    Ok(series)
}

/// Collects the non-missing `values` at `rows` with their coordinates.
pub fn assemble_surface(
    rows: &[usize],
    values: &[String],
    latitudes: &[String],
    longitudes: &[String],
    missing: &str,
) -> Result<SurfacePoints> {
    let mut points = SurfacePoints::default();

    for &row in rows {
        let raw = cell(values, row)?;
        if raw == missing {
            continue;
        }
        let value = parse_value(raw, row)?;
        let latitude = parse_value(cell(latitudes, row)?, row)?;
        let longitude = parse_value(cell(longitudes, row)?, row)?;

        points.values.push(value);
        points.latitudes.push(latitude);
        points.longitudes.push(longitude);
    }

    Ok(points)
}

fn cell(column: &[String], row: usize) -> Result<&str> {
    column
        .get(row)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Row {} is out of range", row))
}

fn parse_value(raw: &str, row: usize) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| anyhow!("Row {}: `{}` is not a number", row, raw))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::grouping::{parse_datetimes, station_keys, IndexGroups};

    use super::*;

    const MISSING: &str = "-999.99";

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn should_drop_missing_rows_from_station_series() {
        let dates = strings(&["2020/01/01", "2020/01/01", "2020/01/01"]);
        let times = strings(&["00:00:00", "01:00:00", "02:00:00"]);
        let networks = strings(&["N1", "N1", "N1"]);
        let platforms = strings(&["S1", "S1", "S1"]);
        let temps = strings(&["10.0", "-999.99", "12.0"]);

        let datetimes = parse_datetimes(&dates, &times, "", "%Y/%m/%d%H:%M:%S").unwrap();
        let keys = station_keys(&networks, &platforms);
        let groups = IndexGroups::build(&keys, &strings(&["N1-S1"]));
        let (_, rows) = groups.iter().next().unwrap();

        let series = assemble_time_series(rows, &temps, &datetimes, MISSING).unwrap();

        assert_eq!(series.values, vec![10.0, 12.0]);
        assert_eq!(series.datetimes, vec![datetimes[0], datetimes[2]]);
        assert_eq!(series.start().unwrap().to_string(), "2020-01-01 00:00:00");
        assert_eq!(series.end().unwrap().to_string(), "2020-01-01 02:00:00");
    }

    #[test]
    fn should_keep_series_vectors_in_lockstep() {
        let values = strings(&["-999.99", "1.5", "-999.99", "-999.99", "2.5"]);
        let dates = strings(&["2021/06/01"; 5]);
        let times = strings(&["00:00:00", "00:05:00", "00:10:00", "00:15:00", "00:20:00"]);
        let datetimes = parse_datetimes(&dates, &times, "", "%Y/%m/%d%H:%M:%S").unwrap();

        let series = assemble_time_series(&[0, 1, 2, 3, 4], &values, &datetimes, MISSING).unwrap();

        assert_eq!(series.values.len(), series.datetimes.len());
        assert_eq!(series.points().count(), 2);
        assert!(series.values.iter().all(|v| *v != -999.99));
    }

    #[test]
    fn should_return_empty_series_when_all_missing() {
        let values = strings(&["-999.99"]);
        let datetimes = parse_datetimes(
            &strings(&["2021/06/01"]),
            &strings(&["00:00:00"]),
            "",
            "%Y/%m/%d%H:%M:%S",
        )
        .unwrap();

        let series = assemble_time_series(&[0], &values, &datetimes, MISSING).unwrap();

        assert!(series.is_empty());
        assert_eq!(series.start(), None);
    }

    #[test]
    fn should_fail_on_non_numeric_value() {
        let values = strings(&["n/a"]);
        let datetimes = parse_datetimes(
            &strings(&["2021/06/01"]),
            &strings(&["00:00:00"]),
            "",
            "%Y/%m/%d%H:%M:%S",
        )
        .unwrap();

        assert!(assemble_time_series(&[0], &values, &datetimes, MISSING).is_err());
    }

    #[test]
    fn should_assemble_surface_at_one_datetime() {
        let values = strings(&["20.0", "-999.99", "22.5", "21.0", "19.0"]);
        let lats = strings(&["35.1", "35.2", "36.0", "36.5", "40.0"]);
        let lons = strings(&["-97.1", "-97.2", "-98.0", "-96.5", "-90.0"]);

        let points = assemble_surface(&[0, 1, 2, 3], &values, &lats, &lons, MISSING).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points.values, vec![20.0, 22.5, 21.0]);
        assert_eq!(points.latitudes, vec![35.1, 36.0, 36.5]);
        assert_eq!(points.longitudes, vec![-97.1, -98.0, -96.5]);
    }

    #[test]
    fn should_not_parse_coordinates_of_missing_rows() {
        let values = strings(&["-999.99", "3.0"]);
        let lats = strings(&["-999.99x", "10.0"]);
        let lons = strings(&["", "20.0"]);

        let points = assemble_surface(&[0, 1], &values, &lats, &lons, MISSING).unwrap();

        assert_eq!(points.len(), 1);
    }
}
