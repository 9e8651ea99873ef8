//! Plots selected variables against time, one image per station.

use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::debug;

use crate::{
    config::PlotConfig,
    dataset::Dataset,
    grouping::{parse_datetimes, station_keys, IndexGroups},
    plot::{self, SeriesPlot},
    prompt::{collect_label, collect_stations, collect_variables, Console},
    selection::unique_sorted,
    series::assemble_time_series,
};

use super::{exactly, save_plots};

pub async fn series(url: &str, config: &PlotConfig) -> Result<Vec<String>> {
    let dataset = Dataset::open(url, config).await?;
    let mut console = Console::stdio();
    let names = &config.variables;

    let plottable = dataset.plottable_variables(config.metadata_count).to_vec();
    let variables = collect_variables(&mut console, &plottable)?;

    let [networks, platforms] =
        exactly::<2>(dataset.columns(&[names.network.as_str(), names.platform.as_str()]).await?)?;
    let keys = station_keys(&networks, &platforms);
    let stations = collect_stations(&mut console, &unique_sorted(&keys))?;
    let groups = IndexGroups::build(&keys, &stations);
    debug!(rows = keys.len(), stations = groups.len(), "grouped rows by station");

    let mut request = vec![names.date.as_str(), names.time.as_str()];
    request.extend(variables.iter().map(String::as_str));
    let mut columns = dataset.columns(&request).await?;
    let values = columns.split_off(2);
    let [dates, times] = exactly::<2>(columns)?;
    let datetimes = parse_datetimes(&dates, &times, "", &config.series_datetime_format)?;

    let y_label = collect_label(&mut console, "y")?;
    println!("\nCreating plots...\n\n");

    let plots = build_plots(&groups, &variables, &values, &datetimes, &y_label, config)?;
    save_plots(&plots, |p| p.file_name(config), |path, p| {
        plot::series::render(path, p, config)
    })
}

/// One plot per station, each holding every variable's series.
fn build_plots(
    groups: &IndexGroups<String>,
    variables: &[String],
    values: &[Vec<String>],
    datetimes: &[NaiveDateTime],
    y_label: &str,
    config: &PlotConfig,
) -> Result<Vec<SeriesPlot>> {
    groups
        .iter()
        .map(|(station, rows)| {
            debug!(station = %station, rows = rows.len(), "assembling series");
            let series = variables
                .iter()
                .zip(values)
                .map(|(variable, column)| {
                    let s = assemble_time_series(rows, column, datetimes, &config.missing_value)?;
                    Ok((variable.clone(), s))
                })
                .collect::<Result<Vec<_>>>()?;

            SeriesPlot::new(station, y_label, series)
        })
        .collect()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn should_drop_missing_temperature_for_station() {
        let config = PlotConfig::default();
        let dates = strings(&["2020/01/01", "2020/01/01", "2020/01/01"]);
        let times = strings(&["00:00:00", "01:00:00", "02:00:00"]);
        let keys = station_keys(&strings(&["N1", "N1", "N1"]), &strings(&["S1", "S1", "S1"]));
        let temps = strings(&["10.0", "-999.99", "12.0"]);

        let datetimes =
            parse_datetimes(&dates, &times, "", &config.series_datetime_format).unwrap();
        let groups = IndexGroups::build(&keys, &strings(&["N1-S1"]));

        let plots = build_plots(
            &groups,
            &strings(&["temp"]),
            &[temps],
            &datetimes,
            "Degrees",
            &config,
        )
        .unwrap();

        assert_eq!(plots.len(), 1);
        let (variable, series) = &plots[0].series[0];
        assert_eq!(variable, "temp");
        assert_eq!(series.values, vec![10.0, 12.0]);
        assert_eq!(series.datetimes, vec![datetimes[0], datetimes[2]]);
        assert_eq!(plots[0].file_name(&config), "N1-S1_temp_202001010000.png");
    }

    #[test]
    fn should_plot_each_station_separately() {
        let config = PlotConfig::default();
        let dates = strings(&["2020/01/01"; 4]);
        let times = strings(&["00:00:00", "00:00:00", "01:00:00", "01:00:00"]);
        let keys = station_keys(
            &strings(&["N1", "N2", "N1", "N2"]),
            &strings(&["A", "B", "A", "B"]),
        );
        let temps = strings(&["1.0", "2.0", "3.0", "4.0"]);
        let dews = strings(&["0.5", "-999.99", "0.7", "0.9"]);

        let datetimes =
            parse_datetimes(&dates, &times, "", &config.series_datetime_format).unwrap();
        let groups = IndexGroups::build(&keys, &strings(&["N2-B", "N1-A"]));

        let plots = build_plots(
            &groups,
            &strings(&["temp", "dew"]),
            &[temps, dews],
            &datetimes,
            "C",
            &config,
        )
        .unwrap();

        assert_eq!(plots[0].station, "N2-B");
        assert_eq!(plots[0].series[0].1.values, vec![2.0, 4.0]);
        assert_eq!(plots[0].series[1].1.values, vec![0.9]);
        assert_eq!(plots[1].station, "N1-A");
        assert_eq!(plots[1].series[1].1.values, vec![0.5, 0.7]);
    }

    #[test]
    fn should_fail_when_station_has_only_missing_values() {
        let config = PlotConfig::default();
        let datetimes = parse_datetimes(
            &strings(&["2020/01/01"]),
            &strings(&["00:00:00"]),
            "",
            &config.series_datetime_format,
        )
        .unwrap();
        let groups = IndexGroups::build(&strings(&["N1-S1"]), &strings(&["N1-S1"]));

        let result = build_plots(
            &groups,
            &strings(&["temp"]),
            &[strings(&["-999.99"])],
            &datetimes,
            "C",
            &config,
        );

        assert!(result.is_err());
    }
}
