//! Plots one variable over space, one image per selected datetime.

use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::debug;

use crate::{
    config::PlotConfig,
    dataset::Dataset,
    grouping::{parse_datetimes, truncate_to_minute, IndexGroups},
    plot::{self, SurfacePlot},
    prompt::{collect_datetimes, collect_label, collect_time_base, collect_variable, Console},
    selection::{eligible_datetimes, TimeBase},
    series::assemble_surface,
};

use super::{exactly, save_plots};

pub async fn surface(url: &str, config: &PlotConfig) -> Result<Vec<String>> {
    let dataset = Dataset::open(url, config).await?;
    let mut console = Console::stdio();
    let names = &config.variables;

    let plottable = dataset.plottable_variables(config.metadata_count).to_vec();
    let variable = collect_variable(&mut console, &plottable)?;
    let values = dataset.column(&variable).await?;

    let time_base = collect_time_base(&mut console)?;
    let (date_name, time_name) = time_base.variables(config);
    let [dates, times] = exactly::<2>(dataset.columns(&[date_name, time_name]).await?)?;
    let datetimes = minute_datetimes(&dates, &times, config)?;

    let eligible = eligible_datetimes(&datetimes, config.min_surface_occurrences);
    debug!(eligible = eligible.len(), "datetimes with enough points");
    let selected = collect_datetimes(&mut console, &eligible, &config.selection_datetime_format)?;
    let groups = IndexGroups::build(&datetimes, &selected);
    debug!(rows = datetimes.len(), datetimes = groups.len(), "grouped rows by datetime");

    let [latitudes, longitudes] = exactly::<2>(
        dataset
            .columns(&[names.latitude.as_str(), names.longitude.as_str()])
            .await?,
    )?;

    let z_label = collect_label(&mut console, "z")?;
    println!("\nCreating plots...\n\n");

    let layers = Layers {
        values: &values,
        latitudes: &latitudes,
        longitudes: &longitudes,
    };
    let plots = build_plots(&groups, &variable, time_base, &z_label, &layers, config)?;
    save_plots(&plots, |p| p.file_name(config), |path, p| {
        plot::surface::render(path, p, config)
    })
}

/// Per-row datetimes at the minute precision datetimes are selected with.
fn minute_datetimes(
    dates: &[String],
    times: &[String],
    config: &PlotConfig,
) -> Result<Vec<NaiveDateTime>> {
    let datetimes = parse_datetimes(dates, times, "-", &config.surface_datetime_format)?;

    Ok(datetimes.into_iter().map(truncate_to_minute).collect())
}

/// Row-aligned columns a surface is built from.
struct Layers<'a> {
    values: &'a [String],
    latitudes: &'a [String],
    longitudes: &'a [String],
}

/// One plot per selected datetime.
fn build_plots(
    groups: &IndexGroups<NaiveDateTime>,
    variable: &str,
    time_base: TimeBase,
    z_label: &str,
    layers: &Layers,
    config: &PlotConfig,
) -> Result<Vec<SurfacePlot>> {
    groups
        .iter()
        .map(|(datetime, rows)| {
            debug!(%datetime, rows = rows.len(), "assembling surface");
            let points = assemble_surface(
                rows,
                layers.values,
                layers.latitudes,
                layers.longitudes,
                &config.missing_value,
            )?;

            SurfacePlot::new(variable, *datetime, time_base, z_label, points)
        })
        .collect()
}

// -- Tests -------------------------------------------------------------------
