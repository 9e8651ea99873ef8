//! Plotting configuration.
//!
//! Every value here used to be a constant baked into the plotting scripts. The
//! defaults reproduce those constants, so a plain `PlotConfig::default()` plots
//! an NCAR/EOL QCF dataset exactly as before.

/// Names of the metadata variables inside the observation sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableNames {
    pub date: String,
    pub time: String,
    pub date_nominal: String,
    pub time_nominal: String,
    pub network: String,
    pub platform: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for VariableNames {
    fn default() -> Self {
        VariableNames {
            date: "date".to_string(),
            time: "time".to_string(),
            date_nominal: "date_nominal".to_string(),
            time_nominal: "time_nominal".to_string(),
            network: "network_name".to_string(),
            platform: "platform_name".to_string(),
            latitude: "latitude".to_string(),
            longitude: "longitude".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Sequence holding the observations.
    pub sequence: String,
    /// Raw string marking a missing observation.
    pub missing_value: String,
    /// Number of leading variables that are metadata and never plotted.
    pub metadata_count: usize,
    pub variables: VariableNames,
    /// Format of `date` and `time` concatenated with no separator.
    pub series_datetime_format: String,
    /// Format of `date` and `time` joined with `-`.
    pub surface_datetime_format: String,
    /// Format the operator types datetimes in, also used for listing.
    pub selection_datetime_format: String,
    /// Timestamp embedded in output file names.
    pub file_stamp_format: String,
    /// A surface needs at least this many observations at one datetime.
    pub min_surface_occurrences: usize,
    pub series_size: (u32, u32),
    pub surface_size: (u32, u32),
    /// Spacing of the y-axis labels on series plots.
    pub y_tick_step: f64,
    /// Headroom above the largest value on surface plots.
    pub z_padding: f64,
    /// Draw observation points and drop lines to the ground plane.
    pub drop_lines: bool,
    /// Camera elevation and azimuth of surface plots, in degrees.
    pub view_elevation: f64,
    pub view_azimuth: f64,
    pub project_name: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            sequence: "QCF".to_string(),
            missing_value: "-999.99".to_string(),
            metadata_count: 9,
            variables: VariableNames::default(),
            series_datetime_format: "%Y/%m/%d%H:%M:%S".to_string(),
            surface_datetime_format: "%Y/%m/%d-%H:%M:%S".to_string(),
            selection_datetime_format: "%Y/%m/%d-%H:%M".to_string(),
            file_stamp_format: "%Y%m%d%H%M".to_string(),
            min_surface_occurrences: 3,
            series_size: (2000, 1000),
            surface_size: (2000, 1500),
            y_tick_step: 3.0,
            z_padding: 5.0,
            drop_lines: true,
            view_elevation: 20.0,
            view_azimuth: 45.0,
            project_name: "GCIP/ESOP 95".to_string(),
        }
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_qcf_layout() {
        let config = PlotConfig::default();

        assert_eq!(config.sequence, "QCF");
        assert_eq!(config.missing_value, "-999.99");
        assert_eq!(config.metadata_count, 9);
        assert_eq!(config.variables.network, "network_name");
        assert_eq!(config.variables.platform, "platform_name");
        assert_eq!(config.min_surface_occurrences, 3);
    }
}
