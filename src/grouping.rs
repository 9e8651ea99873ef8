//! Groups dataset rows by station or datetime.

use std::{collections::HashMap, hash::Hash};

use anyhow::{anyhow, Result};
use chrono::{NaiveDateTime, Timelike};

/// Per-row `network-platform` identities.
pub fn station_keys(networks: &[String], platforms: &[String]) -> Vec<String> {
    networks
        .iter()
        .zip(platforms)
        .map(|(network, platform)| format!("{}-{}", network, platform))
        .collect()
}

/// Per-row datetimes from `date`, `separator` and `time` parsed with `format`.
pub fn parse_datetimes(
    dates: &[String],
    times: &[String],
    separator: &str,
    format: &str,
) -> Result<Vec<NaiveDateTime>> {
    dates
        .iter()
        .zip(times)
        .enumerate()
        .map(|(row, (date, time))| {
            let text = format!("{}{}{}", date, separator, time);
            NaiveDateTime::parse_from_str(&text, format)
                .map_err(|e| anyhow!("Row {}: cannot parse `{}` as `{}`: {}", row, text, format, e))
        })
        .collect()
}

/// Drops seconds, leaving the precision an operator can type.
pub fn truncate_to_minute(datetime: NaiveDateTime) -> NaiveDateTime {
    datetime
        .with_second(0)
        .and_then(|dt| dt.with_nanosecond(0))
        .unwrap_or(datetime)
}

/// Row indices belonging to each selected key, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexGroups<K> {
    groups: Vec<(K, Vec<usize>)>,
}

impl<K: Eq + Hash + Clone> IndexGroups<K> {
    /// Assigns every row whose key is in `selection` to that key's group.
    ///
    /// Repeated selections collapse into one group, and a selected key that
    /// never occurs keeps an empty group.
    pub fn build(row_keys: &[K], selection: &[K]) -> Self {
        let mut groups: Vec<(K, Vec<usize>)> = Vec::with_capacity(selection.len());
        let mut slots: HashMap<&K, usize> = HashMap::with_capacity(selection.len());

        for key in selection {
            if !slots.contains_key(key) {
                slots.insert(key, groups.len());
                groups.push((key.clone(), Vec::new()));
            }
        }

        for (row, key) in row_keys.iter().enumerate() {
            if let Some(&slot) = slots.get(key) {
                groups[slot].1.push(row);
            }
        }

        IndexGroups { groups }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[usize])> {
        self.groups.iter().map(|(k, rows)| (k, rows.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

// -- Tests -------------------------------------------------------------------
