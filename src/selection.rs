//! Validation of operator selections against the values found in a dataset.
//!
//! Nothing here prompts or loops: each check hands back either the accepted
//! selection or every offending token, and the caller decides whether to ask
//! again.

use std::{collections::HashMap, fmt, str::FromStr};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::config::PlotConfig;

/// Keyword that asks for the list of valid choices instead of a selection.
pub const LIST_KEYWORD: &str = "list";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("invalid entries: {}", .tokens.join(", "))]
    Invalid { tokens: Vec<String> },
}

impl SelectionError {
    pub fn tokens(&self) -> &[String] {
        match self {
            SelectionError::Invalid { tokens } => tokens,
        }
    }
}

/// Splits comma-separated input into trimmed tokens.
pub fn split_tokens(input: &str) -> Vec<String> {
    input.split(',').map(|t| t.trim().to_string()).collect()
}

pub fn is_list_request(input: &str) -> bool {
    input.trim() == LIST_KEYWORD
}

/// Accepts `tokens` only if every one of them is in `reference`.
pub fn validate_tokens<S: AsRef<str>>(
    tokens: Vec<String>,
    reference: &[S],
) -> Result<Vec<String>, SelectionError> {
    let invalid: Vec<String> = tokens
        .iter()
        .filter(|t| !reference.iter().any(|r| r.as_ref() == t.as_str()))
        .cloned()
        .collect();

    if invalid.is_empty() {
        Ok(tokens)
    } else {
        Err(SelectionError::Invalid { tokens: invalid })
    }
}

/// Parses each token with `format` and accepts the batch only if every value
/// is in `eligible`. Unparseable tokens are reported as typed.
pub fn validate_datetimes(
    tokens: Vec<String>,
    eligible: &[NaiveDateTime],
    format: &str,
) -> Result<Vec<NaiveDateTime>, SelectionError> {
    let mut accepted = Vec::with_capacity(tokens.len());
    let mut invalid = Vec::new();

    for token in tokens {
        match NaiveDateTime::parse_from_str(&token, format) {
            Ok(dt) if eligible.contains(&dt) => accepted.push(dt),
            Ok(dt) => invalid.push(dt.format(format).to_string()),
            Err(_) => invalid.push(token),
        }
    }

    if invalid.is_empty() {
        Ok(accepted)
    } else {
        Err(SelectionError::Invalid { tokens: invalid })
    }
}

/// Unique datetimes occurring at least `min_occurrences` times, ascending.
pub fn eligible_datetimes(
    datetimes: &[NaiveDateTime],
    min_occurrences: usize,
) -> Vec<NaiveDateTime> {
    let mut counts: HashMap<NaiveDateTime, usize> = HashMap::new();
    for dt in datetimes {
        *counts.entry(*dt).or_insert(0) += 1;
    }

    let mut eligible: Vec<NaiveDateTime> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_occurrences)
        .map(|(dt, _)| dt)
        .collect();
    eligible.sort();

    eligible
}

/// Sorted unique keys, as listed to the operator.
pub fn unique_sorted(keys: &[String]) -> Vec<String> {
    let mut unique = keys.to_vec();
    unique.sort();
    unique.dedup();

    unique
}

/// Drops repeated tokens, keeping the first occurrence.
pub fn dedup_in_order(tokens: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !seen.contains(&token) {
            seen.push(token);
        }
    }

    seen
}

/// Which pair of date/time variables to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBase {
    /// Rounded to the scheduled reporting interval.
    Nominal,
    /// As observed.
    Actual,
}

impl TimeBase {
    /// Returns the `(date, time)` variable names for this time base.
    pub fn variables<'a>(&self, config: &'a PlotConfig) -> (&'a str, &'a str) {
        let names = &config.variables;
        match self {
            TimeBase::Nominal => (names.date_nominal.as_str(), names.time_nominal.as_str()),
            TimeBase::Actual => (names.date.as_str(), names.time.as_str()),
        }
    }
}

impl FromStr for TimeBase {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "nominal" => Ok(TimeBase::Nominal),
            "actual" => Ok(TimeBase::Actual),
            other => Err(SelectionError::Invalid {
                tokens: vec![other.to_string()],
            }),
        }
    }
}

impl fmt::Display for TimeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBase::Nominal => write!(f, "Nominal"),
            TimeBase::Actual => write!(f, "Actual"),
        }
    }
}

// -- Tests -------------------------------------------------------------------
