//! Selection engine
//!
//! Turns the dashboard query parameters into the initial (farm, severity)
//! selection. Two farm parameters exist: `farm` carries an exact name picked
//! from the farm menu, `farm_name` is the shareable one and is matched
//! ignoring case and surrounding whitespace. Unknown values never fail: they
//! fall back to the defaults and leave a notice for the user.

use crate::directory::FarmDirectory;
use crate::types::Record;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use std::collections::BTreeSet;
use std::fmt;

/// Sentinel severity value meaning "no severity filter"
pub const ALL_SEVERITIES: &str = "all";

/// Query parameters as read from the dashboard address, decoded once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Exact farm name from the farm menu
    pub farm: Option<String>,
    /// Shareable farm name
    pub farm_name: Option<String>,
    pub severity: Option<String>,
}

impl QueryParams {
    pub fn new(farm_name: Option<&str>, severity: Option<&str>) -> Self {
        Self {
            farm: None,
            farm_name: farm_name.map(str::to_string),
            severity: severity.map(str::to_string),
        }
    }

    /// Parameters naming a farm exactly
    pub fn exact(farm: &str, severity: Option<&str>) -> Self {
        Self {
            farm: Some(farm.to_string()),
            farm_name: None,
            severity: severity.map(str::to_string),
        }
    }

    /// Parse a form-encoded query string (leading `?` optional)
    ///
    /// Never fails: unknown keys are ignored and a repeated key keeps its
    /// first value.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::default();
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let slot = match key {
                "farm" => &mut params.farm,
                "farm_name" => &mut params.farm_name,
                "severity" => &mut params.severity,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(decode_form_value(value));
            }
        }
        params
    }

    /// Percent-encoded query string for links
    pub fn to_query_string(&self) -> String {
        [
            ("farm", &self.farm),
            ("farm_name", &self.farm_name),
            ("severity", &self.severity),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(|v| format!("{key}={}", utf8_percent_encode(v, NON_ALPHANUMERIC)))
        })
        .collect::<Vec<_>>()
        .join("&")
    }

    fn farm(&self) -> Option<&str> {
        self.farm.as_deref().filter(|s| !s.is_empty())
    }

    fn farm_name(&self) -> Option<&str> {
        self.farm_name.as_deref().filter(|s| !s.is_empty())
    }

    fn severity(&self) -> Option<&str> {
        self.severity.as_deref().filter(|s| !s.is_empty())
    }
}

// `+` is a space in form encoding
fn decode_form_value(raw: &str) -> String {
    percent_decode_str(&raw.replace('+', " ")).decode_utf8_lossy().into_owned()
}

/// Percent-decode a farm-name parameter (`+` is left as is)
pub fn decode_farm_name(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Match a shareable farm name, retrying once on its percent-decoded form
fn match_shared_name<'a>(directory: &'a FarmDirectory, query: &str) -> Option<&'a str> {
    directory.match_farm(query).or_else(|| {
        let decoded = decode_farm_name(query);
        if decoded == query {
            None
        } else {
            directory.match_farm(&decoded)
        }
    })
}

/// Severity filter: everything, or one exact value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeverityFilter {
    All,
    Only(String),
}

impl SeverityFilter {
    pub fn from_level(level: &str) -> Self {
        if level == ALL_SEVERITIES {
            SeverityFilter::All
        } else {
            SeverityFilter::Only(level.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SeverityFilter::All => ALL_SEVERITIES,
            SeverityFilter::Only(level) => level,
        }
    }

    pub fn accepts(&self, severity: Option<&str>) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Only(level) => severity == Some(level.as_str()),
        }
    }
}

impl fmt::Display for SeverityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current (farm, severity) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub farm: String,
    pub severity: SeverityFilter,
}

impl Selection {
    /// Parameters that reproduce this selection
    pub fn to_query_params(&self) -> QueryParams {
        QueryParams::exact(&self.farm, Some(self.severity.as_str()))
    }
}

/// User-visible message produced while resolving a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(m) | Notice::Warning(m) => m,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Notice::Warning(_))
    }
}

/// Resolved selection plus the notices to show alongside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// None only when the farm directory is empty
    pub selection: Option<Selection>,
    pub notices: Vec<Notice>,
}

/// Severity choices: the sentinel, then sorted distinct observed severities
pub fn severity_levels(records: &[Record]) -> Vec<String> {
    let observed: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.severity.as_deref())
        .filter(|s| *s != ALL_SEVERITIES)
        .collect();

    std::iter::once(ALL_SEVERITIES.to_string())
        .chain(observed.into_iter().map(str::to_string))
        .collect()
}

/// Compute the initial selection from query parameters
pub fn resolve_selection(
    params: &QueryParams,
    directory: &FarmDirectory,
    severity_levels: &[String],
) -> SelectionOutcome {
    let mut notices = Vec::new();

    let Some(first) = directory.first() else {
        tracing::warn!("farm directory is empty");
        notices.push(Notice::Warning("No farms available in the dataset.".to_string()));
        return SelectionOutcome { selection: None, notices };
    };

    let exact = params.farm().filter(|farm| directory.contains(farm));
    let shared = params.farm_name().or(params.farm());

    let farm = match (exact, shared) {
        (Some(exact), _) => exact.to_string(),
        (None, Some(query)) => match match_shared_name(directory, query) {
            Some(matched) => {
                notices.push(Notice::Info(format!("Showing data for farm: {matched}")));
                matched.to_string()
            }
            None => {
                tracing::debug!(query = %query, fallback = first, "farm name not found");
                notices.push(Notice::Warning(format!(
                    "Farm '{query}' not found. Showing default farm: {first}"
                )));
                first.to_string()
            }
        },
        (None, None) => first.to_string(),
    };

    let severity = match params.severity() {
        Some(level) if severity_levels.iter().any(|l| l == level) => SeverityFilter::from_level(level),
        Some(level) => {
            notices.push(Notice::Warning(format!(
                "Severity '{level}' not found. Showing all severities."
            )));
            SeverityFilter::All
        }
        None => SeverityFilter::All,
    };

    SelectionOutcome {
        selection: Some(Selection { farm, severity }),
        notices,
    }
}

/// Records of the selected farm (and severity), in original row order
pub fn filter_records<'a>(records: &'a [Record], selection: &Selection) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| r.farm_name == selection.farm)
        .filter(|r| selection.severity.accepts(r.severity.as_deref()))
        .collect()
}
