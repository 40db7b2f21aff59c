//! Metadata flattening
//!
//! The `json data` column holds a JSON array of `{"name": .., "value": ..}`
//! objects. It is flattened into an ordered list of name/value pairs; input
//! that is absent or does not have that shape is kept as an explicit state
//! instead of failing the load.

use serde_json::Value;

pub const SEVERITY_FIELD: &str = "Severity";

/// One flattened metadata pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub name: String,
    pub value: String,
}

/// Flattened metadata of one record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Metadata {
    /// Cell was empty
    #[default]
    Missing,
    /// Cell was not a JSON array of name/value objects
    Malformed,
    Entries(Vec<MetadataEntry>),
}

impl Metadata {
    pub fn entries(&self) -> Option<&[MetadataEntry]> {
        match self {
            Metadata::Entries(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries().and_then(|entries| lookup(entries, name))
    }

    pub fn severity(&self) -> Option<&str> {
        self.lookup(SEVERITY_FIELD)
    }

    /// Panel lines: one per entry, or a single notice
    pub fn display_lines(&self) -> Vec<String> {
        match self {
            Metadata::Missing => vec!["No JSON data available".to_string()],
            Metadata::Malformed => vec!["Invalid JSON data".to_string()],
            Metadata::Entries(entries) => entries
                .iter()
                .map(|e| format!("{}: {}", e.name, e.value))
                .collect(),
        }
    }
}

/// Parse the raw metadata cell
pub fn parse_metadata(raw: Option<&str>) -> Metadata {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Metadata::Missing,
    };

    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "metadata is not valid JSON");
            return Metadata::Malformed;
        }
    };

    let Value::Array(items) = value else {
        return Metadata::Malformed;
    };

    let mut entries = Vec::with_capacity(items.len());
    for item in &items {
        let (Some(name), Some(value)) = (item.get("name"), item.get("value")) else {
            return Metadata::Malformed;
        };
        entries.push(MetadataEntry {
            name: scalar_text(name),
            value: scalar_text(value),
        });
    }

    Metadata::Entries(entries)
}

/// First entry with exactly this name (case-sensitive)
pub fn lookup<'a>(entries: &'a [MetadataEntry], name: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|e| e.name == name)
        .map(|e| e.value.as_str())
}

// strings verbatim, anything else as JSON text
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
