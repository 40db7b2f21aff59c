//! Loaded dataset with its derived lookups

use crate::directory::FarmDirectory;
use crate::error::Result;
use crate::loader::load_records;
use crate::selection::{filter_records, resolve_selection, severity_levels, QueryParams, Selection, SelectionOutcome};
use crate::types::Record;
use std::io::Read;

/// Records plus the farm directory and severity choices derived from them
///
/// Built once per load and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    directory: FarmDirectory,
    severity_levels: Vec<String>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let directory = FarmDirectory::from_records(&records);
        let severity_levels = severity_levels(&records);
        Self {
            records,
            directory,
            severity_levels,
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_records(load_records(reader)?))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn directory(&self) -> &FarmDirectory {
        &self.directory
    }

    /// `"all"` followed by the observed severities
    pub fn severity_levels(&self) -> &[String] {
        &self.severity_levels
    }

    /// Look up a record by its source row (0-based)
    pub fn record(&self, row: usize) -> Option<&Record> {
        self.records.iter().find(|r| r.row == row)
    }

    pub fn select(&self, params: &QueryParams) -> SelectionOutcome {
        resolve_selection(params, &self.directory, &self.severity_levels)
    }

    pub fn slice(&self, selection: &Selection) -> Vec<&Record> {
        filter_records(&self.records, selection)
    }
}
