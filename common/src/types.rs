//! Record types
//!
//! Shared by the CLI and the HTTP dashboard:
//! - Record: one CSV row after loading
//! - DownloadUnit: one fetched image pending archive packaging

use crate::metadata::Metadata;
use chrono::NaiveDate;

/// One inspection record (CSV row)
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 0-based position among the CSV data rows
    pub row: usize,

    pub farm_name: String,

    pub image_url: Option<String>,

    pub metadata: Metadata,

    pub activity_note: Option<String>,

    /// None when the source text was empty or unparseable
    pub date: Option<NaiveDate>,

    /// Value of the "Severity" metadata entry
    pub severity: Option<String>,
}

impl Record {
    /// 1-based row number used in filenames and captions
    pub fn row_number(&self) -> usize {
        self.row + 1
    }
}

/// Fetched image bytes and the filename they are offered under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadUnit {
    pub bytes: Vec<u8>,
    pub filename: String,
}
