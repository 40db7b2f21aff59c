//! CSV record loader
//!
//! Reads the inspection CSV into [`Record`]s. Missing required columns abort
//! the load; every per-cell problem (bad date, bad JSON, empty cells) is kept
//! on the record instead.

use crate::error::{Error, Result};
use crate::metadata::parse_metadata;
use crate::types::Record;
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;

pub const FARM_NAME_COLUMN: &str = "farmName";
pub const METADATA_COLUMN: &str = "json data";
pub const METADATA_COLUMN_ALIAS: &str = "json_data";
pub const IMAGE_URL_COLUMN: &str = "Image URL";
pub const ACTIVITY_COLUMN: &str = "activity_record";
pub const DATE_COLUMN: &str = "Date";

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    farm_name: usize,
    metadata: usize,
    image_url: usize,
    activity: usize,
    date: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_matches('\u{feff}').trim())
            .collect();
        let find = |wanted: &[&str]| names.iter().position(|n| wanted.contains(n));

        let farm_name = find(&[FARM_NAME_COLUMN]);
        let metadata = find(&[METADATA_COLUMN, METADATA_COLUMN_ALIAS]);
        let image_url = find(&[IMAGE_URL_COLUMN]);
        let activity = find(&[ACTIVITY_COLUMN]);
        let date = find(&[DATE_COLUMN]);

        let mut missing = Vec::new();
        for (found, name) in [
            (farm_name, FARM_NAME_COLUMN),
            (metadata, METADATA_COLUMN),
            (image_url, IMAGE_URL_COLUMN),
            (activity, ACTIVITY_COLUMN),
            (date, DATE_COLUMN),
        ] {
            if found.is_none() {
                missing.push(name.to_string());
            }
        }

        match (farm_name, metadata, image_url, activity, date) {
            (Some(farm_name), Some(metadata), Some(image_url), Some(activity), Some(date)) => {
                Ok(Self { farm_name, metadata, image_url, activity, date })
            }
            _ => Err(Error::MissingColumns(missing)),
        }
    }
}

/// Load records from any CSV reader
pub fn load_records<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row, result) in reader.records().enumerate() {
        let raw = result?;
        let cell = |idx: usize| raw.get(idx).filter(|v| !v.trim().is_empty());

        let Some(farm_name) = cell(columns.farm_name) else {
            tracing::debug!(row, "dropping row without farm name");
            dropped += 1;
            continue;
        };

        let metadata = parse_metadata(cell(columns.metadata));
        let severity = metadata.severity().map(str::to_string);

        records.push(Record {
            row,
            farm_name: farm_name.to_string(),
            image_url: cell(columns.image_url).map(str::to_string),
            metadata,
            activity_note: cell(columns.activity).map(str::to_string),
            date: cell(columns.date).and_then(parse_day_first),
            severity,
        });
    }

    tracing::info!(records = records.len(), dropped, "loaded inspection records");
    Ok(records)
}

pub fn load_records_from_str(content: &str) -> Result<Vec<Record>> {
    load_records(content.as_bytes())
}

// %y before %Y: %Y would read "24" as the year 24
const DAY_FIRST_DATE_FORMATS: &[&str] = &[
    "%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y",
];

const MONTH_FIRST_DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%m-%d-%Y"];

const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const NAMED_MONTH_FORMATS: &[&str] = &["%d %b %Y", "%d %B %Y", "%d-%b-%Y", "%b %d, %Y", "%B %d, %Y"];

const TIME_SUFFIXES: &[&str] = &[" %H:%M", " %H:%M:%S", "T%H:%M", "T%H:%M:%S"];

/// Parse a date cell, day-first
///
/// `05/03/2024` is 5 March. A value that cannot be read day-first but can be
/// read month-first (`03/25/2024`) is accepted month-first. Any time of day is
/// discarded. Unparseable input yields `None`.
pub fn parse_day_first(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    [
        DAY_FIRST_DATE_FORMATS,
        ISO_DATE_FORMATS,
        NAMED_MONTH_FORMATS,
        MONTH_FIRST_DATE_FORMATS,
    ]
    .iter()
    .flat_map(|formats| formats.iter())
    .find_map(|format| parse_with_optional_time(text, format))
}

fn parse_with_optional_time(text: &str, date_format: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, date_format) {
        return Some(date);
    }
    TIME_SUFFIXES.iter().find_map(|suffix| {
        let format = format!("{date_format}{suffix}");
        NaiveDateTime::parse_from_str(text, &format)
            .ok()
            .map(|dt| dt.date())
    })
}
