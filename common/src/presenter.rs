//! Record presentation
//!
//! Builds one display panel per record of the selected slice and collects
//! the images that could be fetched. A failing record never stops the pass.

use crate::error::Result;
use crate::imaging::{normalize_image, ImageKind};
use crate::metadata::Metadata;
use crate::types::{DownloadUnit, Record};
use chrono::NaiveDate;
use std::future::Future;

pub const NO_ACTIVITY: &str = "No activity recorded";
pub const NO_DATE: &str = "No date recorded";

/// Source of raw image bytes
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Filename for a record's image
///
/// `row_number` is the 1-based row index of the record in the source data.
pub fn download_filename(farm_name: &str, date: Option<NaiveDate>, row_number: usize) -> String {
    match date {
        Some(date) => format!("{}_{}_{}.jpg", farm_name, date.format("%Y-%m-%d"), row_number),
        None => format!("{}_unknown_date_{}.jpg", farm_name, row_number),
    }
}

/// Whether an image URL is worth fetching
pub fn is_well_formed_url(url: &str) -> bool {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    let rest = if let Some(rest) = lower.strip_prefix("https://") {
        rest
    } else if let Some(rest) = lower.strip_prefix("http://") {
        rest
    } else {
        return false;
    };
    !rest.is_empty() && !url.chars().any(char::is_whitespace)
}

/// Image state of one panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    /// URL absent or not well formed; nothing was fetched
    InvalidUrl,
    /// Fetch failed; nothing to show
    Failed(String),
    /// Fetched but not decodable; shown from its URL, not downloadable
    Unprocessed(String),
    Ready { filename: String, kind: ImageKind },
}

/// Display unit for one record
#[derive(Debug, Clone)]
pub struct RecordPanel {
    pub row: usize,
    pub farm_name: String,
    pub image_url: Option<String>,
    pub image: ImageSlot,
    pub metadata: Metadata,
    pub activity_note: Option<String>,
    pub date: Option<NaiveDate>,
}

impl RecordPanel {
    pub fn row_number(&self) -> usize {
        self.row + 1
    }

    pub fn caption(&self) -> String {
        format!("Image {}", self.row_number())
    }

    /// Inline message for the image column, if any
    pub fn image_message(&self) -> Option<String> {
        match &self.image {
            ImageSlot::InvalidUrl => Some(format!("Invalid image URL for entry {}", self.row_number())),
            ImageSlot::Failed(err) => Some(format!("Error loading image {}: {}", self.row_number(), err)),
            ImageSlot::Unprocessed(err) => Some(format!("Error downloading or processing image: {err}")),
            ImageSlot::Ready { .. } => None,
        }
    }

    /// Whether the image itself can be displayed from its URL
    pub fn shows_image(&self) -> bool {
        matches!(self.image, ImageSlot::Ready { .. } | ImageSlot::Unprocessed(_))
    }

    pub fn metadata_lines(&self) -> Vec<String> {
        self.metadata.display_lines()
    }

    pub fn activity_text(&self) -> &str {
        self.activity_note.as_deref().unwrap_or(NO_ACTIVITY)
    }

    pub fn date_text(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| NO_DATE.to_string())
    }
}

/// Output of one render pass
#[derive(Debug, Clone, Default)]
pub struct Presentation {
    pub panels: Vec<RecordPanel>,
    /// Successfully fetched images, in row order
    pub downloads: Vec<DownloadUnit>,
}

impl Presentation {
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

/// Fetch and decode one image
pub async fn fetch_image<F: ImageFetcher>(fetcher: &F, url: &str) -> Result<(Vec<u8>, ImageKind)> {
    let raw = fetcher.fetch(url).await?;
    let normalized = normalize_image(&raw)?;
    Ok((normalized.bytes, normalized.kind))
}

/// Present `records` in order, fetching images one at a time
pub async fn present<F: ImageFetcher>(records: &[&Record], fetcher: &F) -> Presentation {
    let mut presentation = Presentation::default();

    for record in records {
        let image = match record.image_url.as_deref().filter(|u| is_well_formed_url(u)) {
            None => {
                tracing::warn!(row = record.row_number(), "invalid image URL");
                ImageSlot::InvalidUrl
            }
            Some(url) => match fetcher.fetch(url.trim()).await {
                Err(e) => {
                    tracing::warn!(row = record.row_number(), url, error = %e, "image unavailable");
                    ImageSlot::Failed(e.to_string())
                }
                Ok(raw) => match normalize_image(&raw) {
                    Ok(normalized) => {
                        let filename = download_filename(&record.farm_name, record.date, record.row_number());
                        presentation.downloads.push(DownloadUnit {
                            bytes: normalized.bytes,
                            filename: filename.clone(),
                        });
                        ImageSlot::Ready {
                            filename,
                            kind: normalized.kind,
                        }
                    }
                    Err(e) => {
                        tracing::warn!(row = record.row_number(), url, error = %e, "image not decodable");
                        ImageSlot::Unprocessed(e.to_string())
                    }
                },
            },
        };

        presentation.panels.push(RecordPanel {
            row: record.row,
            farm_name: record.farm_name.clone(),
            image_url: record.image_url.clone(),
            image,
            metadata: record.metadata.clone(),
            activity_note: record.activity_note.clone(),
            date: record.date,
        });
    }

    presentation
}
