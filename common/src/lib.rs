//! Farm Dashboard Common Library
//!
//! Core shared by the CLI and the HTTP dashboard: CSV loading, metadata
//! flattening, farm matching, selection, presentation and image bundling.

pub mod archive;
pub mod dataset;
pub mod directory;
pub mod error;
pub mod imaging;
pub mod loader;
pub mod metadata;
pub mod presenter;
pub mod selection;
pub mod types;

pub use archive::{bundle, ARCHIVE_FILE_NAME, ARCHIVE_MIME};
pub use dataset::Dataset;
pub use directory::FarmDirectory;
pub use error::{Error, Result};
pub use imaging::{normalize_image, ImageKind, NormalizedImage, IMAGE_MIME};
pub use loader::{load_records, load_records_from_str, parse_day_first};
pub use metadata::{lookup, parse_metadata, Metadata, MetadataEntry};
pub use presenter::{
    download_filename, fetch_image, is_well_formed_url, present, ImageFetcher, ImageSlot, Presentation,
    RecordPanel,
};
pub use selection::{
    filter_records, resolve_selection, severity_levels, Notice, QueryParams, Selection, SelectionOutcome,
    SeverityFilter, ALL_SEVERITIES,
};
pub use types::{DownloadUnit, Record};
