//! Writing fetched images to disk (CLI `show --output`)

use crate::error::Result;
use farm_dashboard_common::{bundle, DownloadUnit, ARCHIVE_FILE_NAME};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    pub images: Vec<PathBuf>,
    /// None when there was nothing to bundle
    pub archive: Option<PathBuf>,
}

/// Write every unit under its filename plus `images.zip` into `output_dir`
pub fn export_downloads(downloads: &[DownloadUnit], output_dir: &Path) -> Result<ExportSummary> {
    let mut summary = ExportSummary::default();

    let Some(archive) = bundle(downloads)? else {
        return Ok(summary);
    };

    std::fs::create_dir_all(output_dir)?;

    for unit in downloads {
        let path = output_dir.join(&unit.filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &unit.bytes)?;
        summary.images.push(path);
    }

    let archive_path = output_dir.join(ARCHIVE_FILE_NAME);
    std::fs::write(&archive_path, archive)?;
    tracing::info!(
        images = summary.images.len(),
        archive = %archive_path.display(),
        "exported images"
    );
    summary.archive = Some(archive_path);

    Ok(summary)
}
