//! Zip bundling of fetched images

use crate::error::Result;
use crate::types::DownloadUnit;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const ARCHIVE_FILE_NAME: &str = "images.zip";
pub const ARCHIVE_MIME: &str = "application/zip";

/// Pack every unit into one in-memory zip, in order
///
/// Returns `None` for an empty list: there is nothing to offer.
pub fn bundle(units: &[DownloadUnit]) -> Result<Option<Vec<u8>>> {
    if units.is_empty() {
        return Ok(None);
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for unit in units {
        zip.start_file(unit.filename.as_str(), options)?;
        zip.write_all(&unit.bytes)?;
    }

    let cursor = zip.finish()?;
    tracing::debug!(entries = units.len(), "bundled images");
    Ok(Some(cursor.into_inner()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn unit(name: &str, bytes: &[u8]) -> DownloadUnit {
        DownloadUnit {
            bytes: bytes.to_vec(),
            filename: name.to_string(),
        }
    }

    #[test]
    fn test_bundle_empty() {
        assert!(bundle(&[]).unwrap().is_none());
    }

    #[test]
    fn test_bundle_two_entries() {
        let units = vec![
            unit("Acme_2024-03-05_1.jpg", b"first"),
            unit("Acme_unknown_date_2.jpg", b"second"),
        ];
        let bytes = bundle(&units).unwrap().unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("Acme_unknown_date_2.jpg")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "second");
        assert_eq!(archive.by_index(0).unwrap().name(), "Acme_2024-03-05_1.jpg");
    }
}
