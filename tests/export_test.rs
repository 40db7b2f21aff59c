//! Image export tests (`show --output`)

use farm_dashboard::export::export_downloads;
use farm_dashboard_common::DownloadUnit;
use std::io::Read;
use tempfile::tempdir;

fn unit(filename: &str, bytes: &[u8]) -> DownloadUnit {
    DownloadUnit {
        bytes: bytes.to_vec(),
        filename: filename.to_string(),
    }
}

#[test]
fn test_export_writes_images_and_archive() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out");

    let downloads = vec![
        unit("Acme_2024-03-05_1.jpg", b"first"),
        unit("Acme_unknown_date_3.jpg", b"second"),
    ];

    let summary = export_downloads(&downloads, &output).expect("export failed");

    assert_eq!(summary.images.len(), 2);
    assert_eq!(std::fs::read(output.join("Acme_2024-03-05_1.jpg")).unwrap(), b"first");
    assert_eq!(std::fs::read(output.join("Acme_unknown_date_3.jpg")).unwrap(), b"second");

    let archive_path = summary.archive.expect("archive should be written");
    assert_eq!(archive_path, output.join("images.zip"));

    let file = std::fs::File::open(&archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(file).expect("invalid zip");
    assert_eq!(archive.len(), 2);

    let mut content = String::new();
    archive
        .by_name("Acme_unknown_date_3.jpg")
        .expect("entry missing")
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "second");
}

#[test]
fn test_export_nothing_to_bundle() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out");

    let summary = export_downloads(&[], &output).expect("export failed");

    assert!(summary.images.is_empty());
    assert!(summary.archive.is_none());
    assert!(!output.exists(), "no directory should be created");
}
