//! End-to-end dashboard passes over an in-memory dataset

use farm_dashboard::dashboard::run_pass;
use farm_dashboard::report::render_report;
use farm_dashboard_common::{
    bundle, Dataset, Error, ImageFetcher, ImageKind, ImageSlot, Notice, QueryParams, Result, SeverityFilter,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::collections::HashMap;
use std::future::Future;
use std::io::Cursor;

const CSV: &str = r#"farmName,json data,Image URL,activity_record,Date
Beta,"[{""name"":""Severity"",""value"":""Low""}]",https://img.test/b1.png,Weeding,05/03/2024
Acme,"[{""name"":""Severity"",""value"":""High""},{""name"":""Crop"",""value"":""Maize""}]",https://img.test/a1.png,Spraying,01/02/2024
Acme,not json,https://img.test/missing.png,,
Acme,"[{""name"":""Severity"",""value"":""Low""}]",not-a-url,,2024-03-07
"#;

/// Serves fixed bytes per URL; anything else is a 404
struct StaticFetcher {
    images: HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    fn new() -> Self {
        let mut images = HashMap::new();
        images.insert("https://img.test/a1.png".to_string(), png());
        images.insert("https://img.test/b1.png".to_string(), png());
        Self { images }
    }
}

impl ImageFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let found = self.images.get(url).cloned();
        let url = url.to_string();
        async move { found.ok_or_else(|| Error::Fetch(format!("404 Not Found for {url}"))) }
    }
}

fn png() -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([30, 140, 30])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}

fn dataset() -> Dataset {
    Dataset::from_reader(CSV.as_bytes()).expect("load dataset")
}

#[tokio::test]
async fn test_default_selection() {
    let dataset = dataset();
    assert_eq!(dataset.severity_levels(), ["all", "High", "Low"]);

    let pass = run_pass(&dataset, &QueryParams::default(), &StaticFetcher::new()).await;

    let selection = pass.selection.as_ref().expect("selection");
    assert_eq!(selection.farm, "Acme");
    assert_eq!(selection.severity, SeverityFilter::All);
    assert!(pass.notices.is_empty());

    let panels = &pass.presentation.panels;
    assert_eq!(panels.iter().map(|p| p.row_number()).collect::<Vec<_>>(), [2, 3, 4]);

    assert!(matches!(
        &panels[0].image,
        ImageSlot::Ready { filename, kind: ImageKind::Png } if filename == "Acme_2024-02-01_2.jpg"
    ));
    assert_eq!(panels[0].metadata_lines(), ["Severity: High", "Crop: Maize"]);
    assert_eq!(panels[0].activity_text(), "Spraying");

    assert!(matches!(panels[1].image, ImageSlot::Failed(_)));
    assert!(panels[1].image_message().unwrap().starts_with("Error loading image 3:"));
    assert_eq!(panels[1].metadata_lines(), ["Invalid JSON data"]);
    assert_eq!(panels[1].date_text(), "No date recorded");

    assert_eq!(panels[2].image, ImageSlot::InvalidUrl);
    assert_eq!(panels[2].image_message().as_deref(), Some("Invalid image URL for entry 4"));
    assert_eq!(panels[2].date_text(), "2024-03-07");

    let downloads = &pass.presentation.downloads;
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].filename, "Acme_2024-02-01_2.jpg");
    assert_eq!(image::guess_format(&downloads[0].bytes).unwrap(), ImageFormat::Png);
}

#[tokio::test]
async fn test_farm_name_is_case_insensitive() {
    let dataset = dataset();
    let params = QueryParams::new(Some("  beta "), None);

    let pass = run_pass(&dataset, &params, &StaticFetcher::new()).await;

    assert_eq!(pass.selection.as_ref().unwrap().farm, "Beta");
    assert_eq!(pass.notices, [Notice::Info("Showing data for farm: Beta".to_string())]);
    assert_eq!(pass.presentation.downloads[0].filename, "Beta_2024-03-05_1.jpg");
}

#[tokio::test]
async fn test_unknown_farm_falls_back() {
    let dataset = dataset();
    let params = QueryParams::new(Some("Gamma"), None);

    let pass = run_pass(&dataset, &params, &StaticFetcher::new()).await;

    assert_eq!(pass.selection.as_ref().unwrap().farm, "Acme");
    assert_eq!(
        pass.notices,
        [Notice::Warning("Farm 'Gamma' not found. Showing default farm: Acme".to_string())]
    );
    assert_eq!(pass.presentation.panels.len(), 3);
}

#[tokio::test]
async fn test_partial_name_does_not_match() {
    let dataset = dataset();
    let params = QueryParams::new(Some("Acm"), None);

    let pass = run_pass(&dataset, &params, &StaticFetcher::new()).await;

    assert_eq!(pass.selection.as_ref().unwrap().farm, "Acme");
    assert!(pass.notices[0].is_warning());
}

#[tokio::test]
async fn test_severity_filter() {
    let dataset = dataset();
    let params = QueryParams::new(Some("acme"), Some("High"));

    let pass = run_pass(&dataset, &params, &StaticFetcher::new()).await;

    assert_eq!(pass.selection.as_ref().unwrap().severity, SeverityFilter::Only("High".to_string()));
    assert_eq!(pass.presentation.panels.len(), 1);
    assert_eq!(pass.presentation.panels[0].row_number(), 2);
}

#[tokio::test]
async fn test_unknown_severity_shows_all() {
    let dataset = dataset();
    let params = QueryParams::new(None, Some("Critical"));

    let pass = run_pass(&dataset, &params, &StaticFetcher::new()).await;

    assert_eq!(pass.selection.as_ref().unwrap().severity, SeverityFilter::All);
    assert_eq!(
        pass.notices,
        [Notice::Warning("Severity 'Critical' not found. Showing all severities.".to_string())]
    );
}

#[tokio::test]
async fn test_empty_slice_has_no_downloads() {
    let dataset = dataset();
    // Beta has no High records
    let params = QueryParams::new(Some("Beta"), Some("High"));

    let pass = run_pass(&dataset, &params, &StaticFetcher::new()).await;

    assert!(!pass.has_records());
    assert!(bundle(&pass.presentation.downloads).unwrap().is_none());

    let report = render_report(pass.selection.as_ref(), &pass.notices, &pass.presentation);
    assert!(report.contains("No data available for the selected filters."));
}

#[tokio::test]
async fn test_empty_dataset() {
    let dataset = Dataset::from_reader("farmName,json data,Image URL,activity_record,Date\n".as_bytes()).unwrap();

    let pass = run_pass(&dataset, &QueryParams::new(Some("Acme"), None), &StaticFetcher::new()).await;

    assert!(pass.selection.is_none());
    assert_eq!(pass.notices, [Notice::Warning("No farms available in the dataset.".to_string())]);
    assert!(pass.presentation.is_empty());
}

#[tokio::test]
async fn test_report_text() {
    let dataset = dataset();
    let params = QueryParams::new(Some("ACME"), None);
    let pass = run_pass(&dataset, &params, &StaticFetcher::new()).await;

    let report = render_report(pass.selection.as_ref(), &pass.notices, &pass.presentation);

    assert!(report.starts_with("Farm Information Dashboard\n"));
    assert!(report.contains("✔ Showing data for farm: Acme"));
    assert!(report.contains("--- Image 2 ---"));
    assert!(report.contains("-> Acme_2024-02-01_2.jpg"));
    assert!(report.contains("⚠ Invalid image URL for entry 4"));
    assert!(report.contains("No activity recorded"));
}
