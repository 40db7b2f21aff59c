//! Plain-text rendering of a dashboard pass (CLI)

use farm_dashboard_common::{ImageSlot, Notice, Presentation, RecordPanel, Selection};

pub const TITLE: &str = "Farm Information Dashboard";
pub const NO_DATA: &str = "No data available for the selected filters.";

pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Info(m) => format!("✔ {m}"),
        Notice::Warning(m) => format!("⚠ {m}"),
    }
}

pub fn render_panel(panel: &RecordPanel) -> String {
    let url = panel.image_url.as_deref().unwrap_or_default();

    let image = match &panel.image {
        ImageSlot::Ready { filename, kind } => format!("Image: {url} ({kind}) -> {filename}\n"),
        ImageSlot::Unprocessed(_) => format!("Image: {url}\n"),
        ImageSlot::InvalidUrl | ImageSlot::Failed(_) => String::new(),
    };
    let message = panel
        .image_message()
        .map(|m| format!("⚠ {m}\n"))
        .unwrap_or_default();
    let metadata: String = panel
        .metadata_lines()
        .iter()
        .map(|line| format!("  {line}\n"))
        .collect();

    format!(
        "--- {caption} ---\n{image}{message}Farm Name: {farm}\nOther Information:\n{metadata}\
         Activity:\n  {activity}\nActivity Date:\n  {date}\n",
        caption = panel.caption(),
        farm = panel.farm_name,
        activity = panel.activity_text(),
        date = panel.date_text(),
    )
}

/// Full report for one pass
pub fn render_report(selection: Option<&Selection>, notices: &[Notice], presentation: &Presentation) -> String {
    let mut out = format!("{TITLE}\n");

    if let Some(selection) = selection {
        out.push_str(&format!("Farm: {}  Severity: {}\n", selection.farm, selection.severity));
    }
    for notice in notices {
        out.push_str(&render_notice(notice));
        out.push('\n');
    }
    out.push('\n');

    if presentation.is_empty() {
        out.push_str(NO_DATA);
        out.push('\n');
        return out;
    }

    for panel in &presentation.panels {
        out.push_str(&render_panel(panel));
        out.push('\n');
    }

    if !presentation.downloads.is_empty() {
        out.push_str(&format!(
            "{} image(s) available for download\n",
            presentation.downloads.len()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_dashboard_common::{ImageKind, Metadata, SeverityFilter};

    fn panel(image: ImageSlot) -> RecordPanel {
        RecordPanel {
            row: 1,
            farm_name: "Acme".into(),
            image_url: Some("https://img/a.png".into()),
            image,
            metadata: Metadata::Malformed,
            activity_note: Some("Sprayed fungicide".into()),
            date: None,
        }
    }

    #[test]
    fn test_render_panel_ready() {
        let text = render_panel(&panel(ImageSlot::Ready {
            filename: "Acme_unknown_date_2.jpg".into(),
            kind: ImageKind::Png,
        }));
        assert!(text.contains("--- Image 2 ---"));
        assert!(text.contains("(PNG) -> Acme_unknown_date_2.jpg"));
        assert!(text.contains("Invalid JSON data"));
        assert!(text.contains("Sprayed fungicide"));
        assert!(text.contains("No date recorded"));
    }

    #[test]
    fn test_render_panel_failed() {
        let text = render_panel(&panel(ImageSlot::Failed("timeout".into())));
        assert!(text.contains("⚠ Error loading image 2: timeout"));
    }

    #[test]
    fn test_render_panel_unprocessed() {
        let text = render_panel(&panel(ImageSlot::Unprocessed("unsupported format".into())));
        assert!(text.contains("Image: https://img/a.png\n"));
        assert!(text.contains("⚠ Error downloading or processing image: unsupported format"));
        assert!(!text.contains("->"));
    }

    #[test]
    fn test_render_report_without_records() {
        let selection = Selection { farm: "Acme".into(), severity: SeverityFilter::Only("High".into()) };
        let notices = vec![Notice::Warning("Severity 'x' not found. Showing all severities.".into())];
        let text = render_report(Some(&selection), &notices, &Presentation::default());
        assert!(text.starts_with(TITLE));
        assert!(text.contains("Farm: Acme  Severity: High"));
        assert!(text.contains("⚠ Severity 'x'"));
        assert!(text.contains(NO_DATA));
    }
}
