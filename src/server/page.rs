//! HTML rendering of the dashboard page

use farm_dashboard_common::{Dataset, ImageSlot, Notice, RecordPanel};

use crate::dashboard::DashboardPass;
use crate::report::{NO_DATA, TITLE};

const STYLE: &str = "\
body{font-family:sans-serif;margin:0;display:flex}\
aside{width:260px;padding:1rem;background:#f3f4f6;min-height:100vh}\
main{flex:1;padding:1rem 2rem}\
label{display:block;margin:.75rem 0}select{width:100%}\
.panel{display:grid;grid-template-columns:1fr 1fr;gap:1.5rem;border-bottom:1px solid #ddd;padding:1rem 0}\
.panel img{max-width:100%}\
.info{background:#e7f6ec;padding:.5rem}.warning{background:#fff7db;padding:.5rem}.error{background:#fde8e8;padding:.5rem}";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{TITLE}</title>\
         <style>{STYLE}</style></head><body>{body}</body></html>"
    )
}

fn notice_html(notice: &Notice) -> String {
    let class = if notice.is_warning() { "warning" } else { "info" };
    format!("<div class=\"{class}\">{}</div>", escape_html(notice.message()))
}

fn options_html(values: &[String], selected: Option<&str>) -> String {
    values
        .iter()
        .map(|value| {
            let mark = if Some(value.as_str()) == selected { " selected" } else { "" };
            let value = escape_html(value);
            format!("<option value=\"{value}\"{mark}>{value}</option>")
        })
        .collect()
}

// menu picks travel as the exact `farm` parameter
fn sidebar_html(dataset: &Dataset, pass: &DashboardPass) -> String {
    let selected_farm = pass.selection.as_ref().map(|s| s.farm.as_str());
    let selected_severity = pass.selection.as_ref().map(|s| s.severity.as_str());

    let mut out = String::from("<aside><form method=\"get\" action=\"/\">");
    out.push_str("<label>Select Farm<select name=\"farm\" onchange=\"this.form.submit()\">");
    out.push_str(&options_html(dataset.directory().farms(), selected_farm));
    out.push_str("</select></label>");
    out.push_str("<label>Severity<select name=\"severity\" onchange=\"this.form.submit()\">");
    out.push_str(&options_html(dataset.severity_levels(), selected_severity));
    out.push_str("</select></label><noscript><button type=\"submit\">Apply</button></noscript></form>");

    if let Some(selection) = &pass.selection {
        if !pass.presentation.downloads.is_empty() {
            let query = selection.to_query_params().to_query_string();
            out.push_str(&format!(
                "<p><a href=\"/download/all?{}\" download>Download All Images</a></p>",
                escape_html(&query)
            ));
        }
    }

    out.push_str("<form method=\"post\" action=\"/refresh\"><button type=\"submit\">Reload data</button></form>");
    out.push_str("</aside>");
    out
}

fn image_html(panel: &RecordPanel) -> String {
    let url = escape_html(panel.image_url.as_deref().unwrap_or_default());
    let caption = escape_html(&panel.caption());
    let message = panel.image_message().map(|m| escape_html(&m));

    match (&panel.image, message) {
        (ImageSlot::Ready { .. }, _) => format!(
            "<figure><img src=\"{url}\" alt=\"{caption}\"><figcaption>{caption}</figcaption></figure>\
             <a href=\"/download/image/{}\" download>Download Image</a>",
            panel.row
        ),
        (ImageSlot::Unprocessed(_), Some(message)) => format!(
            "<figure><img src=\"{url}\" alt=\"{caption}\"><figcaption>{caption}</figcaption></figure>\
             <div class=\"error\">{message}</div>"
        ),
        (ImageSlot::InvalidUrl, Some(message)) => format!("<div class=\"warning\">{message}</div>"),
        (_, Some(message)) => format!("<div class=\"error\">{message}</div>"),
        (_, None) => String::new(),
    }
}

fn panel_html(panel: &RecordPanel) -> String {
    let metadata: String = panel
        .metadata_lines()
        .iter()
        .map(|line| format!("<li>{}</li>", escape_html(line)))
        .collect();

    format!(
        "<section class=\"panel\"><div>{image}</div><div>\
         <p><strong>Farm Name:</strong> {farm}</p>\
         <p><strong>Other Information:</strong></p><ul>{metadata}</ul>\
         <h4>Activity</h4><p>{activity}</p>\
         <h5>Activity Date</h5><p>{date}</p></div></section>",
        image = image_html(panel),
        farm = escape_html(&panel.farm_name),
        activity = escape_html(panel.activity_text()),
        date = escape_html(&panel.date_text()),
    )
}

pub fn render_dashboard(dataset: &Dataset, pass: &DashboardPass) -> String {
    let mut body = sidebar_html(dataset, pass);
    body.push_str(&format!("<main><h1>{TITLE}</h1>"));

    for notice in &pass.notices {
        body.push_str(&notice_html(notice));
    }

    if pass.selection.is_some() {
        if pass.has_records() {
            for panel in &pass.presentation.panels {
                body.push_str(&panel_html(panel));
            }
        } else {
            body.push_str(&format!("<div class=\"warning\">{NO_DATA}</div>"));
        }
    }

    body.push_str("</main>");
    document(&body)
}

/// Page with a single top-level error
pub fn render_error(message: &str) -> String {
    document(&format!(
        "<main><h1>{TITLE}</h1><div class=\"error\">{}</div></main>",
        escape_html(message)
    ))
}
