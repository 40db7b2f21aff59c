use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use farm_dashboard_common::{
    bundle, download_filename, fetch_image, is_well_formed_url, QueryParams, ARCHIVE_FILE_NAME,
    ARCHIVE_MIME, IMAGE_MIME,
};
use serde::Serialize;

use crate::dashboard::run_pass;
use crate::server::error::ApiError;
use crate::server::page;
use crate::server::state::AppState;

/// `GET /`: dashboard page
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, ApiError> {
    let params = QueryParams::from_query_string(query.as_deref().unwrap_or_default());
    let dataset = state.cache.get().await?;
    let pass = run_pass(&dataset, &params, &state.fetcher).await;
    Ok(Html(page::render_dashboard(&dataset, &pass)))
}

/// `GET /download/image/{row}`: one normalized image
pub async fn download_image(
    State(state): State<Arc<AppState>>,
    Path(row): Path<usize>,
) -> Result<Response, ApiError> {
    let dataset = state.cache.get().await?;
    let record = dataset
        .record(row)
        .ok_or_else(|| ApiError::not_found(format!("No record for entry {}", row + 1)))?;

    let url = record
        .image_url
        .as_deref()
        .filter(|u| is_well_formed_url(u))
        .ok_or_else(|| ApiError::not_found(format!("Invalid image URL for entry {}", record.row_number())))?;

    let (bytes, _kind) = fetch_image(&state.fetcher, url.trim()).await.map_err(|e| {
        ApiError::bad_gateway(format!("Error loading image {}: {}", record.row_number(), e))
    })?;

    let filename = download_filename(&record.farm_name, record.date, record.row_number());
    Ok(attachment(IMAGE_MIME, &filename, bytes))
}

/// `GET /download/all`: zip of every image of the resolved selection
pub async fn download_all(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let params = QueryParams::from_query_string(query.as_deref().unwrap_or_default());
    let dataset = state.cache.get().await?;
    let pass = run_pass(&dataset, &params, &state.fetcher).await;

    match bundle(&pass.presentation.downloads)? {
        Some(archive) => Ok(attachment(ARCHIVE_MIME, ARCHIVE_FILE_NAME, archive)),
        None => Err(ApiError::not_found("No images available for the selected filters.")),
    }
}

/// `POST /refresh`: reload the dataset
pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<Redirect, ApiError> {
    state.cache.refresh().await?;
    Ok(Redirect::to("/"))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub dataset_loaded: bool,
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        dataset_loaded: state.cache.is_loaded().await,
    })
}

fn attachment(mime: &'static str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(filename)),
        ],
        bytes,
    )
        .into_response()
}

/// `attachment; filename="…"` with characters unsafe in a header replaced
pub fn content_disposition(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
