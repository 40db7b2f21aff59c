//! One dashboard pass: select → filter → present
//!
//! Shared by the CLI and the HTTP server. Every pass is independent; only the
//! dataset is reused between passes.

use farm_dashboard_common::{
    present, Dataset, ImageFetcher, Notice, Presentation, QueryParams, Selection, SelectionOutcome,
};

#[derive(Debug, Clone, Default)]
pub struct DashboardPass {
    pub selection: Option<Selection>,
    pub notices: Vec<Notice>,
    pub presentation: Presentation,
}

impl DashboardPass {
    /// Whether the selection produced any records
    pub fn has_records(&self) -> bool {
        !self.presentation.is_empty()
    }
}

/// Resolve `params` and present the resulting slice
pub async fn run_pass<F: ImageFetcher>(dataset: &Dataset, params: &QueryParams, fetcher: &F) -> DashboardPass {
    let SelectionOutcome { selection, notices } = dataset.select(params);
    present_selection(dataset, selection, notices, fetcher).await
}

/// Present an already resolved selection
pub async fn present_selection<F: ImageFetcher>(
    dataset: &Dataset,
    selection: Option<Selection>,
    notices: Vec<Notice>,
    fetcher: &F,
) -> DashboardPass {
    let presentation = match &selection {
        Some(selection) => {
            let slice = dataset.slice(selection);
            tracing::debug!(
                farm = %selection.farm,
                severity = %selection.severity,
                records = slice.len(),
                "presenting selection"
            );
            present(&slice, fetcher).await
        }
        None => Presentation::default(),
    };

    DashboardPass {
        selection,
        notices,
        presentation,
    }
}
