//! Interactive farm/severity selection (CLI `browse`)
//!
//! The query parameters only preselect the choices; the user picks the final
//! farm and severity from the directory and the severity list.

use crate::error::{DashboardError, Result};
use crate::report::render_notice;
use dialoguer::Select;
use farm_dashboard_common::{Dataset, QueryParams, Selection, SeverityFilter};

/// Menu positions that reproduce `selection`
pub fn default_indices(dataset: &Dataset, selection: &Selection) -> (usize, usize) {
    let farm = dataset.directory().position(&selection.farm).unwrap_or(0);
    let severity = dataset
        .severity_levels()
        .iter()
        .position(|level| level == selection.severity.as_str())
        .unwrap_or(0);
    (farm, severity)
}

/// Ask for farm and severity, starting from `initial`
pub fn prompt_selection(dataset: &Dataset, initial: &QueryParams) -> Result<Selection> {
    let outcome = dataset.select(initial);
    for notice in &outcome.notices {
        println!("{}", render_notice(notice));
    }

    let selection = outcome.selection.ok_or(DashboardError::NoFarms)?;
    let (farm_idx, severity_idx) = default_indices(dataset, &selection);

    let farms = dataset.directory().farms();
    let farm_idx = Select::new()
        .with_prompt("Select Farm")
        .items(farms)
        .default(farm_idx)
        .interact()?;

    let levels = dataset.severity_levels();
    let severity_idx = Select::new()
        .with_prompt("Severity")
        .items(levels)
        .default(severity_idx)
        .interact()?;

    Ok(Selection {
        farm: farms[farm_idx].clone(),
        severity: SeverityFilter::from_level(&levels[severity_idx]),
    })
}
