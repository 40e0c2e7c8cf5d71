//! Customer-requests exporter.
//!
//! Collects issues carrying the request label and writes them to a CSV whose
//! `text` column feeds the downstream clustering analyzer (see
//! [`crate::analyzer`]). Title and description are joined into one text cell;
//! rows with no text are skipped.

use std::path::Path;
use std::sync::Arc;

use linear_client::{IssueDepth, IssueFilter, LinearClient};

use crate::error::Result;
use crate::snapshot::collect_issues;

/// Label the exporter filters on when the caller doesn't override it.
pub const DEFAULT_REQUEST_LABEL: &str = "customer-request";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub label: String,
    pub team_key: Option<String>,
    pub include_archived: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            label: DEFAULT_REQUEST_LABEL.to_string(),
            team_key: None,
            include_archived: false,
        }
    }
}

/// Export matching issues to `out`. Returns the number of data rows written.
pub async fn export_requests(
    client: &Arc<LinearClient>,
    options: &ExportOptions,
    out: &Path,
) -> Result<usize> {
    let filter = IssueFilter {
        label: Some(options.label.clone()),
        team_key: options.team_key.clone(),
        include_archived: options.include_archived,
        ..Default::default()
    };
    let issues = collect_issues(client, &filter, IssueDepth::Slim).await?;

    let mut csv = csv::Writer::from_path(out)?;
    csv.write_record(["id", "identifier", "created_at", "text"])?;
    let mut rows = 0usize;
    for issue in &issues {
        let text = match issue.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => {
                format!("{}\n\n{}", issue.title.trim(), description)
            }
            _ => issue.title.trim().to_string(),
        };
        if text.is_empty() {
            continue;
        }
        csv.write_record([
            issue.id.as_str(),
            issue.identifier.as_str(),
            &issue.created_at.to_rfc3339(),
            &text,
        ])?;
        rows += 1;
    }
    csv.flush()?;
    tracing::info!(rows, path = %out.display(), "wrote customer-request export");
    Ok(rows)
}
