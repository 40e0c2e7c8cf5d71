//! Report rendering: Markdown for humans, CSV for spreadsheets.
//!
//! Pure string/byte building over an already-computed [`WorkspaceSnapshot`];
//! no fetching happens here.

use std::io::Write;

use crate::aggregate::{NO_PROJECT, NO_STATE, UNASSIGNED};
use crate::error::Result;
use crate::record::IssueLite;
use crate::snapshot::WorkspaceSnapshot;

/// Render the snapshot as a Markdown report.
pub fn to_markdown(snapshot: &WorkspaceSnapshot) -> String {
    let mut out = String::from("# Workspace Snapshot\n\n");
    out.push_str(&format!(
        "_Generated {} — {} issues_\n\n",
        snapshot.generated_at.format("%Y-%m-%d %H:%M UTC"),
        snapshot.total_issues
    ));

    out.push_str("## Issues by project and state\n\n");
    for bucket in &snapshot.by_project {
        out.push_str(&format!(
            "### {} ({})\n\n",
            bucket.project_name, bucket.total
        ));
        for (state, count) in &bucket.states {
            out.push_str(&format!("- {state}: {count}\n"));
        }
        out.push('\n');
    }

    out.push_str("## Active projects\n\n");
    if snapshot.active_projects.is_empty() {
        out.push_str("_No active projects._\n\n");
    } else {
        out.push_str("| Project | Status | Issues |\n|---|---|---|\n");
        for row in &snapshot.active_projects {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                row.project_name, row.status, row.issue_count
            ));
        }
        out.push('\n');
    }

    out.push_str("## Assignee load\n\n");
    for row in &snapshot.assignee_load {
        out.push_str(&format!("- {}: {}\n", row.display_name, row.issue_count));
    }

    out
}

/// Write the flattened issue table as CSV.
pub fn write_issues_csv<W: Write>(records: &[IssueLite], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "identifier",
        "title",
        "state",
        "project",
        "team",
        "assignee",
        "created_at",
        "url",
    ])?;
    for record in records {
        csv.write_record([
            record.identifier.as_str(),
            record.title.as_str(),
            record.state_name.as_deref().unwrap_or(NO_STATE),
            record.project_name.as_deref().unwrap_or(NO_PROJECT),
            record.team_name.as_deref().unwrap_or(""),
            record.assignee_name.as_deref().unwrap_or(UNASSIGNED),
            &record.created_at.to_rfc3339(),
            record.url.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}
