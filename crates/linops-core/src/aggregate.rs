//! Synchronous aggregations over flattened records.
//!
//! All helpers are pure and total: fresh structures per call, inputs never
//! mutated, no key dropped for being empty. Bucket iteration order is
//! first-seen-key order, nothing else.

use std::collections::HashMap;

use linear_client::Project;
use serde::Serialize;

use crate::record::IssueLite;

/// Placeholder bucket for records without a project.
pub const NO_PROJECT: &str = "(No Project)";
/// Placeholder bucket for records without a workflow state.
pub const NO_STATE: &str = "(No State)";
/// Placeholder owner for records without an assignee.
pub const UNASSIGNED: &str = "(unassigned)";

/// Project statuses that count as active. Archived projects are excluded
/// even when their status matches.
const ACTIVE_STATUSES: [&str; 2] = ["planned", "started"];

// ---------------------------------------------------------------------------
// Group by project, then state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ProjectBucket {
    pub project_name: String,
    pub total: usize,
    /// `(state name, count)` in first-seen order.
    pub states: Vec<(String, usize)>,
}

/// Bucket records by project name, then by state name within each project.
pub fn group_by_project_and_state(records: &[IssueLite]) -> Vec<ProjectBucket> {
    let mut buckets: Vec<ProjectBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let project = record.project_name.as_deref().unwrap_or(NO_PROJECT);
        let state = record.state_name.as_deref().unwrap_or(NO_STATE);

        let at = *index.entry(project.to_string()).or_insert_with(|| {
            buckets.push(ProjectBucket {
                project_name: project.to_string(),
                total: 0,
                states: Vec::new(),
            });
            buckets.len() - 1
        });
        let bucket = &mut buckets[at];
        bucket.total += 1;
        match bucket.states.iter_mut().find(|(name, _)| name == state) {
            Some((_, count)) => *count += 1,
            None => bucket.states.push((state.to_string(), 1)),
        }
    }

    buckets
}

// ---------------------------------------------------------------------------
// Active projects with issue counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ActiveProjectRow {
    pub project_id: String,
    pub project_name: String,
    pub status: String,
    pub issue_count: usize,
}

/// Filter the side-loaded `projects` down to active, non-archived ones and
/// count how many records reference each. Sorted by count descending, name
/// ascending on ties.
pub fn active_project_rows(records: &[IssueLite], projects: &[Project]) -> Vec<ActiveProjectRow> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        if let Some(id) = record.project_id.as_deref() {
            *counts.entry(id).or_default() += 1;
        }
    }

    let mut rows: Vec<ActiveProjectRow> = projects
        .iter()
        .filter(|p| ACTIVE_STATUSES.contains(&p.state.as_str()) && p.archived_at.is_none())
        .map(|p| ActiveProjectRow {
            project_id: p.id.clone(),
            project_name: p.name.clone(),
            status: p.state.clone(),
            issue_count: counts.get(p.id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.issue_count
            .cmp(&a.issue_count)
            .then_with(|| a.project_name.cmp(&b.project_name))
    });
    rows
}

// ---------------------------------------------------------------------------
// Load per assignee
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AssigneeLoadRow {
    /// `None` for the unassigned bucket.
    pub assignee_id: Option<String>,
    pub display_name: String,
    pub issue_count: usize,
}

/// Group records by owner, counting issues per assignee. Records without an
/// assignee land in a single `"(unassigned)"` bucket. Sorted by count
/// descending, display name ascending on ties.
pub fn assignee_load_rows(records: &[IssueLite]) -> Vec<AssigneeLoadRow> {
    let mut rows: Vec<AssigneeLoadRow> = Vec::new();
    let mut index: HashMap<Option<String>, usize> = HashMap::new();

    for record in records {
        let key = record.assignee_id.clone();
        let at = *index.entry(key.clone()).or_insert_with(|| {
            rows.push(AssigneeLoadRow {
                assignee_id: key.clone(),
                display_name: record
                    .assignee_name
                    .clone()
                    .unwrap_or_else(|| UNASSIGNED.to_string()),
                issue_count: 0,
            });
            rows.len() - 1
        });
        rows[at].issue_count += 1;
    }

    rows.sort_by(|a, b| {
        b.issue_count
            .cmp(&a.issue_count)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
