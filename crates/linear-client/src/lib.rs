//! `linear-client` — typed async client for the Linear GraphQL API.
//!
//! Covers exactly the surface the `linops` workspace uses: the `viewer`
//! lookup, team listing, filtered issue pages, by-id relation lookups, and
//! the `issueCreate` mutation.
//!
//! ```text
//! ClientConfig                  ← explicit: key, endpoint, page size
//!     │
//!     ▼
//! LinearClient                  ← one POST per query/mutation, no retries
//!     │
//!     ▼
//! Connection<T> / typed models  ← serde structs, no Value escape hatches
//! ```
//!
//! Pagination and relation resolution live in `linops-core`; this crate only
//! returns single pages and raw relation references.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::LinearClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use types::{
    Connection, CreatedIssue, Issue, IssueCreateInput, IssueDepth, IssueFilter, PageInfo, Project,
    RelationRef, Team, User, Viewer, WorkflowState,
};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, ClientError>;
