//! `linops-core` — pagination, lazy-relation resolution, and bounded fan-out
//! over the Linear API, plus the aggregations and reports built on top.
//!
//! The three primitives compose into one pipeline:
//!
//! ```text
//! paginate     ← drain a cursor connection, order preserved, all-or-nothing
//! Relation     ← absent | value | deferred | thunk, resolved exactly once
//! map_bounded  ← ≤ limit concurrent workers, output aligned with input
//! ```
//!
//! `snapshot` wires them together; `aggregate` and `report` are synchronous
//! consumers of the flattened records; `export`/`analyzer` cover the
//! customer-requests pipeline.

pub mod aggregate;
pub mod analyzer;
pub mod error;
pub mod export;
pub mod fanout;
pub mod page;
pub mod record;
pub mod relation;
pub mod report;
pub mod snapshot;

pub use error::{OpsError, Result};
pub use fanout::map_bounded;
pub use page::{paginate, Page};
pub use record::{IssueLite, IssueRelations};
pub use relation::Relation;
pub use snapshot::{snapshot, SnapshotOptions, WorkspaceSnapshot, DEFAULT_CONCURRENCY};
