//! # rugby_core - Match-Tracking Extraction and Rank Analysis
//!
//! This library turns raw match-tracking exports into validated, typed
//! per-team match documents, and runs league-wide rank and outlier
//! analysis over the season statistics workbook.
//!
//! ## Features
//! - Canonical pitch geometry (try-zone offset, mirrored width axis)
//! - Per-kind event extraction with field-level validation
//! - Restart-based team-name resolution
//! - Parallel weekly batch with strict failure isolation
//! - Top/bottom-three outlier detection with degeneracy filtering

pub mod analysis;
pub mod batch;
pub mod error;
pub mod extract;
pub mod models;
pub mod pitch;
pub mod validate;

pub use batch::{run_batch, BatchReport};
pub use error::{ExtractError, Result, ValidationError};
pub use extract::{extract_all, resolve_teams, MatchExtraction};
pub use models::{EventKind, MatchDocument, MatchEvent, MatchExport, Workbook};

/// Library version, surfaced in the CLI banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
