//! Raw export to typed events: team resolution plus per-kind extraction.

pub mod extractor;
pub mod resolver;

pub use extractor::{extract, extract_all, extract_team_kind, KindEvents, MatchExtraction};
pub use resolver::resolve_teams;
