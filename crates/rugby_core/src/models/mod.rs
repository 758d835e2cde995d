//! Data model: raw export tree, typed events, match documents, and the
//! league statistics workbook.

pub mod document;
pub mod events;
pub mod raw;
pub mod table;

pub use document::MatchDocument;
pub use events::{EventKind, KickCategory, KickStyle, MatchEvent, MAUL_TRY_RANK_METERS};
pub use raw::{Instance, Label, MatchExport, SessionInfo};
pub use table::{Cell, SheetGrid, StatBlock, TeamRow, Workbook};
