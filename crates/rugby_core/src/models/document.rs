//! Per-team match documents handed to the persistence collaborator.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::events::{EventKind, MatchEvent};

/// Everything persisted for one team for one match: the match date and
/// the validated event lists keyed by kind. Fully materialized at build
/// time and never mutated afterward; the storage schema beyond this shape
/// is the collaborator's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub team: String,
    pub opposition: String,
    pub events: BTreeMap<EventKind, Vec<MatchEvent>>,
}

impl MatchDocument {
    pub fn new(date: Option<NaiveDate>, team: String, opposition: String) -> Self {
        Self {
            date,
            team,
            opposition,
            events: BTreeMap::new(),
        }
    }

    /// Events of one kind, empty when the team produced none.
    pub fn events_of(&self, kind: EventKind) -> &[MatchEvent] {
        self.events.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_events(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }
}
