//! Typed, validated match events.
//!
//! [`EventKind`] is the closed taxonomy of everything the extraction
//! pipeline understands; [`MatchEvent`] carries the validated per-kind
//! payloads. All coordinates here are canonical pitch coordinates
//! (see [`crate::pitch`]); all string fields are trimmed and non-empty.

use serde::{Deserialize, Serialize};

/// The closed set of extractable event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Kick,
    LineBreak,
    Maul,
    #[serde(rename = "try")]
    TryEvent,
    Scrum,
    PenaltyConceded,
    PenaltyWon,
    Turnover,
    Carry,
    Tackle,
    /// 22m-zone entry.
    GoalEntry,
    LineoutAttacking,
    BreakAssist,
    TryAssist,
    Ruck,
}

impl EventKind {
    /// Name used in validation-error context.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Kick => "Kick",
            EventKind::LineBreak => "LineBreak",
            EventKind::Maul => "Maul",
            EventKind::TryEvent => "Try",
            EventKind::Scrum => "Scrum",
            EventKind::PenaltyConceded => "PenaltyConceded",
            EventKind::PenaltyWon => "PenaltyWon",
            EventKind::Turnover => "Turnover",
            EventKind::Carry => "Carry",
            EventKind::Tackle => "Tackle",
            EventKind::GoalEntry => "GoalEntry",
            EventKind::LineoutAttacking => "LineoutAttacking",
            EventKind::BreakAssist => "BreakAssist",
            EventKind::TryAssist => "TryAssist",
            EventKind::Ruck => "Ruck",
        }
    }

    /// Raw-node code suffix for code-selected kinds: nodes are labeled
    /// `"{team} {suffix}"`. [`EventKind::LineBreak`] is the one kind
    /// selected by label pair instead of code.
    pub fn code_suffix(self) -> Option<&'static str> {
        match self {
            EventKind::Kick => Some("Kick"),
            EventKind::LineBreak => None,
            EventKind::Maul => Some("Maul"),
            EventKind::TryEvent => Some("Try"),
            EventKind::Scrum => Some("Scrum"),
            EventKind::PenaltyConceded => Some("Penalty Conceded"),
            EventKind::PenaltyWon => Some("Penalty Won"),
            EventKind::Turnover => Some("Turnover"),
            EventKind::Carry => Some("Carry"),
            EventKind::Tackle => Some("Tackle"),
            EventKind::GoalEntry => Some("22 Entry"),
            EventKind::LineoutAttacking => Some("Attacking Lineout"),
            EventKind::BreakAssist => Some("Break Assist"),
            EventKind::TryAssist => Some("Try Assist"),
            EventKind::Ruck => Some("Ruck"),
        }
    }

    /// Every kind, in extraction order.
    pub const ALL: [EventKind; 15] = [
        EventKind::Kick,
        EventKind::LineBreak,
        EventKind::Maul,
        EventKind::TryEvent,
        EventKind::Scrum,
        EventKind::PenaltyConceded,
        EventKind::PenaltyWon,
        EventKind::Turnover,
        EventKind::Carry,
        EventKind::Tackle,
        EventKind::GoalEntry,
        EventKind::LineoutAttacking,
        EventKind::BreakAssist,
        EventKind::TryAssist,
        EventKind::Ruck,
    ];
}

/// Kick style after normalization. "Box" comes from the style label; the
/// rest come from the kick descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KickStyle {
    Box,
    Territorial,
    Low,
    Bomb,
    Chip,
    CrossPitch,
}

impl KickStyle {
    /// Allowed raw spellings, lowercased. Kept sorted so validation
    /// messages list them deterministically.
    pub const ALLOWED: [&'static str; 6] =
        ["bomb", "box", "chip", "cross pitch", "low", "territorial"];

    /// Parse a trimmed, lowercased raw value.
    pub fn from_cleaned(value: &str) -> Option<Self> {
        match value {
            "box" => Some(KickStyle::Box),
            "territorial" => Some(KickStyle::Territorial),
            "low" => Some(KickStyle::Low),
            "bomb" => Some(KickStyle::Bomb),
            "chip" => Some(KickStyle::Chip),
            "cross pitch" => Some(KickStyle::CrossPitch),
            _ => None,
        }
    }
}

/// Reporting category a kick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KickCategory {
    Windy,
    Pocket,
    Ice,
    Snow,
    Wedge,
    KickPass,
}

/// Style -> category mapping. Adding a descriptor is a row here, not a
/// new branch in the extractor.
pub const KICK_CATEGORIES: [(KickStyle, KickCategory); 6] = [
    (KickStyle::Box, KickCategory::Windy),
    (KickStyle::Territorial, KickCategory::Pocket),
    (KickStyle::Low, KickCategory::Ice),
    (KickStyle::Bomb, KickCategory::Snow),
    (KickStyle::Chip, KickCategory::Wedge),
    (KickStyle::CrossPitch, KickCategory::KickPass),
];

impl KickCategory {
    pub fn for_style(style: KickStyle) -> KickCategory {
        KICK_CATEGORIES
            .iter()
            .find(|(s, _)| *s == style)
            .map(|(_, c)| *c)
            // The table covers every KickStyle variant.
            .unwrap_or(KickCategory::Windy)
    }
}

/// Rank-coloring weight assigned to a scoring maul: a maul that ends in a
/// try always displays as maximally positive, whatever its true meters.
pub const MAUL_TRY_RANK_METERS: f64 = 999.0;

/// One validated match event. Tagged by kind for the persistence and
/// rendering collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchEvent {
    Kick {
        x_start: f64,
        y_start: f64,
        x_end: f64,
        y_end: f64,
        style: KickStyle,
        category: KickCategory,
        kicker: String,
        period: String,
    },
    LineBreak {
        x: f64,
        y: f64,
        /// Phase label as tagged, e.g. "3" or "3+".
        phase: String,
        player: String,
        period: String,
    },
    Maul {
        x: f64,
        y: f64,
        /// True meters gained; feeds averages, never sentineled.
        meters_gained: f64,
        /// Rank-coloring weight; [`MAUL_TRY_RANK_METERS`] when a try was
        /// scored, otherwise equal to `meters_gained`.
        rank_meters: f64,
        try_scored: bool,
        period: String,
    },
    #[serde(rename = "try")]
    TryEvent {
        x: f64,
        y: f64,
        player: String,
        phase: f64,
        period: String,
    },
    Scrum {
        x: f64,
        y: f64,
        result: String,
        option: String,
        period: String,
    },
    PenaltyConceded {
        x: f64,
        y: f64,
        offence: String,
        player: String,
        phase: f64,
        period: String,
    },
    PenaltyWon {
        x: f64,
        y: f64,
        offence: String,
        player: String,
        phase: f64,
        period: String,
    },
    Turnover {
        x: f64,
        y: f64,
        player: String,
        phase: f64,
        descriptor: String,
        period: String,
    },
    Carry {
        x: f64,
        y: f64,
        player: String,
        phase: f64,
        outcome: String,
        period: String,
    },
    Tackle {
        x: f64,
        y: f64,
        player: String,
        phase: f64,
        contact: String,
        period: String,
    },
    GoalEntry {
        points_scored: f64,
        conversion_attempted: bool,
        period: String,
    },
    LineoutAttacking {
        x: f64,
        y: f64,
        throw_length: String,
        outcome: String,
        option: String,
        period: String,
    },
    BreakAssist {
        x: f64,
        y: f64,
        player: String,
        phase: f64,
        assist_type: String,
        period: String,
    },
    TryAssist {
        x: f64,
        y: f64,
        player: String,
        phase: f64,
        assist_type: String,
        period: String,
    },
    Ruck {
        x: f64,
        y: f64,
        phase: f64,
        speed: String,
        outcome: String,
        period: String,
    },
}

impl MatchEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            MatchEvent::Kick { .. } => EventKind::Kick,
            MatchEvent::LineBreak { .. } => EventKind::LineBreak,
            MatchEvent::Maul { .. } => EventKind::Maul,
            MatchEvent::TryEvent { .. } => EventKind::TryEvent,
            MatchEvent::Scrum { .. } => EventKind::Scrum,
            MatchEvent::PenaltyConceded { .. } => EventKind::PenaltyConceded,
            MatchEvent::PenaltyWon { .. } => EventKind::PenaltyWon,
            MatchEvent::Turnover { .. } => EventKind::Turnover,
            MatchEvent::Carry { .. } => EventKind::Carry,
            MatchEvent::Tackle { .. } => EventKind::Tackle,
            MatchEvent::GoalEntry { .. } => EventKind::GoalEntry,
            MatchEvent::LineoutAttacking { .. } => EventKind::LineoutAttacking,
            MatchEvent::BreakAssist { .. } => EventKind::BreakAssist,
            MatchEvent::TryAssist { .. } => EventKind::TryAssist,
            MatchEvent::Ruck { .. } => EventKind::Ruck,
        }
    }

    /// Match segment this event belongs to.
    pub fn period(&self) -> &str {
        match self {
            MatchEvent::Kick { period, .. }
            | MatchEvent::LineBreak { period, .. }
            | MatchEvent::Maul { period, .. }
            | MatchEvent::TryEvent { period, .. }
            | MatchEvent::Scrum { period, .. }
            | MatchEvent::PenaltyConceded { period, .. }
            | MatchEvent::PenaltyWon { period, .. }
            | MatchEvent::Turnover { period, .. }
            | MatchEvent::Carry { period, .. }
            | MatchEvent::Tackle { period, .. }
            | MatchEvent::GoalEntry { period, .. }
            | MatchEvent::LineoutAttacking { period, .. }
            | MatchEvent::BreakAssist { period, .. }
            | MatchEvent::TryAssist { period, .. }
            | MatchEvent::Ruck { period, .. } => period,
        }
    }

    /// Canonical event location, when the kind has one (a kick's origin,
    /// otherwise the tagged point). 22-entries carry no location.
    pub fn location(&self) -> Option<(f64, f64)> {
        match *self {
            MatchEvent::Kick { x_start, y_start, .. } => Some((x_start, y_start)),
            MatchEvent::LineBreak { x, y, .. }
            | MatchEvent::Maul { x, y, .. }
            | MatchEvent::TryEvent { x, y, .. }
            | MatchEvent::Scrum { x, y, .. }
            | MatchEvent::PenaltyConceded { x, y, .. }
            | MatchEvent::PenaltyWon { x, y, .. }
            | MatchEvent::Turnover { x, y, .. }
            | MatchEvent::Carry { x, y, .. }
            | MatchEvent::Tackle { x, y, .. }
            | MatchEvent::LineoutAttacking { x, y, .. }
            | MatchEvent::BreakAssist { x, y, .. }
            | MatchEvent::TryAssist { x, y, .. }
            | MatchEvent::Ruck { x, y, .. } => Some((x, y)),
            MatchEvent::GoalEntry { .. } => None,
        }
    }
}
