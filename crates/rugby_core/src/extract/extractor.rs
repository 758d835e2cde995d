//! Per-team, per-kind event extraction.
//!
//! Selection is exact: code-selected kinds match nodes labeled
//! `"{team} {suffix}"` with the team's display name spelled exactly as
//! the tracking tool spells it. Every coordinate is canonicalized the
//! moment it is read, and every field passes validation before the typed
//! event is appended. One bad node is warned about and skipped; it never
//! takes the rest of the file down with it.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::ValidationError;
use crate::models::events::{
    EventKind, KickCategory, KickStyle, MatchEvent, MAUL_TRY_RANK_METERS,
};
use crate::models::{Instance, MatchDocument, MatchExport};
use crate::pitch;
use crate::validate::FieldValidator;

// Label groups used by the tracking tool.
const G_PLAYER: &str = "Player";
const G_PERIOD: &str = "Period";
const G_PHASE: &str = "Phase Number";
const G_X_START: &str = "X_Start";
const G_Y_START: &str = "Y_Start";
const G_X_END: &str = "X_End";
const G_Y_END: &str = "Y_End";
const G_KICK_STYLE: &str = "Kick Style";
const G_KICK_DESCRIPTOR: &str = "Kick Descriptor";
const G_MAUL_METERS: &str = "Maul Metres";
const G_MAUL_OUTCOME: &str = "Maul Breakdown Outcome";
const G_SCRUM_RESULT: &str = "Scrum Result";
const G_SCRUM_OPTION: &str = "Scrum Option";
const G_OFFENCE: &str = "Offence";
const G_TURNOVER_DESCRIPTOR: &str = "Turnover Descriptor";
const G_CARRY_OUTCOME: &str = "Carry Outcome";
const G_TACKLE_CONTACT: &str = "Tackle Contact";
const G_POINTS_SCORED: &str = "Points Scored";
const G_CONVERSION_ATTEMPTED: &str = "Conversion Attempted";
const G_THROW_LENGTH: &str = "Throw Length";
const G_LINEOUT_OUTCOME: &str = "Lineout Outcome";
const G_LINEOUT_OPTION: &str = "Lineout Option";
const G_ASSIST_TYPE: &str = "Assist Type";
const G_RUCK_SPEED: &str = "Ruck Speed";
const G_RUCK_OUTCOME: &str = "Ruck Outcome";

// Line breaks are tagged by label pair, not by code.
const G_ATTACKING_QUALITIES: &str = "Attacking Qualities";
const G_ATTACKING_QUALITY: &str = "Attacking Quality";
const INITIAL_BREAK: &str = "Initial Break";

/// Raw descriptor that removes a kick from statistical consideration.
/// Domain policy, applied before validation; not an error.
const TOUCH_KICK: &str = "Touch Kick";

/// Raw style whose classification wins over any descriptor.
const BOX_STYLE: &str = "Box";

const MAUL_TRY_OUTCOME: &str = "Try Scored";

/// Validated events of one kind for one team, plus how many nodes were
/// dropped by validation failures.
#[derive(Debug, Clone, Default)]
pub struct KindEvents {
    pub events: Vec<MatchEvent>,
    pub skipped: usize,
}

/// All extracted events of one match, both teams, every kind.
#[derive(Debug, Clone)]
pub struct MatchExtraction {
    pub teams: [String; 2],
    per_team: [BTreeMap<EventKind, Vec<MatchEvent>>; 2],
    /// Nodes dropped across the whole file by validation failures.
    pub skipped: usize,
}

impl MatchExtraction {
    /// Events of one kind for one team; empty for an unknown team name.
    pub fn events(&self, team: &str, kind: EventKind) -> &[MatchEvent] {
        self.teams
            .iter()
            .position(|t| t == team)
            .and_then(|i| self.per_team[i].get(&kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Hand the extraction off as two immutable per-team documents.
    pub fn into_documents(self, date: Option<chrono::NaiveDate>) -> [MatchDocument; 2] {
        let [team_a, team_b] = self.teams;
        let [events_a, events_b] = self.per_team;
        let mut doc_a = MatchDocument::new(date.clone(), team_a.clone(), team_b.clone());
        doc_a.events = events_a;
        let mut doc_b = MatchDocument::new(date, team_b, team_a);
        doc_b.events = events_b;
        [doc_a, doc_b]
    }
}

/// Extract one event kind for both teams.
pub fn extract(
    export: &MatchExport,
    team_a: &str,
    team_b: &str,
    kind: EventKind,
) -> (KindEvents, KindEvents) {
    (
        extract_team_kind(export, team_a, kind),
        extract_team_kind(export, team_b, kind),
    )
}

/// Extract every kind for both teams in one pass over the taxonomy.
pub fn extract_all(export: &MatchExport, team_a: &str, team_b: &str) -> MatchExtraction {
    let mut per_team: [BTreeMap<EventKind, Vec<MatchEvent>>; 2] = Default::default();
    let mut skipped = 0;
    for kind in EventKind::ALL {
        for (slot, team) in [(0, team_a), (1, team_b)] {
            let extracted = extract_team_kind(export, team, kind);
            skipped += extracted.skipped;
            per_team[slot].insert(kind, extracted.events);
        }
    }
    MatchExtraction {
        teams: [team_a.to_string(), team_b.to_string()],
        per_team,
        skipped,
    }
}

/// Extract one kind for one team, preserving document order.
pub fn extract_team_kind(export: &MatchExport, team: &str, kind: EventKind) -> KindEvents {
    let mut out = KindEvents::default();
    for instance in select(export, team, kind) {
        match build_event(kind, instance) {
            Ok(Some(event)) => out.events.push(event),
            // Filtered by domain policy (e.g. touch kicks); not a failure.
            Ok(None) => {}
            Err(err) => {
                warn!(team, code = %instance.code, %err, "skipping invalid event node");
                out.skipped += 1;
            }
        }
    }
    out
}

/// Raw nodes belonging to this team and kind, in document order.
fn select<'a>(export: &'a MatchExport, team: &str, kind: EventKind) -> Vec<&'a Instance> {
    match kind.code_suffix() {
        Some(suffix) => {
            let code = format!("{team} {suffix}");
            export.instances.iter().filter(|i| i.code == code).collect()
        }
        None => export
            .instances
            .iter()
            .filter(|i| {
                i.has_label(G_ATTACKING_QUALITIES, INITIAL_BREAK)
                    && i.has_label(G_ATTACKING_QUALITY, team)
            })
            .collect(),
    }
}

/// Label reader bound to one node and one event kind; transforms raw
/// coordinates to canonical units as they are read.
struct NodeReader<'a> {
    kind: EventKind,
    v: FieldValidator,
    instance: &'a Instance,
}

impl<'a> NodeReader<'a> {
    fn new(kind: EventKind, instance: &'a Instance) -> Self {
        Self {
            kind,
            v: FieldValidator::new(kind.name()),
            instance,
        }
    }

    fn raw(&self, group: &str, field: &'static str) -> Result<&'a str, ValidationError> {
        self.instance.label(group).ok_or_else(|| {
            ValidationError::new(
                self.kind.name(),
                field,
                format!("missing '{group}' label"),
                "<missing>",
            )
        })
    }

    fn canonical_x(&self, group: &str, field: &'static str) -> Result<f64, ValidationError> {
        let raw = self.v.number(field, self.raw(group, field)?)?;
        self.v.x_coordinate(field, pitch::canonical_x(raw))
    }

    fn canonical_y(&self, group: &str, field: &'static str) -> Result<f64, ValidationError> {
        let raw = self.v.number(field, self.raw(group, field)?)?;
        self.v.y_coordinate(field, pitch::canonical_y(raw))
    }

    fn string(&self, group: &str, field: &'static str) -> Result<String, ValidationError> {
        self.v.non_empty_string(field, self.raw(group, field)?)
    }

    fn amount(&self, group: &str, field: &'static str) -> Result<f64, ValidationError> {
        self.v.non_negative_number(field, self.raw(group, field)?)
    }

    fn boolean(&self, group: &str, field: &'static str) -> Result<bool, ValidationError> {
        self.v.boolean(field, self.raw(group, field)?)
    }

    fn period(&self) -> Result<String, ValidationError> {
        self.string(G_PERIOD, "period")
    }
}

/// Build the typed event for one raw node. `Ok(None)` means the node was
/// filtered by policy before validation.
fn build_event(kind: EventKind, instance: &Instance) -> Result<Option<MatchEvent>, ValidationError> {
    let r = NodeReader::new(kind, instance);
    let event = match kind {
        EventKind::Kick => return build_kick(&r),
        EventKind::LineBreak => MatchEvent::LineBreak {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            phase: r.string(G_PHASE, "phase")?,
            player: r.string(G_PLAYER, "player")?,
            period: r.period()?,
        },
        EventKind::Maul => {
            let try_scored = r.raw(G_MAUL_OUTCOME, "try_scored")?.trim() == MAUL_TRY_OUTCOME;
            let meters_gained = r.amount(G_MAUL_METERS, "meters_gained")?;
            MatchEvent::Maul {
                x: r.canonical_x(G_X_START, "x")?,
                y: r.canonical_y(G_Y_START, "y")?,
                meters_gained,
                rank_meters: if try_scored { MAUL_TRY_RANK_METERS } else { meters_gained },
                try_scored,
                period: r.period()?,
            }
        }
        EventKind::TryEvent => MatchEvent::TryEvent {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            player: r.string(G_PLAYER, "player")?,
            phase: r.amount(G_PHASE, "phase")?,
            period: r.period()?,
        },
        EventKind::Scrum => MatchEvent::Scrum {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            result: r.string(G_SCRUM_RESULT, "result")?,
            option: r.string(G_SCRUM_OPTION, "option")?,
            period: r.period()?,
        },
        EventKind::PenaltyConceded => MatchEvent::PenaltyConceded {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            offence: r.string(G_OFFENCE, "offence")?,
            player: r.string(G_PLAYER, "player")?,
            phase: r.amount(G_PHASE, "phase")?,
            period: r.period()?,
        },
        EventKind::PenaltyWon => MatchEvent::PenaltyWon {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            offence: r.string(G_OFFENCE, "offence")?,
            player: r.string(G_PLAYER, "player")?,
            phase: r.amount(G_PHASE, "phase")?,
            period: r.period()?,
        },
        EventKind::Turnover => MatchEvent::Turnover {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            player: r.string(G_PLAYER, "player")?,
            phase: r.amount(G_PHASE, "phase")?,
            descriptor: r.string(G_TURNOVER_DESCRIPTOR, "descriptor")?,
            period: r.period()?,
        },
        EventKind::Carry => MatchEvent::Carry {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            player: r.string(G_PLAYER, "player")?,
            phase: r.amount(G_PHASE, "phase")?,
            outcome: r.string(G_CARRY_OUTCOME, "outcome")?,
            period: r.period()?,
        },
        EventKind::Tackle => MatchEvent::Tackle {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            player: r.string(G_PLAYER, "player")?,
            phase: r.amount(G_PHASE, "phase")?,
            contact: r.string(G_TACKLE_CONTACT, "contact")?,
            period: r.period()?,
        },
        EventKind::GoalEntry => MatchEvent::GoalEntry {
            points_scored: r.amount(G_POINTS_SCORED, "points_scored")?,
            conversion_attempted: r.boolean(G_CONVERSION_ATTEMPTED, "conversion_attempted")?,
            period: r.period()?,
        },
        EventKind::LineoutAttacking => MatchEvent::LineoutAttacking {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            throw_length: r.string(G_THROW_LENGTH, "throw_length")?,
            outcome: r.string(G_LINEOUT_OUTCOME, "outcome")?,
            option: r.string(G_LINEOUT_OPTION, "option")?,
            period: r.period()?,
        },
        EventKind::BreakAssist => MatchEvent::BreakAssist {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            player: r.string(G_PLAYER, "player")?,
            phase: r.amount(G_PHASE, "phase")?,
            assist_type: r.string(G_ASSIST_TYPE, "assist_type")?,
            period: r.period()?,
        },
        EventKind::TryAssist => MatchEvent::TryAssist {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            player: r.string(G_PLAYER, "player")?,
            phase: r.amount(G_PHASE, "phase")?,
            assist_type: r.string(G_ASSIST_TYPE, "assist_type")?,
            period: r.period()?,
        },
        EventKind::Ruck => MatchEvent::Ruck {
            x: r.canonical_x(G_X_START, "x")?,
            y: r.canonical_y(G_Y_START, "y")?,
            phase: r.amount(G_PHASE, "phase")?,
            speed: r.string(G_RUCK_SPEED, "speed")?,
            outcome: r.string(G_RUCK_OUTCOME, "outcome")?,
            period: r.period()?,
        },
    };
    Ok(Some(event))
}

fn build_kick(r: &NodeReader<'_>) -> Result<Option<MatchEvent>, ValidationError> {
    // Touch kicks are not kicks for statistical purposes. The filter
    // precedes validation, so an otherwise-broken touch-kick node is
    // silently dropped rather than reported.
    let descriptor = r.raw(G_KICK_DESCRIPTOR, "style")?;
    if descriptor.trim() == TOUCH_KICK {
        return Ok(None);
    }

    // A box kick is a box kick whatever its secondary descriptor says.
    let style = if r.raw(G_KICK_STYLE, "style")?.trim() == BOX_STYLE {
        KickStyle::Box
    } else {
        let cleaned = r.v.enumeration("style", descriptor, &KickStyle::ALLOWED)?;
        KickStyle::from_cleaned(&cleaned).ok_or_else(|| {
            ValidationError::new(r.kind.name(), "style", "unmapped kick style", descriptor)
        })?
    };

    Ok(Some(MatchEvent::Kick {
        x_start: r.canonical_x(G_X_START, "x_start")?,
        y_start: r.canonical_y(G_Y_START, "y_start")?,
        x_end: r.canonical_x(G_X_END, "x_end")?,
        y_end: r.canonical_y(G_Y_END, "y_end")?,
        category: KickCategory::for_style(style),
        style,
        kicker: r.string(G_PLAYER, "kicker")?,
        period: r.period()?,
    }))
}
