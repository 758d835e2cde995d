//! Per-match supplemental statistics.
//!
//! Everything here works over already-validated events of a single team's
//! match document. Counts and splits are returned as explicit values; no
//! accumulator state survives between calls.

use std::collections::BTreeMap;

use crate::models::events::MatchEvent;
use crate::pitch::OPPOSITION_22_X;

/// Appearance count for one player within one event kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerTally {
    pub player: String,
    pub count: usize,
}

/// Per-kicker kick counts, descending, ties in first-appearance order.
pub fn kick_tallies(kicks: &[MatchEvent]) -> Vec<PlayerTally> {
    tally(kicks, |event| match event {
        MatchEvent::Kick { kicker, .. } => Some(kicker.as_str()),
        _ => None,
    })
}

/// Kickers whose count exceeds the median count.
pub fn main_kickers(kicks: &[MatchEvent]) -> Vec<String> {
    above_median(kick_tallies(kicks))
}

/// Per-player line-break counts, descending.
pub fn line_break_tallies(breaks: &[MatchEvent]) -> Vec<PlayerTally> {
    tally(breaks, |event| match event {
        MatchEvent::LineBreak { player, .. } => Some(player.as_str()),
        _ => None,
    })
}

/// Players whose line-break count exceeds the median count.
pub fn key_players(breaks: &[MatchEvent]) -> Vec<String> {
    above_median(line_break_tallies(breaks))
}

/// Line-break histogram keyed by the phase label as tagged.
pub fn line_breaks_by_phase(breaks: &[MatchEvent]) -> BTreeMap<String, usize> {
    let mut histogram = BTreeMap::new();
    for event in breaks {
        if let MatchEvent::LineBreak { phase, .. } = event {
            *histogram.entry(phase.clone()).or_insert(0) += 1;
        }
    }
    histogram
}

/// Maul effectiveness for one team's match.
#[derive(Debug, Clone, PartialEq)]
pub struct MaulSummary {
    pub count: usize,
    /// Average of true meters gained; never includes the scoring
    /// sentinel.
    pub average_meters: f64,
    /// Mauls whose rank weight sits at or above the average. A scoring
    /// maul is always counted here whatever its true meters.
    pub above_average: usize,
    pub below_average: usize,
}

pub fn maul_summary(mauls: &[MatchEvent]) -> Option<MaulSummary> {
    let rows: Vec<(f64, f64)> = mauls
        .iter()
        .filter_map(|event| match event {
            MatchEvent::Maul { meters_gained, rank_meters, .. } => {
                Some((*meters_gained, *rank_meters))
            }
            _ => None,
        })
        .collect();
    if rows.is_empty() {
        return None;
    }
    let average_meters = rows.iter().map(|(m, _)| m).sum::<f64>() / rows.len() as f64;
    let above_average = rows.iter().filter(|(_, rank)| *rank >= average_meters).count();
    Some(MaulSummary {
        count: rows.len(),
        average_meters,
        above_average,
        below_average: rows.len() - above_average,
    })
}

/// Points per 22-entry: five per converted-or-not try, three per
/// qualifying penalty goal, over all entries including empty ones.
pub fn points_per_entry(entries: &[MatchEvent]) -> Option<f64> {
    let points: Vec<f64> = entries
        .iter()
        .filter_map(|event| match event {
            MatchEvent::GoalEntry { points_scored, .. } => Some(*points_scored),
            _ => None,
        })
        .collect();
    if points.is_empty() {
        return None;
    }
    let tries = points.iter().filter(|p| **p >= 5.0).count() as f64;
    let penalty_goals = points.iter().filter(|p| **p == 3.0).count() as f64;
    Some((5.0 * tries + 3.0 * penalty_goals) / points.len() as f64)
}

/// Average ruck speed inside the opposition 22, read from the leading
/// number of the speed label (e.g. "3 secs", "1-3"). Rucks outside the
/// zone or with no leading number are excluded.
pub fn in_22_ruck_speed(rucks: &[MatchEvent]) -> Option<f64> {
    let speeds: Vec<f64> = rucks
        .iter()
        .filter_map(|event| match event {
            MatchEvent::Ruck { x, speed, .. } if *x >= OPPOSITION_22_X => {
                leading_number(speed)
            }
            _ => None,
        })
        .collect();
    if speeds.is_empty() {
        return None;
    }
    Some(speeds.iter().sum::<f64>() / speeds.len() as f64)
}

fn leading_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    trimmed[..end].parse().ok()
}

fn tally<'a>(
    events: &'a [MatchEvent],
    player_of: impl Fn(&'a MatchEvent) -> Option<&'a str>,
) -> Vec<PlayerTally> {
    let mut tallies: Vec<PlayerTally> = Vec::new();
    for event in events {
        let Some(player) = player_of(event) else { continue };
        match tallies.iter_mut().find(|t| t.player == player) {
            Some(t) => t.count += 1,
            None => tallies.push(PlayerTally { player: player.to_string(), count: 1 }),
        }
    }
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies
}

/// Players strictly above the median count.
fn above_median(tallies: Vec<PlayerTally>) -> Vec<String> {
    if tallies.is_empty() {
        return Vec::new();
    }
    let mut counts: Vec<usize> = tallies.iter().map(|t| t.count).collect();
    counts.sort_unstable();
    let mid = counts.len() / 2;
    let median = if counts.len() % 2 == 1 {
        counts[mid] as f64
    } else {
        (counts[mid - 1] + counts[mid]) as f64 / 2.0
    };
    tallies
        .into_iter()
        .filter(|t| t.count as f64 > median)
        .map(|t| t.player)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::events::MAUL_TRY_RANK_METERS;

    fn kick(kicker: &str) -> MatchEvent {
        MatchEvent::Kick {
            x_start: 70.0,
            y_start: 34.0,
            x_end: 110.0,
            y_end: 34.0,
            style: crate::models::KickStyle::Bomb,
            category: crate::models::KickCategory::Snow,
            kicker: kicker.into(),
            period: "1st Half".into(),
        }
    }

    fn line_break(player: &str, phase: &str) -> MatchEvent {
        MatchEvent::LineBreak {
            x: 80.0,
            y: 30.0,
            phase: phase.into(),
            player: player.into(),
            period: "1st Half".into(),
        }
    }

    fn maul(meters: f64, try_scored: bool) -> MatchEvent {
        MatchEvent::Maul {
            x: 95.0,
            y: 20.0,
            meters_gained: meters,
            rank_meters: if try_scored { MAUL_TRY_RANK_METERS } else { meters },
            try_scored,
            period: "2nd Half".into(),
        }
    }

    fn entry(points: f64) -> MatchEvent {
        MatchEvent::GoalEntry {
            points_scored: points,
            conversion_attempted: false,
            period: "1st Half".into(),
        }
    }

    fn ruck(x: f64, speed: &str) -> MatchEvent {
        MatchEvent::Ruck {
            x,
            y: 30.0,
            phase: 2.0,
            speed: speed.into(),
            outcome: "Won".into(),
            period: "1st Half".into(),
        }
    }

    #[test]
    fn main_kickers_exceed_the_median() {
        let kicks = vec![kick("A"), kick("A"), kick("A"), kick("B"), kick("C")];
        // Counts 3, 1, 1; median 1; only A exceeds it.
        assert_eq!(main_kickers(&kicks), vec!["A"]);
    }

    #[test]
    fn even_tally_count_uses_interpolated_median() {
        let kicks = vec![kick("A"), kick("A"), kick("A"), kick("B"), kick("B"), kick("C"), kick("D")];
        // Counts 3, 2, 1, 1; median 1.5; A and B exceed it.
        assert_eq!(main_kickers(&kicks), vec!["A", "B"]);
    }

    #[test]
    fn everyone_equal_means_no_key_players() {
        let breaks = vec![line_break("A", "1"), line_break("B", "2")];
        assert!(key_players(&breaks).is_empty());
    }

    #[test]
    fn phase_histogram_counts_labels_as_tagged() {
        let breaks = vec![
            line_break("A", "1"),
            line_break("B", "3+"),
            line_break("C", "3+"),
        ];
        let histogram = line_breaks_by_phase(&breaks);
        assert_eq!(histogram.get("1"), Some(&1));
        assert_eq!(histogram.get("3+"), Some(&2));
    }

    #[test]
    fn scoring_maul_is_always_above_average() {
        // True meters 2, 10, 0(try); average 4; ranks 2, 10, 999.
        let mauls = vec![maul(2.0, false), maul(10.0, false), maul(0.0, true)];
        let summary = maul_summary(&mauls).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average_meters, 4.0);
        assert_eq!(summary.above_average, 2);
        assert_eq!(summary.below_average, 1);
    }

    #[test]
    fn no_mauls_means_no_summary() {
        assert_eq!(maul_summary(&[]), None);
    }

    #[test]
    fn points_per_entry_weights_tries_and_penalty_goals() {
        // A try, a penalty goal, and an empty entry.
        let entries = vec![entry(5.0), entry(3.0), entry(0.0)];
        assert_eq!(points_per_entry(&entries), Some(8.0 / 3.0));
        assert_eq!(points_per_entry(&[]), None);
    }

    #[test]
    fn in_22_ruck_speed_filters_by_zone_and_parses_leading_number() {
        let rucks = vec![
            ruck(100.0, "3 secs"),
            ruck(120.0, "1-3"),
            ruck(50.0, "6 secs"),    // outside the 22
            ruck(110.0, "unknown"),  // no leading number
        ];
        assert_eq!(in_22_ruck_speed(&rucks), Some(2.0));
        assert_eq!(in_22_ruck_speed(&[ruck(50.0, "3")]), None);
    }
}
