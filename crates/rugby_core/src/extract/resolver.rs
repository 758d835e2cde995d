//! Team-name discovery.
//!
//! The export never states the two participating teams directly; their
//! names only appear as prefixes of event codes. Restart kicks and
//! receptions are the one pair of event families where both sides are
//! guaranteed to show up early, so the resolver scans those in document
//! order until it has two distinct names.

use crate::error::ExtractError;
use crate::models::MatchExport;

const RESTART_KICK: &str = "Restart Kick";
const RESTART_RECEPTION: &str = "Restart Reception";

/// Strip the trailing two tokens (the event-kind suffix, e.g.
/// "Restart Kick") from a node code, leaving the team name.
fn team_from_code(code: &str) -> Option<String> {
    let tokens: Vec<&str> = code.split_whitespace().collect();
    if tokens.len() <= 2 {
        return None;
    }
    Some(tokens[..tokens.len() - 2].join(" "))
}

/// Discover the two participating team names.
///
/// Kicking and receiving sides are interleaved so the scan terminates as
/// soon as both names have been seen. A file with fewer than two distinct
/// names in its restart labels (including a file with no restart nodes at
/// all) cannot be extracted and fails with
/// [`ExtractError::Resolution`].
pub fn resolve_teams(export: &MatchExport) -> Result<(String, String), ExtractError> {
    let kicks: Vec<&str> = export
        .instances_with_code_containing(RESTART_KICK)
        .map(|i| i.code.as_str())
        .collect();
    let receptions: Vec<&str> = export
        .instances_with_code_containing(RESTART_RECEPTION)
        .map(|i| i.code.as_str())
        .collect();

    let mut teams: Vec<String> = Vec::with_capacity(2);
    for i in 0..kicks.len().max(receptions.len()) {
        if teams.len() >= 2 {
            break;
        }
        for code in [kicks.get(i), receptions.get(i)].into_iter().flatten() {
            if let Some(team) = team_from_code(code) {
                if !teams.contains(&team) {
                    teams.push(team);
                }
            }
        }
    }

    match teams.len() {
        2 => {
            let second = teams.pop().unwrap_or_default();
            let first = teams.pop().unwrap_or_default();
            Ok((first, second))
        }
        1 => Err(ExtractError::Resolution(format!(
            "only one team name found in restart labels: {}",
            teams[0]
        ))),
        _ => Err(ExtractError::Resolution(
            "no restart kick/reception labels present".to_string(),
        )),
    }
}
