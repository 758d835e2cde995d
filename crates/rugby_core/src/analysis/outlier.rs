//! Cross-team rank and outlier analysis over the season workbook.
//!
//! Every scanned column is ranked descending across the league; the
//! tracked team is reported when it sits in the top or bottom three.
//! Columns whose value distribution carries no information (everyone
//! equal, or a two-value split where the tracked team sits with the
//! majority) are rejected as degenerate rather than reported as noise.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::table::{StatBlock, Workbook};

/// Sheets carrying both a team-perspective and an opposition-facing block.
pub const PAIRED_SHEETS: [&str; 5] = [
    "Teams Average",
    "Lineouts",
    "Restarts",
    "22m Entries",
    "Tries Overview",
];

/// Sheets carrying only the team-perspective block.
pub const SINGLE_SHEETS: [&str; 8] = [
    "Kicks",
    "Turnover Won",
    "Turnover Con",
    "Penalties",
    "Tackles",
    "Carries",
    "Ruck Entries",
    "Rucks",
];

/// Count-style columns that are near-constant league-wide and would
/// flood the report with false outliers.
pub const IGNORED_COLUMNS: [&str; 8] = [
    "Scrums Won",
    "Scrums Lost",
    "Total Restarts",
    "Restarts Retained",
    "Num Rucks Won",
    "Num Rucks Lost",
    "Mauls Won",
    "Mauls Lost",
];

/// How many ranks at each end of the table count as an outlier.
const OUTLIER_BAND: usize = 3;

/// One column where the tracked team is a league outlier. `values` and
/// `teams` hold the full descending league ordering for context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierStat {
    pub title: String,
    pub value: f64,
    /// 1-based rank of the tracked team in descending order.
    pub rank: usize,
    pub values: Vec<f64>,
    pub teams: Vec<String>,
}

/// Outcome of evaluating one column for the tracked team.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnVerdict {
    Outlier(OutlierStat),
    MidTable,
    Degenerate,
    TeamMissing,
}

/// Everything the workbook scan produced for one team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlierReport {
    pub outliers: Vec<OutlierStat>,
    /// Every column that was evaluated, degenerate or not, as
    /// `"{block title} / {column}"`.
    pub covered: Vec<String>,
    /// Listed sheets absent from the workbook.
    pub missing_sheets: Vec<String>,
}

/// Rank one column and decide whether the tracked team is an outlier.
///
/// The sort is stable and descending, so teams tied on value keep their
/// workbook order and the rank of the tracked team is reproducible.
pub fn evaluate_column(title: &str, entries: &[(String, f64)], tracked: &str) -> ColumnVerdict {
    let Some(tracked_value) = entries
        .iter()
        .find(|(team, _)| team == tracked)
        .map(|(_, v)| *v)
    else {
        return ColumnVerdict::TeamMissing;
    };

    let mut ordered: Vec<(String, f64)> = entries.to_vec();
    ordered.sort_by(|a, b| b.1.total_cmp(&a.1));

    if is_degenerate(&ordered, tracked_value) {
        return ColumnVerdict::Degenerate;
    }

    let rank = ordered
        .iter()
        .position(|(team, _)| team == tracked)
        .map(|i| i + 1)
        .unwrap_or(ordered.len());
    let count = ordered.len();
    if rank > OUTLIER_BAND && rank + OUTLIER_BAND <= count {
        return ColumnVerdict::MidTable;
    }

    let (teams, values) = ordered.into_iter().unzip();
    ColumnVerdict::Outlier(OutlierStat {
        title: title.to_string(),
        value: tracked_value,
        rank,
        values,
        teams,
    })
}

/// A distribution is degenerate when every team holds the same value, or
/// when only two values exist and the tracked team holds the modal one
/// (it is then with the majority, not an outlier).
fn is_degenerate(ordered: &[(String, f64)], tracked_value: f64) -> bool {
    let mut distinct: Vec<f64> = Vec::new();
    for (_, v) in ordered {
        if !distinct.iter().any(|d| d == v) {
            distinct.push(*v);
        }
    }
    match distinct.len() {
        0 | 1 => true,
        2 => {
            let counts: Vec<usize> = distinct
                .iter()
                .map(|d| ordered.iter().filter(|(_, v)| v == d).count())
                .collect();
            let modal = if counts[0] >= counts[1] { distinct[0] } else { distinct[1] };
            tracked_value == modal
        }
        _ => false,
    }
}

/// Scan one statistic block for the tracked team. A title already
/// covered by an earlier sheet is evaluated only once per run.
fn scan_block(block: &StatBlock, tracked: &str, report: &mut OutlierReport) {
    for (index, column) in block.columns.iter().enumerate() {
        if column.is_empty() || IGNORED_COLUMNS.contains(&column.as_str()) {
            continue;
        }
        let title = format!("{} / {}", block.title, column);
        if report.covered.contains(&title) {
            debug!(%title, "column already covered");
            continue;
        }
        report.covered.push(title.clone());
        let entries = block.column(index);
        match evaluate_column(&title, &entries, tracked) {
            ColumnVerdict::Outlier(stat) => report.outliers.push(stat),
            verdict => debug!(%title, ?verdict, "column not reported"),
        }
    }
}

/// Scan the whole workbook for columns where `tracked` is a league
/// outlier. Sheets not listed in [`PAIRED_SHEETS`] or [`SINGLE_SHEETS`]
/// are never scanned; listed sheets absent from the workbook are noted
/// and skipped.
pub fn find_outliers(workbook: &Workbook, tracked: &str) -> OutlierReport {
    let mut report = OutlierReport::default();
    for name in PAIRED_SHEETS {
        match workbook.sheet(name) {
            Some(sheet) => {
                scan_block(&sheet.team_block(), tracked, &mut report);
                scan_block(&sheet.opposition_block(), tracked, &mut report);
            }
            None => report.missing_sheets.push(name.to_string()),
        }
    }
    for name in SINGLE_SHEETS {
        match workbook.sheet(name) {
            Some(sheet) => scan_block(&sheet.team_block(), tracked, &mut report),
            None => report.missing_sheets.push(name.to_string()),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::table::tests::paired_sheet;
    use crate::models::table::Cell;

    fn entries(rows: &[(&str, f64)]) -> Vec<(String, f64)> {
        rows.iter().map(|(t, v)| (t.to_string(), *v)).collect()
    }

    #[test]
    fn all_equal_is_degenerate() {
        let e = entries(&[("A", 10.0), ("B", 10.0), ("C", 10.0)]);
        assert_eq!(evaluate_column("t", &e, "B"), ColumnVerdict::Degenerate);
    }

    #[test]
    fn minority_of_two_value_split_is_an_outlier() {
        let e = entries(&[("A", 10.0), ("B", 10.0), ("C", 1.0)]);
        match evaluate_column("t", &e, "C") {
            ColumnVerdict::Outlier(stat) => {
                assert_eq!(stat.rank, 3);
                assert_eq!(stat.value, 1.0);
                assert_eq!(stat.values, vec![10.0, 10.0, 1.0]);
                assert_eq!(stat.teams, vec!["A", "B", "C"]);
            }
            other => panic!("expected outlier, got {other:?}"),
        }
    }

    #[test]
    fn majority_of_two_value_split_is_degenerate() {
        let e = entries(&[("A", 10.0), ("B", 10.0), ("C", 1.0)]);
        assert_eq!(evaluate_column("t", &e, "A"), ColumnVerdict::Degenerate);
    }

    #[test]
    fn middle_of_ten_distinct_values_is_mid_table() {
        let e: Vec<(String, f64)> = (0..10)
            .map(|i| (format!("T{i}"), (10 - i) as f64))
            .collect();
        // T4 holds 6.0, rank 5 of 10.
        assert_eq!(evaluate_column("t", &e, "T4"), ColumnVerdict::MidTable);
    }

    #[test]
    fn bottom_three_of_ten_is_an_outlier() {
        let e: Vec<(String, f64)> = (0..10)
            .map(|i| (format!("T{i}"), (10 - i) as f64))
            .collect();
        match evaluate_column("t", &e, "T8") {
            ColumnVerdict::Outlier(stat) => assert_eq!(stat.rank, 9),
            other => panic!("expected outlier, got {other:?}"),
        }
    }

    #[test]
    fn absent_team_is_reported_missing() {
        let e = entries(&[("A", 3.0), ("B", 2.0)]);
        assert_eq!(evaluate_column("t", &e, "Z"), ColumnVerdict::TeamMissing);
    }

    #[test]
    fn ties_keep_workbook_order() {
        let e = entries(&[("A", 5.0), ("B", 5.0), ("C", 5.0), ("D", 1.0), ("E", 2.0)]);
        match evaluate_column("t", &e, "B") {
            ColumnVerdict::Outlier(stat) => {
                assert_eq!(stat.rank, 2);
                assert_eq!(stat.teams, vec!["A", "B", "C", "E", "D"]);
            }
            other => panic!("expected outlier, got {other:?}"),
        }
    }

    #[test]
    fn ignored_columns_are_never_covered() {
        let sheet = paired_sheet(
            "Restarts",
            &["Total Restarts", "Restart Errors"],
            &[("Foo", &[12.0, 1.0]), ("Bar", &[12.0, 4.0]), ("Baz", &[11.0, 9.0])],
            &[("Foo", &[12.0, 2.0]), ("Bar", &[12.0, 3.0]), ("Baz", &[11.0, 4.0])],
        );
        let wb = Workbook { sheets: vec![sheet] };
        let report = find_outliers(&wb, "Foo");
        assert!(report.covered.iter().all(|c| !c.contains("Total Restarts")));
        assert!(report.covered.iter().any(|c| c.contains("Restart Errors")));
    }

    #[test]
    fn paired_sheets_scan_both_blocks() {
        let sheet = paired_sheet(
            "Restarts",
            &["Restart Errors"],
            &[("Foo", &[1.0]), ("Bar", &[4.0]), ("Baz", &[9.0]), ("Qux", &[6.0])],
            &[("Foo", &[8.0]), ("Bar", &[3.0]), ("Baz", &[2.0]), ("Qux", &[5.0])],
        );
        let wb = Workbook { sheets: vec![sheet] };
        let report = find_outliers(&wb, "Foo");
        assert_eq!(
            report.covered,
            vec!["Restarts For / Restart Errors", "Restarts Against / Restart Errors"]
        );
        // Foo is last in the first block and first in the second.
        let titles: Vec<&str> = report.outliers.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Restarts For / Restart Errors", "Restarts Against / Restart Errors"]
        );
        assert_eq!(report.outliers[0].rank, 4);
        assert_eq!(report.outliers[1].rank, 1);
    }

    #[test]
    fn duplicate_titles_across_sheets_are_evaluated_once() {
        // Two scanned sheets whose banner title and column collide.
        let mut first = paired_sheet(
            "Turnover Won",
            &["Count"],
            &[("Foo", &[9.0]), ("Bar", &[2.0]), ("Baz", &[4.0]), ("Qux", &[5.0])],
            &[],
        );
        first.rows[0][0] = Cell::Text("Turnovers".into());
        let mut second = paired_sheet(
            "Turnover Con",
            &["Count"],
            &[("Foo", &[1.0]), ("Bar", &[2.0]), ("Baz", &[4.0]), ("Qux", &[5.0])],
            &[],
        );
        second.rows[0][0] = Cell::Text("Turnovers".into());

        let wb = Workbook { sheets: vec![first, second] };
        let report = find_outliers(&wb, "Foo");
        assert_eq!(report.covered, vec!["Turnovers / Count"]);
        // Only the first sheet's values were ranked.
        assert_eq!(report.outliers.len(), 1);
        assert_eq!(report.outliers[0].rank, 1);
    }

    #[test]
    fn listed_but_absent_sheets_are_noted() {
        let wb = Workbook { sheets: vec![] };
        let report = find_outliers(&wb, "Foo");
        assert!(report.outliers.is_empty());
        assert_eq!(
            report.missing_sheets.len(),
            PAIRED_SHEETS.len() + SINGLE_SHEETS.len()
        );
    }

    #[test]
    fn unlisted_sheets_are_not_scanned() {
        let sheet = paired_sheet(
            "Mauls",
            &["Maul Metres"],
            &[("Foo", &[1.0]), ("Bar", &[9.0]), ("Baz", &[5.0])],
            &[],
        );
        let wb = Workbook { sheets: vec![sheet] };
        let report = find_outliers(&wb, "Foo");
        assert!(report.covered.is_empty());
        assert!(report.outliers.is_empty());
    }
}
