//! Report Builder Library
//!
//! Weekly batch: folder of match exports -> per-team match documents.
//! Outlier report: season workbook -> league outlier stats for one team.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use rugby_core::analysis::{find_outliers, OutlierReport};
use rugby_core::models::Workbook;
use rugby_core::{run_batch, MatchDocument};

/// What a weekly run produced, for the CLI banner.
#[derive(Debug)]
pub struct WeeklySummary {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub documents_written: usize,
    pub events_skipped: usize,
    pub skipped_files: Vec<(PathBuf, String)>,
}

/// Run the weekly extraction batch over `dir` and write one document per
/// team per match into `out` (defaults to `dir`).
pub fn run_weekly(dir: &Path, out: Option<&Path>) -> Result<WeeklySummary> {
    let out_dir = out.unwrap_or(dir);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let report = run_batch(dir)
        .with_context(|| format!("Failed to run weekly batch over: {}", dir.display()))?;

    let mut documents_written = 0;
    for document in &report.documents {
        let path = out_dir.join(document_file_name(document));
        let json = serde_json::to_string_pretty(document)
            .context("Failed to serialize match document")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write document: {}", path.display()))?;
        documents_written += 1;
    }

    Ok(WeeklySummary {
        files_processed: report.files_processed,
        files_skipped: report.skipped_files.len(),
        documents_written,
        events_skipped: report.events_skipped,
        skipped_files: report
            .skipped_files
            .into_iter()
            .map(|d| (d.path, d.error.to_string()))
            .collect(),
    })
}

/// Load the season workbook and run the outlier scan for one team,
/// optionally writing the report as JSON.
pub fn run_outliers(workbook: &Path, team: &str, out: Option<&Path>) -> Result<OutlierReport> {
    let json = fs::read_to_string(workbook)
        .with_context(|| format!("Failed to read workbook: {}", workbook.display()))?;
    let workbook = Workbook::from_json(&json).context("Failed to parse workbook JSON")?;

    let report = find_outliers(&workbook, team);

    if let Some(out_path) = out {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize outlier report")?;
        fs::write(out_path, json)
            .with_context(|| format!("Failed to write report: {}", out_path.display()))?;
    }

    Ok(report)
}

/// `{date}_{team}_vs_{opposition}.json`, with path-hostile characters in
/// names replaced.
fn document_file_name(document: &MatchDocument) -> String {
    let date = document
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "undated".to_string());
    format!(
        "{}_{}_vs_{}.json",
        sanitize(&date),
        sanitize(&document.team),
        sanitize(&document.opposition)
    )
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{
        "session_info": { "start_time": "2025-03-02 19:30" },
        "instances": [
            { "code": "Foo Restart Kick", "labels": [] },
            { "code": "Bar Restart Reception", "labels": [] },
            { "code": "Foo Kick", "labels": [
                { "group": "X_Start", "text": "50" },
                { "group": "Y_Start", "text": "20" },
                { "group": "X_End", "text": "90" },
                { "group": "Y_End", "text": "30" },
                { "group": "Kick Style", "text": "Regular" },
                { "group": "Kick Descriptor", "text": "Territorial" },
                { "group": "Player", "text": "J. Boot" },
                { "group": "Period", "text": "1st Half" }
            ] }
        ]
    }"#;

    #[test]
    fn weekly_writes_one_document_per_team() {
        let dir = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("match.json"), EXPORT).unwrap();

        let summary = run_weekly(dir.path(), Some(out.path())).unwrap();
        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.documents_written, 2);
        assert_eq!(summary.files_skipped, 0);

        let foo = out.path().join("2025-03-02_Foo_vs_Bar.json");
        let document: MatchDocument =
            serde_json::from_str(&fs::read_to_string(foo).unwrap()).unwrap();
        assert_eq!(document.team, "Foo");
        assert_eq!(document.total_events(), 1);
        assert!(out.path().join("2025-03-02_Bar_vs_Foo.json").exists());
    }

    #[test]
    fn weekly_reports_broken_files_without_failing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{broken").unwrap();

        let summary = run_weekly(dir.path(), None).unwrap();
        assert_eq!(summary.files_processed, 0);
        assert_eq!(summary.files_skipped, 1);
        assert!(summary.skipped_files[0].1.contains("malformed"));
    }

    #[test]
    fn outliers_round_trip_through_the_out_file() {
        let dir = tempfile::tempdir().unwrap();
        let workbook_path = dir.path().join("season.json");
        let out_path = dir.path().join("report.json");
        // One scanned single-block sheet with the tracked team on top.
        let workbook = r#"{ "sheets": [ { "name": "Kicks", "rows": [
            ["Kicking", null, null],
            [null, null, null],
            [null, null, null],
            [null, "Kicks Made", "Kick Errors"],
            ["Foo", 40.0, 1.0],
            ["Bar", 22.0, 5.0],
            ["Baz", 18.0, 4.0],
            ["Qux", 30.0, 2.0]
        ] } ] }"#;
        fs::write(&workbook_path, workbook).unwrap();

        let report = run_outliers(&workbook_path, "Foo", Some(&out_path)).unwrap();
        assert!(!report.outliers.is_empty());
        assert_eq!(report.outliers[0].rank, 1);

        let written: OutlierReport =
            serde_json::from_str(&fs::read_to_string(out_path).unwrap()).unwrap();
        assert_eq!(written.outliers.len(), report.outliers.len());
    }

    #[test]
    fn file_names_are_path_safe() {
        let document = MatchDocument::new(
            chrono::NaiveDate::from_ymd_opt(2025, 3, 2),
            "Foo/Bar FC".into(),
            "A B".into(),
        );
        assert_eq!(document_file_name(&document), "2025-03-02_Foo_Bar_FC_vs_A_B.json");
    }
}
