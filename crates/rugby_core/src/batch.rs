//! Weekly batch extraction over a folder of match exports.
//!
//! Files are independent of each other, so the batch runs them in
//! parallel. Failure isolation is strict: a bad event node costs that
//! node, a bad file costs that file, and the batch always finishes with
//! a report of what was dropped.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::ExtractError;
use crate::extract::{extract_all, resolve_teams};
use crate::models::{MatchDocument, MatchExport};

/// Why one file was dropped from the batch.
#[derive(Debug)]
pub struct FileDiagnostic {
    pub path: PathBuf,
    pub error: ExtractError,
}

/// Outcome of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Two documents per processed file, one per team.
    pub documents: Vec<MatchDocument>,
    pub files_processed: usize,
    pub skipped_files: Vec<FileDiagnostic>,
    /// Event nodes dropped by validation across all processed files.
    pub events_skipped: usize,
}

/// Extract one export given as a JSON string: parse, resolve the two
/// teams, extract every kind, and assemble the per-team documents.
pub fn process_export_str(json: &str) -> Result<([MatchDocument; 2], usize), ExtractError> {
    let export = MatchExport::from_json(json)?;
    let (team_a, team_b) = resolve_teams(&export)?;
    let extraction = extract_all(&export, &team_a, &team_b);
    let skipped = extraction.skipped;
    Ok((extraction.into_documents(export.date()), skipped))
}

fn process_file(path: &Path) -> Result<([MatchDocument; 2], usize), ExtractError> {
    let json = fs::read_to_string(path)?;
    process_export_str(&json)
}

/// Run the weekly batch over every `*.json` export in `dir`.
///
/// Only listing the directory is fatal; every per-file failure lands in
/// [`BatchReport::skipped_files`] instead.
pub fn run_batch(dir: &Path) -> Result<BatchReport, ExtractError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    info!(files = paths.len(), dir = %dir.display(), "starting weekly batch");

    let outcomes: Vec<(PathBuf, Result<([MatchDocument; 2], usize), ExtractError>)> = paths
        .into_par_iter()
        .map(|path| {
            let outcome = process_file(&path);
            (path, outcome)
        })
        .collect();

    let mut report = BatchReport::default();
    for (path, outcome) in outcomes {
        match outcome {
            Ok((documents, skipped)) => {
                report.documents.extend(documents);
                report.files_processed += 1;
                report.events_skipped += skipped;
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping export file");
                report.skipped_files.push(FileDiagnostic { path, error });
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventKind;

    fn export_json(team_a: &str, team_b: &str, extra_instances: &str) -> String {
        format!(
            r#"{{
              "session_info": {{ "start_time": "2025-03-02 19:30" }},
              "instances": [
                {{ "code": "{team_a} Restart Kick", "labels": [] }},
                {{ "code": "{team_b} Restart Reception", "labels": [] }}
                {extra_instances}
              ]
            }}"#
        )
    }

    const FOO_KICK: &str = r#",
        { "code": "Foo Kick", "labels": [
            { "group": "X_Start", "text": "50" },
            { "group": "Y_Start", "text": "20" },
            { "group": "X_End", "text": "90" },
            { "group": "Y_End", "text": "30" },
            { "group": "Kick Style", "text": "Regular" },
            { "group": "Kick Descriptor", "text": "Territorial" },
            { "group": "Player", "text": "J. Boot" },
            { "group": "Period", "text": "1st Half" }
        ] }"#;

    #[test]
    fn export_string_becomes_two_dated_documents() {
        let json = export_json("Foo", "Bar", FOO_KICK);
        let ([doc_a, doc_b], skipped) = process_export_str(&json).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(doc_a.team, "Foo");
        assert_eq!(doc_a.date, chrono::NaiveDate::from_ymd_opt(2025, 3, 2));
        assert_eq!(doc_a.events_of(EventKind::Kick).len(), 1);
        assert_eq!(doc_b.team, "Bar");
        assert!(doc_b.events_of(EventKind::Kick).is_empty());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = process_export_str("{not json").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn export_without_restarts_is_a_resolution_error() {
        let json = r#"{ "instances": [ { "code": "Foo Kick", "labels": [] } ] }"#;
        let err = process_export_str(json).unwrap_err();
        assert!(matches!(err, ExtractError::Resolution(_)));
    }

    #[test]
    fn batch_survives_a_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.json"), export_json("Foo", "Bar", FOO_KICK)).unwrap();
        fs::write(dir.path().join("bad.json"), "{broken").unwrap();
        fs::write(dir.path().join("ignored.txt"), "not an export").unwrap();

        let report = run_batch(dir.path()).unwrap();
        assert_eq!(report.files_processed, 1);
        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.skipped_files.len(), 1);
        assert!(report.skipped_files[0].path.ends_with("bad.json"));
    }

    #[test]
    fn event_skips_are_summed_across_the_batch() {
        let bad_kick = r#",
            { "code": "Foo Kick", "labels": [
                { "group": "X_Start", "text": "fast" },
                { "group": "Kick Style", "text": "Regular" },
                { "group": "Kick Descriptor", "text": "Bomb" }
            ] }"#;
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("match.json"), export_json("Foo", "Bar", bad_kick)).unwrap();

        let report = run_batch(dir.path()).unwrap();
        assert_eq!(report.files_processed, 1);
        assert_eq!(report.events_skipped, 1);
    }
}
