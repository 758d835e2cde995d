//! Raw match-export tree as produced by the upstream tracking tool.
//!
//! The export is weakly typed: every tagged event is an "instance" node
//! with a free-text code and a flat list of grouped label annotations.
//! Nothing about the shape is guaranteed beyond what is modeled here, and
//! duplicate label groups do occur, so lookups are positional
//! (first match wins).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// One tagged event record in the export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    /// Event label, e.g. "Chicago Hounds Kick".
    pub code: String,
    /// Grouped key-value annotations (player, coordinates, descriptors).
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// A grouped annotation attached to an instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Label {
    pub group: String,
    pub text: String,
}

/// Session metadata block; the first whitespace token of `start_time` is
/// the match date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionInfo {
    pub start_time: String,
}

/// A whole match export: session metadata plus the instance list in
/// document order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchExport {
    #[serde(default)]
    pub session_info: Option<SessionInfo>,
    #[serde(default)]
    pub instances: Vec<Instance>,
}

impl Instance {
    /// First label text for the given group, if any. The tree can carry
    /// duplicate groups; the first one in document order is authoritative.
    pub fn label(&self, group: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.group == group)
            .map(|l| l.text.as_str())
    }

    /// Whether the instance carries a label with this exact group and text.
    pub fn has_label(&self, group: &str, text: &str) -> bool {
        self.labels.iter().any(|l| l.group == group && l.text == text)
    }
}

impl MatchExport {
    /// Deserialize an export document. Failure is the file-fatal
    /// [`ExtractError::Parse`].
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Instances whose code matches exactly, in document order.
    pub fn instances_with_code<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a Instance> + 'a {
        self.instances.iter().filter(move |i| i.code == code)
    }

    /// Instances whose code contains the given fragment, in document order.
    pub fn instances_with_code_containing<'a>(
        &'a self,
        fragment: &'a str,
    ) -> impl Iterator<Item = &'a Instance> + 'a {
        self.instances.iter().filter(move |i| i.code.contains(fragment))
    }

    /// Match date: first whitespace token of the session start time.
    /// An absent or unparseable token leaves the document undated.
    pub fn date(&self) -> Option<NaiveDate> {
        self.session_info
            .as_ref()
            .and_then(|s| s.start_time.split_whitespace().next())
            .and_then(|token| NaiveDate::parse_from_str(token, "%Y-%m-%d").ok())
    }
}
