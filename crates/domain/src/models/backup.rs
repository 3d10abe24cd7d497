//! Rules backup document and the report produced when restoring one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rule::Rule;
use super::section::Section;

/// Format version written into every export.
pub const BACKUP_VERSION: u32 = 1;

/// Export of the rule sections and rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default = "default_version")]
    pub version: u32,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

fn default_version() -> u32 {
    BACKUP_VERSION
}

impl Backup {
    pub fn new(sections: Vec<Section>, rules: Vec<Rule>, created_at: DateTime<Utc>) -> Self {
        Self {
            version: BACKUP_VERSION,
            created_at: Some(created_at),
            sections,
            rules,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreStepKind {
    ClearSections,
    InsertSection,
    InsertRule,
}

impl RestoreStepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestoreStepKind::ClearSections => "clear_sections",
            RestoreStepKind::InsertSection => "insert_section",
            RestoreStepKind::InsertRule => "insert_rule",
        }
    }
}

impl std::fmt::Display for RestoreStepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RestoreStep {
    pub step: RestoreStepKind,
    pub target: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreStatus {
    Success,
    PartialFailure,
    Failed,
}

/// Outcome of a restore. Every step is recorded, failed or not.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RestoreReport {
    pub status: RestoreStatus,
    pub succeeded: usize,
    pub failed: usize,
    pub steps: Vec<RestoreStep>,
}

impl Default for RestoreReport {
    fn default() -> Self {
        Self {
            status: RestoreStatus::Success,
            succeeded: 0,
            failed: 0,
            steps: Vec::new(),
        }
    }
}

impl RestoreReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        step: RestoreStepKind,
        target: impl Into<String>,
        outcome: Result<(), String>,
    ) {
        let (ok, error) = match outcome {
            Ok(()) => {
                self.succeeded += 1;
                (true, None)
            }
            Err(e) => {
                self.failed += 1;
                (false, Some(e))
            }
        };
        self.steps.push(RestoreStep {
            step,
            target: target.into(),
            ok,
            error,
        });
    }

    /// Settles `status` from the recorded steps.
    pub fn finish(mut self) -> Self {
        self.status = match (self.succeeded, self.failed) {
            (_, 0) => RestoreStatus::Success,
            (0, _) => RestoreStatus::Failed,
            _ => RestoreStatus::PartialFailure,
        };
        self
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &RestoreStep> {
        self.steps.iter().filter(|s| !s.ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ok_is_success() {
        let mut report = RestoreReport::new();
        report.record(RestoreStepKind::ClearSections, "rule_sections", Ok(()));
        report.record(RestoreStepKind::InsertSection, "section 1", Ok(()));
        let report = report.finish();
        assert_eq!(report.status, RestoreStatus::Success);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn test_mixed_is_partial_failure() {
        let mut report = RestoreReport::new();
        report.record(RestoreStepKind::ClearSections, "rule_sections", Ok(()));
        report.record(
            RestoreStepKind::InsertRule,
            "rule 7",
            Err("duplicate key".into()),
        );
        report.record(RestoreStepKind::InsertRule, "rule 8", Ok(()));
        let report = report.finish();
        assert_eq!(report.status, RestoreStatus::PartialFailure);
        let failed: Vec<_> = report.failed_steps().map(|s| s.target.as_str()).collect();
        assert_eq!(failed, vec!["rule 7"]);
    }

    #[test]
    fn test_nothing_ok_is_failed() {
        let mut report = RestoreReport::new();
        report.record(RestoreStepKind::ClearSections, "rule_sections", Err("down".into()));
        assert_eq!(report.finish().status, RestoreStatus::Failed);
    }

    #[test]
    fn test_report_serialization() {
        let mut report = RestoreReport::new();
        report.record(RestoreStepKind::InsertRule, "rule 1", Err("boom".into()));
        report.record(RestoreStepKind::InsertRule, "rule 2", Ok(()));
        let json = serde_json::to_value(report.finish()).unwrap();
        assert_eq!(json["status"], "partial_failure");
        assert_eq!(json["steps"][0]["step"], "insert_rule");
        assert_eq!(json["steps"][0]["error"], "boom");
        assert!(json["steps"][1].get("error").is_none());
    }

    #[test]
    fn test_backup_accepts_missing_lists() {
        let backup: Backup = serde_json::from_str(r#"{"createdAt":null}"#).unwrap();
        assert_eq!(backup.version, BACKUP_VERSION);
        assert!(backup.sections.is_empty());
        assert!(backup.rules.is_empty());
    }
}
