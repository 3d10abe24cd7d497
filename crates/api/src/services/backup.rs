//! Export and restore of rule sections and rules.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use domain::models::backup::BACKUP_VERSION;
use domain::models::{
    sort_rules, sort_sections, Backup, RestoreReport, RestoreStepKind, Rule, Section,
    SectionScope,
};
use persistence::entities::{NewRuleRow, NewSectionRow};
use persistence::repositories::{RuleRepository, SectionRepository};
use persistence::{DataError, Databases};

use crate::error::ApiError;

/// Snapshot of every rule section and rule, read concurrently.
pub async fn export(databases: &Databases, now: DateTime<Utc>) -> Result<Backup, ApiError> {
    let sections = SectionRepository::new(databases.main.clone(), SectionScope::Rules);
    let rules = RuleRepository::new(databases.main.clone());

    let (sections, rules) = tokio::try_join!(sections.list(), rules.list())?;

    let mut sections: Vec<Section> = sections.into_iter().map(Section::from).collect();
    let mut rules: Vec<Rule> = rules.into_iter().map(Rule::from).collect();
    sort_sections(&mut sections);
    sort_rules(&mut rules);

    Ok(Backup::new(sections, rules, now))
}

/// Replaces rule sections with the backup's, then writes its rules.
///
/// Steps run in order: clear sections, write each section, write each rule.
/// Every step is attempted even after a failure and nothing is rolled back;
/// the report lists each outcome. A write that stores no row counts as failed.
pub async fn restore(databases: &Databases, backup: &Backup) -> Result<RestoreReport, ApiError> {
    if backup.version > BACKUP_VERSION {
        return Err(ApiError::BadRequest(format!(
            "Unsupported backup version {} (newest supported is {})",
            backup.version, BACKUP_VERSION
        )));
    }

    let sections = SectionRepository::new(databases.main.clone(), SectionScope::Rules);
    let rules = RuleRepository::new(databases.main.clone());
    let mut report = RestoreReport::new();

    let cleared = if databases.main.is_configured() {
        sections.delete_all().await
    } else {
        Err(DataError::NotConfigured)
    };
    if let Ok(deleted) = &cleared {
        info!(deleted, "Cleared rule sections before restore");
    }
    report.record(
        RestoreStepKind::ClearSections,
        "rule_sections",
        cleared.map(|_| ()).map_err(|e| e.to_string()),
    );

    for section in &backup.sections {
        let outcome = written(sections.upsert(&NewSectionRow::from(section)).await);
        report.record(
            RestoreStepKind::InsertSection,
            format!("section {}", section.id),
            outcome,
        );
    }

    for rule in &backup.rules {
        let outcome = written(rules.upsert(&NewRuleRow::from(rule)).await);
        report.record(RestoreStepKind::InsertRule, format!("rule {}", rule.id), outcome);
    }

    let report = report.finish();
    for step in report.failed_steps() {
        warn!(
            step = %step.step,
            target = %step.target,
            error = step.error.as_deref().unwrap_or_default(),
            "Restore step failed"
        );
    }
    info!(
        status = ?report.status,
        succeeded = report.succeeded,
        failed = report.failed,
        "Restore finished"
    );

    Ok(report)
}

/// An upsert that echoes no row wrote nothing, e.g. against an unconfigured
/// database.
fn written(outcome: Result<usize, DataError>) -> Result<(), String> {
    match outcome {
        Ok(0) => Err("no row written".to_string()),
        Ok(_) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}
