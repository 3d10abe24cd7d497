//! Rule sections with their rules.

use tokio::task::JoinSet;

use domain::models::{sort_rules, sort_sections, Rule, Section, SectionScope, SectionWithRules};
use domain::services::sections_with_rules;
use persistence::repositories::{RuleRepository, SectionRepository};
use persistence::{DataError, Databases};

use crate::error::ApiError;

/// Loads every rule section, then each section's rules concurrently.
///
/// Sections come back by `order_index` and keep an empty `rules` list when
/// they have none. The first failing fetch fails the whole call.
pub async fn load_sections_with_rules(
    databases: &Databases,
) -> Result<Vec<SectionWithRules>, ApiError> {
    let mut sections: Vec<Section> =
        SectionRepository::new(databases.main.clone(), SectionScope::Rules)
            .list()
            .await?
            .into_iter()
            .map(Section::from)
            .collect();
    sort_sections(&mut sections);

    let mut fetches = JoinSet::new();
    for section in &sections {
        let repo = RuleRepository::new(databases.main.clone());
        let section_id = section.id;
        fetches.spawn(async move { repo.list_by_section(section_id).await });
    }

    let mut rules: Vec<Rule> = Vec::new();
    while let Some(joined) = fetches.join_next().await {
        let batch: Result<_, DataError> =
            joined.map_err(|e| ApiError::Internal(format!("rule fetch task failed: {}", e)))?;
        rules.extend(batch?.into_iter().map(Rule::from));
    }
    sort_rules(&mut rules);

    Ok(sections_with_rules(sections, rules))
}

/// Rules of one section, `[]` for a section without rules.
pub async fn load_rules_for_section(
    databases: &Databases,
    section_id: i64,
) -> Result<Vec<Rule>, ApiError> {
    let mut rules: Vec<Rule> = RuleRepository::new(databases.main.clone())
        .list_by_section(section_id)
        .await?
        .into_iter()
        .map(Rule::from)
        .collect();
    sort_rules(&mut rules);
    Ok(rules)
}
