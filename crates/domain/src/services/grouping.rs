//! Groups items under the sections they belong to.

use std::collections::HashMap;

use crate::models::{Rule, Section, SectionWithRules};

/// Items bucketed by section, in the order `sections` is given.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouped<S, T> {
    pub groups: Vec<(S, Vec<T>)>,
    /// Items with no section, or whose section is not in the list.
    pub unassigned: Vec<T>,
}

/// Buckets `items` by section. Item order within a bucket is preserved.
pub fn group_by_section<S, T>(
    sections: Vec<S>,
    items: Vec<T>,
    section_key: impl Fn(&S) -> i64,
    item_section: impl Fn(&T) -> Option<i64>,
) -> Grouped<S, T> {
    let positions: HashMap<i64, usize> = sections
        .iter()
        .enumerate()
        .map(|(pos, s)| (section_key(s), pos))
        .collect();

    let mut buckets: Vec<Vec<T>> = sections.iter().map(|_| Vec::new()).collect();
    let mut unassigned = Vec::new();

    for item in items {
        match item_section(&item).and_then(|id| positions.get(&id)) {
            Some(&pos) => buckets[pos].push(item),
            None => unassigned.push(item),
        }
    }

    Grouped {
        groups: sections.into_iter().zip(buckets).collect(),
        unassigned,
    }
}

/// Rule sections with their rules. Sections keep their given order; a
/// section without rules is kept with an empty list.
pub fn sections_with_rules(sections: Vec<Section>, rules: Vec<Rule>) -> Vec<SectionWithRules> {
    group_by_section(sections, rules, |s| s.id, |r| r.section_id)
        .groups
        .into_iter()
        .map(|(section, rules)| SectionWithRules { section, rules })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: i64) -> Section {
        Section {
            id,
            title: format!("Sezione {}", id),
            description: None,
            icon: None,
            order_index: id as i32,
            created_by: None,
        }
    }

    fn rule(id: i64, section_id: Option<i64>) -> Rule {
        Rule {
            id,
            section_id,
            title: format!("Regola {}", id),
            content: String::new(),
            order_index: 0,
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_group_preserves_section_and_item_order() {
        let grouped = group_by_section(
            vec![section(2), section(1)],
            vec![rule(1, Some(1)), rule(2, Some(2)), rule(3, Some(1))],
            |s| s.id,
            |r| r.section_id,
        );
        let shape: Vec<(i64, Vec<i64>)> = grouped
            .groups
            .iter()
            .map(|(s, rules)| (s.id, rules.iter().map(|r| r.id).collect()))
            .collect();
        assert_eq!(shape, vec![(2, vec![2]), (1, vec![1, 3])]);
        assert!(grouped.unassigned.is_empty());
    }

    #[test]
    fn test_orphans_are_unassigned() {
        let grouped = group_by_section(
            vec![section(1)],
            vec![rule(1, None), rule(2, Some(99)), rule(3, Some(1))],
            |s| s.id,
            |r| r.section_id,
        );
        let orphan_ids: Vec<i64> = grouped.unassigned.iter().map(|r| r.id).collect();
        assert_eq!(orphan_ids, vec![1, 2]);
    }

    #[test]
    fn test_sections_with_rules_keeps_empty_sections() {
        let result = sections_with_rules(vec![section(1), section(2)], vec![rule(1, Some(1))]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].rules.len(), 1);
        assert!(result[1].rules.is_empty());
    }
}
