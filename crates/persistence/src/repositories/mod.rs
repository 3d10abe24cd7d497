//! Repository implementations for backend operations.

pub mod discount;
pub mod info;
pub mod news;
pub mod rule;
pub mod section;
pub mod store;
pub mod user;

pub use discount::DiscountRepository;
pub use info::InfoRepository;
pub use news::NewsRepository;
pub use rule::RuleRepository;
pub use section::SectionRepository;
pub use store::{PackageRepository, StoreSectionRepository};
pub use user::UserRepository;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_databases;
    use crate::entities::{NewSectionRow, SectionPatch};
    use chrono::{Duration, Utc};
    use domain::models::SectionScope;
    use serde_json::json;

    #[tokio::test]
    async fn test_section_scopes_use_separate_tables() {
        let (databases, main, _) = create_memory_databases();
        let news_sections = SectionRepository::new(databases.main.clone(), SectionScope::News);
        let rule_sections = SectionRepository::new(databases.main, SectionScope::Rules);

        let row = NewSectionRow {
            id: None,
            title: "Eventi".into(),
            description: None,
            icon: None,
            order_index: 0,
            created_by: None,
        };
        news_sections.create(&row).await.unwrap();
        assert_eq!(main.rows("sections").len(), 1);
        assert!(main.rows("rule_sections").is_empty());
        assert!(rule_sections.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_row_is_none() {
        let (databases, _, _) = create_memory_databases();
        let repo = SectionRepository::new(databases.main, SectionScope::News);
        let patch = SectionPatch {
            title: Some("Nuovo".into()),
            ..Default::default()
        };
        assert!(repo.update(42, &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_active_discounts() {
        let (databases, _, other) = create_memory_databases();
        let now = Utc::now();
        other.seed(
            "discounts",
            vec![
                json!({"id": 1, "product_id": 1, "percentage": 10.0, "expires_at": null}),
                json!({"id": 2, "product_id": 1, "percentage": 20.0,
                       "expires_at": (now - Duration::days(1)).to_rfc3339()}),
                json!({"id": 3, "product_id": 2, "percentage": 30.0,
                       "expires_at": (now + Duration::days(1)).to_rfc3339()}),
            ],
        );
        let repo = DiscountRepository::new(databases.other);
        let mut ids: Vec<i64> = repo
            .list_active(now)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_user_list_hides_password() {
        let (databases, main, _) = create_memory_databases();
        main.seed(
            "users",
            vec![json!({"id": 1, "username": "admin", "password": "$argon2id$x",
                        "can_manage_users": true})],
        );
        let repo = UserRepository::new(databases.main);
        let users = repo.list().await.unwrap();
        assert!(users[0].password.is_none());
        assert!(users[0].can_manage_users);

        let found = repo.find_by_username("admin").await.unwrap().unwrap();
        assert_eq!(found.password.as_deref(), Some("$argon2id$x"));
    }
}
