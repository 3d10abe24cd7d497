//! Search and section filtering used by the public listing pages.

use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{News, Package, Rule};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid section filter: {0}")]
    InvalidSection(String),
}

/// `all` or one section id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionFilter {
    #[default]
    All,
    Id(i64),
}

impl SectionFilter {
    pub fn matches(&self, section_id: Option<i64>) -> bool {
        match self {
            SectionFilter::All => true,
            SectionFilter::Id(id) => section_id == Some(*id),
        }
    }
}

impl FromStr for SectionFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(SectionFilter::All);
        }
        s.parse::<i64>()
            .map(SectionFilter::Id)
            .map_err(|_| FilterError::InvalidSection(s.to_string()))
    }
}

/// Query string of the listing endpoints: `?search=...&section=...`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentQuery {
    pub search: Option<String>,
    pub section: Option<String>,
}

impl ContentQuery {
    pub fn to_filter(&self) -> Result<ContentFilter, FilterError> {
        let section = match self.section.as_deref() {
            Some(raw) => raw.parse()?,
            None => SectionFilter::All,
        };
        Ok(ContentFilter::new(self.search.as_deref().unwrap_or_default(), section))
    }
}

/// Case-insensitive substring search combined with a section match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    needle: String,
    section: SectionFilter,
}

impl ContentFilter {
    /// The search term is matched literally, surrounding whitespace included.
    pub fn new(search: &str, section: SectionFilter) -> Self {
        Self {
            needle: search.to_lowercase(),
            section,
        }
    }

    pub fn section(&self) -> SectionFilter {
        self.section
    }

    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        if !self.section.matches(item.section_id()) {
            return false;
        }
        if self.needle.is_empty() {
            return true;
        }
        item.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Something the listing pages can search.
pub trait Searchable {
    /// Text fields the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;
    fn section_id(&self) -> Option<i64>;
}

impl Searchable for News {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }

    fn section_id(&self) -> Option<i64> {
        self.section_id
    }
}

impl Searchable for Rule {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }

    fn section_id(&self) -> Option<i64> {
        self.section_id
    }
}

impl Searchable for Package {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.nome.as_str()];
        if let Some(descrizione) = &self.descrizione {
            fields.push(descrizione);
        }
        fields
    }

    fn section_id(&self) -> Option<i64> {
        self.section_id
    }
}

/// Keeps the items matching `filter`, preserving their order.
pub fn filter_items<T: Searchable>(items: Vec<T>, filter: &ContentFilter) -> Vec<T> {
    items.into_iter().filter(|item| filter.matches(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Words;
    use fake::Fake;

    fn news(id: i64, section_id: i64, title: &str, content: &str) -> News {
        News {
            id,
            section_id: Some(section_id),
            title: title.into(),
            content: content.into(),
            image: None,
            order_index: 0,
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_section_filter_parse() {
        assert_eq!("all".parse::<SectionFilter>(), Ok(SectionFilter::All));
        assert_eq!("ALL".parse::<SectionFilter>(), Ok(SectionFilter::All));
        assert_eq!("".parse::<SectionFilter>(), Ok(SectionFilter::All));
        assert_eq!(" 12 ".parse::<SectionFilter>(), Ok(SectionFilter::Id(12)));
        assert!("eventi".parse::<SectionFilter>().is_err());
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_content() {
        let items = vec![
            news(1, 1, "Evento PvP", "Sabato sera"),
            news(2, 1, "Manutenzione", "Il server sarà offline per il PVP update"),
            news(3, 2, "Nuovo shop", "Sconti"),
        ];
        let filter = ContentFilter::new("pvp", SectionFilter::All);
        let ids: Vec<i64> = filter_items(items, &filter).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_section_and_search_combine() {
        let items = vec![
            news(1, 1, "Evento PvP", ""),
            news(2, 2, "Evento build", ""),
            news(3, 2, "Altro", ""),
        ];
        let filter = ContentFilter::new("evento", SectionFilter::Id(2));
        let ids: Vec<i64> = filter_items(items, &filter).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_empty_search_with_all_keeps_everything() {
        let items: Vec<News> = (0..10)
            .map(|i| {
                let words: Vec<String> = Words(2..6).fake();
                news(i, i % 3, &words.join(" "), &words.join(", "))
            })
            .collect();
        let query = ContentQuery::default();
        let filter = query.to_filter().unwrap();
        assert_eq!(filter_items(items, &filter).len(), 10);
    }

    #[test]
    fn test_every_match_contains_needle() {
        let items: Vec<News> = (0..50)
            .map(|i| {
                let title: Vec<String> = Words(1..4).fake();
                let content: Vec<String> = Words(3..10).fake();
                news(i, 1, &title.join(" "), &content.join(" "))
            })
            .collect();
        let filter = ContentFilter::new("A", SectionFilter::All);
        for item in filter_items(items, &filter) {
            let hay = format!("{} {}", item.title, item.content).to_lowercase();
            assert!(hay.contains('a'));
        }
    }

    #[test]
    fn test_unassigned_items_only_match_all() {
        let mut item = news(1, 1, "x", "y");
        item.section_id = None;
        assert!(ContentFilter::new("", SectionFilter::All).matches(&item));
        assert!(!ContentFilter::new("", SectionFilter::Id(1)).matches(&item));
    }

    #[test]
    fn test_package_search_uses_nome_and_descrizione() {
        let package = Package {
            id: 1,
            nome: "Rango VIP".into(),
            descrizione: Some("Accesso al kit diamante".into()),
            immagine: None,
            prezzo: 5.0,
            section_id: Some(3),
        };
        assert!(ContentFilter::new("DIAMANTE", SectionFilter::Id(3)).matches(&package));
        assert!(!ContentFilter::new("smeraldo", SectionFilter::All).matches(&package));
    }

    #[test]
    fn test_query_with_bad_section_is_rejected() {
        let query = ContentQuery {
            search: None,
            section: Some("abc".into()),
        };
        assert_eq!(
            query.to_filter(),
            Err(FilterError::InvalidSection("abc".into()))
        );
    }

    #[test]
    fn test_whitespace_search_is_literal() {
        let items = vec![
            news(1, 1, "Evento PvP", ""),
            news(2, 1, "Manutenzione", ""),
            news(3, 1, "Torneo", "Iscrizioni aperte"),
        ];
        let filter = ContentFilter::new(" ", SectionFilter::All);
        let ids: Vec<i64> = filter_items(items, &filter).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let padded = news(4, 1, "PvP", "");
        assert!(!ContentFilter::new(" pvp", SectionFilter::All).matches(&padded));
    }
}
