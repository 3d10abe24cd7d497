//! Store section and package entities (other database).

use serde::{Deserialize, Serialize};

use domain::models::{Package, StoreSection};

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSectionEntity {
    pub id: i64,
    pub nome: String,
    pub descrizione: Option<String>,
    pub order_index: Option<i32>,
}

impl From<StoreSectionEntity> for StoreSection {
    fn from(entity: StoreSectionEntity) -> Self {
        Self {
            id: entity.id,
            nome: entity.nome,
            descrizione: entity.descrizione,
            order_index: entity.order_index.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewStoreSectionRow {
    pub nome: String,
    pub descrizione: Option<String>,
    pub order_index: i32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreSectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descrizione: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageEntity {
    pub id: i64,
    pub nome: String,
    pub descrizione: Option<String>,
    pub immagine: Option<String>,
    pub prezzo: f64,
    pub section_id: Option<i64>,
}

impl From<PackageEntity> for Package {
    fn from(entity: PackageEntity) -> Self {
        Self {
            id: entity.id,
            nome: entity.nome,
            descrizione: entity.descrizione,
            immagine: entity.immagine,
            prezzo: entity.prezzo,
            section_id: entity.section_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPackageRow {
    pub nome: String,
    pub descrizione: Option<String>,
    pub immagine: Option<String>,
    pub prezzo: f64,
    pub section_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PackagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descrizione: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub immagine: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prezzo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<Option<i64>>,
}
