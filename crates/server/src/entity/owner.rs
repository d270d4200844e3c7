//! Owner entity - the principals on whose behalf grants are issued.
//!
//! Grant records point at owners through a `<role>:<id>` reference string
//! rather than duplicating owner data.

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, QueryFilter};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "owner")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Configured user role this principal belongs to (e.g. "Admin").
    pub role: String,
    #[sea_orm(unique)]
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Capability for exposing a provider-facing view of an entity.
///
/// The default projection is the full serialized form; types with fields that
/// should not cross the provider boundary override it.
pub trait Projectable: Serialize {
    fn provider_view(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Projectable for Model {
    fn provider_view(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "email": self.email,
            "display_name": self.display_name,
        })
    }
}

impl Model {
    /// Reference string stored in grant records.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.role, self.id)
    }
}

/// Resolve a `<role>:<id>` reference back to an owner row.
///
/// Returns `None` for malformed references as well as for missing rows; a
/// reference that no longer resolves is the caller's error to surface.
pub async fn find_by_reference(
    db: &DatabaseConnection,
    reference: &str,
) -> Result<Option<Model>, DbErr> {
    let Some((role, id)) = reference.split_once(':') else {
        return Ok(None);
    };
    let Ok(id) = id.parse::<i64>() else {
        return Ok(None);
    };
    Entity::find_by_id(id)
        .filter(Column::Role.eq(role))
        .one(db)
        .await
}
