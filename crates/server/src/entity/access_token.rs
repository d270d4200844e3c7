//! Access token grant records.
//!
//! Same shape as authorization codes; kept in its own table so each kind has
//! its own uniqueness domain. The highest `id` for an `(app_name, owner)`
//! pair is the "current" token when the reuse policy is active. Older records
//! for a pair are never deleted or invalidated.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "access_token")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub token: String,
    pub app_name: String,
    /// Owner reference (`<role>:<id>`), not a copy of the owner row.
    pub owner: String,
    pub issued_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
