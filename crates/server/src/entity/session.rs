//! Login session entity.
//!
//! Rows are written by the external authentication surface when a principal
//! signs in; the provider only reads them to decide whether the caller is
//! authenticated for the requested role.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    /// Owner reference (`<role>:<id>`) of the signed-in principal.
    pub owner: String,
    /// Role the principal authenticated as.
    pub role: String,
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
