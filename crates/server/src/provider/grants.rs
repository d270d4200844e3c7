//! Grant record repository.
//!
//! Typed wrapper over the unique token store for the two grant kinds.
//! Records are created once at issuance and never mutated; there is no
//! expiry and no reaper, so lookups are pure existence checks.

use crate::entity::{access_token, auth_code};
use crate::error::StoreError;
use crate::provider::store;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;
use time::OffsetDateTime;

#[derive(Clone)]
pub struct GrantStore {
    db: Arc<DatabaseConnection>,
}

impl GrantStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Mint a fresh authorization code for `(app_name, owner)`.
    ///
    /// Codes are never reused; every call persists a new record under a new
    /// unique token.
    pub async fn issue_auth_code(
        &self,
        app_name: &str,
        owner: &str,
    ) -> Result<auth_code::Model, StoreError> {
        let issued_at = OffsetDateTime::now_utc();
        store::allocate(|token| {
            let record = auth_code::ActiveModel {
                id: NotSet,
                token: Set(token),
                app_name: Set(app_name.to_string()),
                owner: Set(owner.to_string()),
                issued_at: Set(issued_at),
            };
            let db = self.db.clone();
            async move { store::classify_unique_violation(record.insert(db.as_ref()).await) }
        })
        .await
    }

    /// Mint a fresh access token for `(app_name, owner)`.
    ///
    /// Prior tokens for the pair stay valid; the newest record is the
    /// "current" one for reuse lookups.
    pub async fn issue_access_token(
        &self,
        app_name: &str,
        owner: &str,
    ) -> Result<access_token::Model, StoreError> {
        let issued_at = OffsetDateTime::now_utc();
        store::allocate(|token| {
            let record = access_token::ActiveModel {
                id: NotSet,
                token: Set(token),
                app_name: Set(app_name.to_string()),
                owner: Set(owner.to_string()),
                issued_at: Set(issued_at),
            };
            let db = self.db.clone();
            async move { store::classify_unique_violation(record.insert(db.as_ref()).await) }
        })
        .await
    }

    pub async fn find_auth_code(&self, token: &str) -> Result<Option<auth_code::Model>, DbErr> {
        auth_code::Entity::find()
            .filter(auth_code::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await
    }

    pub async fn find_access_token(
        &self,
        token: &str,
    ) -> Result<Option<access_token::Model>, DbErr> {
        access_token::Entity::find()
            .filter(access_token::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await
    }

    /// Most recently issued access token for the pair, if any.
    pub async fn current_access_token(
        &self,
        app_name: &str,
        owner: &str,
    ) -> Result<Option<access_token::Model>, DbErr> {
        access_token::Entity::find()
            .filter(access_token::Column::AppName.eq(app_name))
            .filter(access_token::Column::Owner.eq(owner))
            .order_by_desc(access_token::Column::Id)
            .one(self.db.as_ref())
            .await
    }

    pub async fn auth_code_exists(&self, token: &str) -> Result<bool, DbErr> {
        Ok(self.find_auth_code(token).await?.is_some())
    }

    pub async fn access_token_exists(&self, token: &str) -> Result<bool, DbErr> {
        Ok(self.find_access_token(token).await?.is_some())
    }
}
