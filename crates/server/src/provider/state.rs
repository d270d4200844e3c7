//! Provider state shared by the HTTP endpoints.

use crate::config::AppConfig;
use crate::provider::grants::GrantStore;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProviderState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
}

impl ProviderState {
    pub fn new(db: Arc<DatabaseConnection>, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    pub fn grants(&self) -> GrantStore {
        GrantStore::new(self.db.clone())
    }
}
