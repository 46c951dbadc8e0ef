use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, sea_query::OnConflict};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        user::{entities::UpsertUser, ports::UserRepository},
    },
    entity::users::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: Arc<DatabaseConnection>,
}

impl PostgresUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn upsert_user(&self, user: UpsertUser) -> Result<(), CoreError> {
        Entity::insert(ActiveModel {
            id: Set(user.id),
            email: Set(user.email),
            created_at: Set(Utc::now().fixed_offset()),
        })
        .on_conflict(OnConflict::column(Column::Id).do_nothing().to_owned())
        .exec_without_returning(self.db.as_ref())
        .await
        .map_err(|e| {
            error!("Failed to upsert user: {}", e);
            CoreError::from(e)
        })?;

        Ok(())
    }
}
