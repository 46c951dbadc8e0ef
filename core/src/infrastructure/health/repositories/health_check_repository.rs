use std::{sync::Arc, time::Instant};

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use tracing::error;

use crate::{
    domain::{common::entities::app_errors::CoreError, health::ports::HealthCheckRepository},
    entity::users::Entity as UserEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresHealthCheckRepository {
    pub db: Arc<DatabaseConnection>,
}

impl PostgresHealthCheckRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl HealthCheckRepository for PostgresHealthCheckRepository {
    async fn health(&self) -> Result<u64, CoreError> {
        let started = Instant::now();

        self.db.ping().await.map_err(|e| {
            error!("Database ping failed: {}", e);
            CoreError::from(e)
        })?;

        Ok(started.elapsed().as_millis() as u64)
    }

    async fn count_users(&self) -> Result<u64, CoreError> {
        UserEntity::find().count(self.db.as_ref()).await.map_err(|e| {
            error!("Failed to count users: {}", e);
            CoreError::from(e)
        })
    }
}
