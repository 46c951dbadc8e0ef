use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, sea_query::OnConflict};
use tracing::error;

use crate::{
    domain::{
        common::{entities::app_errors::CoreError, generate_uuid_v7},
        recipe::{entities::Category, ports::CategoryRepository},
    },
    entity::categories::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresCategoryRepository {
    pub db: Arc<DatabaseConnection>,
}

impl PostgresCategoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl CategoryRepository for PostgresCategoryRepository {
    async fn get_or_create_by_name(&self, name: String) -> Result<Category, CoreError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let category = Entity::insert(ActiveModel {
            id: Set(generate_uuid_v7()),
            name: Set(name),
            created_at: Set(Utc::now().fixed_offset()),
        })
        .on_conflict(
            OnConflict::column(Column::Name)
                .update_column(Column::Name)
                .to_owned(),
        )
        .exec_with_returning(self.db.as_ref())
        .await
        .map_err(|e| {
            error!("Failed to get or create category: {}", e);
            CoreError::from(e)
        })?;

        Ok(Category::from(category))
    }
}
