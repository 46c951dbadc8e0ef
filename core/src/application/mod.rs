use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;

use crate::{
    domain::{
        common::{IdentityConfig, LLMConfig, PocketRecipeConfig, services::Service},
        recipe_extraction::services::RecipeExtractor,
    },
    infrastructure::{
        db::postgres::Postgres,
        health::repositories::health_check_repository::PostgresHealthCheckRepository,
        identity::supabase_client::SupabaseIdentityProvider,
        image::optimizer::JpegImageOptimizer,
        llm::gemini_client::GeminiLLMClient,
        recipe::repositories::{
            category_repository::PostgresCategoryRepository,
            recipe_repository::PostgresRecipeRepository,
        },
        user::repositories::user_repository::PostgresUserRepository,
    },
};

pub type PocketRecipeService = Service<
    PostgresUserRepository,
    PostgresRecipeRepository,
    PostgresCategoryRepository,
    SupabaseIdentityProvider,
    PostgresHealthCheckRepository,
>;

pub type PocketRecipeExtractor = RecipeExtractor<GeminiLLMClient, JpegImageOptimizer>;

/// Connects to Postgres, runs migrations and wires every adapter.
pub async fn create_service(
    config: PocketRecipeConfig,
) -> Result<PocketRecipeService, anyhow::Error> {
    let postgres = Postgres::new(&config.database.url()).await?;

    Ok(service_from_connection(postgres.get_db(), config.identity))
}

/// Wires the service on an existing connection.
pub fn service_from_connection(
    db: Arc<DatabaseConnection>,
    identity: IdentityConfig,
) -> PocketRecipeService {
    Service::new(
        PostgresUserRepository::new(Arc::clone(&db)),
        PostgresRecipeRepository::new(Arc::clone(&db)),
        PostgresCategoryRepository::new(Arc::clone(&db)),
        SupabaseIdentityProvider::new(identity.supabase_url, identity.supabase_anon_key),
        PostgresHealthCheckRepository::new(db),
        identity.site_url,
    )
}

pub fn create_recipe_extractor(config: LLMConfig) -> Result<PocketRecipeExtractor, anyhow::Error> {
    let llm_client = GeminiLLMClient::with_base_url(
        config.gemini_api_key,
        config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    Ok(RecipeExtractor::new(llm_client, JpegImageOptimizer::new()))
}
