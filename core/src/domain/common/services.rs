use std::sync::Arc;

use crate::domain::{
    authentication::ports::IdentityProvider,
    health::ports::HealthCheckRepository,
    recipe::ports::{CategoryRepository, RecipeRepository},
    user::ports::UserRepository,
};

/// Aggregates every port the web pipelines depend on. Each domain module
/// implements its service trait on this struct.
pub struct Service<U, R, C, IP, HC>
where
    U: UserRepository,
    R: RecipeRepository,
    C: CategoryRepository,
    IP: IdentityProvider,
    HC: HealthCheckRepository,
{
    pub(crate) user_repository: Arc<U>,
    pub(crate) recipe_repository: Arc<R>,
    pub(crate) category_repository: Arc<C>,
    pub(crate) identity_provider: Arc<IP>,
    pub(crate) health_check_repository: Arc<HC>,
    pub(crate) site_url: String,
}

impl<U, R, C, IP, HC> Service<U, R, C, IP, HC>
where
    U: UserRepository,
    R: RecipeRepository,
    C: CategoryRepository,
    IP: IdentityProvider,
    HC: HealthCheckRepository,
{
    pub fn new(
        user_repository: U,
        recipe_repository: R,
        category_repository: C,
        identity_provider: IP,
        health_check_repository: HC,
        site_url: String,
    ) -> Self {
        Self {
            user_repository: Arc::new(user_repository),
            recipe_repository: Arc::new(recipe_repository),
            category_repository: Arc::new(category_repository),
            identity_provider: Arc::new(identity_provider),
            health_check_repository: Arc::new(health_check_repository),
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }
}

impl<U, R, C, IP, HC> Clone for Service<U, R, C, IP, HC>
where
    U: UserRepository,
    R: RecipeRepository,
    C: CategoryRepository,
    IP: IdentityProvider,
    HC: HealthCheckRepository,
{
    fn clone(&self) -> Self {
        Self {
            user_repository: Arc::clone(&self.user_repository),
            recipe_repository: Arc::clone(&self.recipe_repository),
            category_repository: Arc::clone(&self.category_repository),
            identity_provider: Arc::clone(&self.identity_provider),
            health_check_repository: Arc::clone(&self.health_check_repository),
            site_url: self.site_url.clone(),
        }
    }
}
