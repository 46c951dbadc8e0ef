use crate::domain::{
    authentication::ports::MockIdentityProvider,
    common::services::Service,
    health::ports::MockHealthCheckRepository,
    recipe::ports::{MockCategoryRepository, MockRecipeRepository},
    user::ports::MockUserRepository,
};

pub(crate) const TEST_SITE_URL: &str = "https://recipes.example.com";

pub(crate) type MockService = Service<
    MockUserRepository,
    MockRecipeRepository,
    MockCategoryRepository,
    MockIdentityProvider,
    MockHealthCheckRepository,
>;

/// Mocks for every port of `Service`, configured before the service is built.
pub(crate) struct Mocks {
    pub user: MockUserRepository,
    pub recipe: MockRecipeRepository,
    pub category: MockCategoryRepository,
    pub identity: MockIdentityProvider,
    pub health: MockHealthCheckRepository,
}

impl Mocks {
    pub fn new() -> Self {
        Self {
            user: MockUserRepository::new(),
            recipe: MockRecipeRepository::new(),
            category: MockCategoryRepository::new(),
            identity: MockIdentityProvider::new(),
            health: MockHealthCheckRepository::new(),
        }
    }

    pub fn into_service(self) -> MockService {
        Service::new(
            self.user,
            self.recipe,
            self.category,
            self.identity,
            self.health,
            format!("{}/", TEST_SITE_URL),
        )
    }
}
