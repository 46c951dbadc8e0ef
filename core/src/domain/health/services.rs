use tracing::warn;

use crate::domain::{
    authentication::ports::IdentityProvider,
    common::{entities::app_errors::CoreError, services::Service},
    health::{
        entities::{
            DatabaseHealthStatus, IdentityProviderHealthStatus, ReadinessReport, STATUS_OK,
        },
        ports::{HealthCheckRepository, HealthCheckService},
    },
    recipe::ports::{CategoryRepository, RecipeRepository},
    user::ports::UserRepository,
};

impl<U, R, C, IP, HC> HealthCheckService for Service<U, R, C, IP, HC>
where
    U: UserRepository,
    R: RecipeRepository,
    C: CategoryRepository,
    IP: IdentityProvider,
    HC: HealthCheckRepository,
{
    async fn readiness(&self) -> ReadinessReport {
        let (users, ping) = tokio::join!(
            self.health_check_repository.count_users(),
            self.identity_provider.ping()
        );

        let database = match users {
            Ok(count) => DatabaseHealthStatus {
                status: STATUS_OK.to_string(),
                user_count: Some(count),
            },
            Err(e) => {
                warn!("database readiness probe failed: {}", e);
                DatabaseHealthStatus {
                    status: format!("error: {}", e),
                    user_count: None,
                }
            }
        };

        let identity_provider = match ping {
            Ok(()) => IdentityProviderHealthStatus {
                status: STATUS_OK.to_string(),
            },
            Err(e) => {
                warn!("identity provider readiness probe failed: {}", e);
                IdentityProviderHealthStatus {
                    status: format!("error: {}", e),
                }
            }
        };

        ReadinessReport {
            database,
            identity_provider,
        }
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }
}
