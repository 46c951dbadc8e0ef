use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const STATUS_OK: &str = "ok";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealthStatus {
    pub status: String,
    pub user_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdentityProviderHealthStatus {
    pub status: String,
}

/// Connectivity report for both external collaborators of the web app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReadinessReport {
    pub database: DatabaseHealthStatus,
    pub identity_provider: IdentityProviderHealthStatus,
}

impl ReadinessReport {
    pub fn is_ready(&self) -> bool {
        self.database.status == STATUS_OK && self.identity_provider.status == STATUS_OK
    }
}
