use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, health::entities::ReadinessReport,
};

#[cfg_attr(test, mockall::automock)]
pub trait HealthCheckRepository: Send + Sync {
    /// Round-trip latency of a trivial query, in milliseconds.
    fn health(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn count_users(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait HealthCheckService: Send + Sync {
    /// Never fails: probe errors are reported in the statuses.
    fn readiness(&self) -> impl Future<Output = ReadinessReport> + Send;

    fn health(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;
}
