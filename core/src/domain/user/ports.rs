use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, user::entities::UpsertUser};

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Inserts the user if no row with this id exists. Existing rows are left untouched.
    fn upsert_user(&self, user: UpsertUser)
    -> impl Future<Output = Result<(), CoreError>> + Send;
}
