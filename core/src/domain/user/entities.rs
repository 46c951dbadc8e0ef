/// Local mirror of an identity provider account, keyed by the provider's subject id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertUser {
    pub id: String,
    /// Absent when the provider account carries no email.
    pub email: Option<String>,
}
