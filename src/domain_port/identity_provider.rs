use crate::domain_model::Role;

/// What the identity provider needs to know about a user's login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: Option<String>,
    pub role: Role,
    pub enabled: bool,
}

#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_user(&self, profile: &CredentialProfile) -> Result<(), IdentityProviderError>;

    async fn update_user(&self, profile: &CredentialProfile) -> Result<(), IdentityProviderError>;

    async fn delete_user(&self, username: &str) -> Result<(), IdentityProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityProviderError {
    #[error("credential for {0} not found")]
    NotFound(String),
    #[error("identity provider rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("identity provider request failed: {0}")]
    Request(String),
}
