use crate::domain_model::*;
use crate::domain_port::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User already exists.")]
    UserAlreadyExists,
    #[error("User does not exist.")]
    UserNotFound,
    #[error("Role is required.")]
    MissingRole,
    #[error("Project count cannot be retrieved.")]
    ProjectCountNotRetrieved,
    #[error("Task count cannot be retrieved.")]
    TaskCountNotRetrieved,
    #[error("User cannot be deleted. User is linked to {linked}")]
    UserCanNotBeDeleted { linked: &'static str },
    #[error("User was modified concurrently.")]
    Conflict,
    #[error("identity provider error: {0}")]
    IdentityProvider(#[from] IdentityProviderError),
    #[error("store error: {0}")]
    Store(String),
}

impl UserError {
    pub fn count_not_retrieved(dependency: OpenWorkDependency) -> Self {
        match dependency {
            OpenWorkDependency::Projects => UserError::ProjectCountNotRetrieved,
            OpenWorkDependency::Tasks => UserError::TaskCountNotRetrieved,
        }
    }

    pub fn linked_to(dependency: OpenWorkDependency) -> Self {
        UserError::UserCanNotBeDeleted {
            linked: dependency.linked_items(),
        }
    }
}

impl From<UserStoreError> for UserError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::DuplicateUsername(_) => UserError::UserAlreadyExists,
            UserStoreError::VersionConflict { .. } => UserError::Conflict,
            UserStoreError::Store(e) => UserError::Store(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default)]
    pub id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "userName")]
    pub username: String,
    #[serde(default, rename = "passWord", skip_serializing)]
    pub password: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    pub phone: String,
    pub role: Option<Role>,
    pub gender: Gender,
}

impl UserDto {
    pub fn credential_profile(&self, role: Role) -> CredentialProfile {
        CredentialProfile {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            password: self.password.clone(),
            role,
            enabled: self.enabled,
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: Some(user.id),
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            password: None,
            enabled: user.enabled,
            phone: user.phone,
            role: Some(user.role),
            gender: user.gender,
        }
    }
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn create(&self, dto: UserDto) -> Result<UserDto, UserError>;

    async fn read_by_username(&self, username: &str) -> Result<UserDto, UserError>;

    async fn read_all(&self) -> Result<Vec<UserDto>, UserError>;

    /// `Ok(true)` when an active user holds `username`; absence is
    /// `Err(UserError::UserNotFound)`, never `Ok(false)`.
    async fn check_by_username(&self, username: &str) -> Result<bool, UserError>;

    async fn update(&self, username: &str, dto: UserDto) -> Result<UserDto, UserError>;

    async fn delete(&self, username: &str) -> Result<(), UserError>;
}
