use crate::domain_model::*;

#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_active_by_username(&self, username: &str)
    -> Result<Option<User>, UserStoreError>;

    /// Active users sorted by first name, ties broken by id.
    async fn find_all_active(&self) -> Result<Vec<User>, UserStoreError>;

    async fn insert(&self, user: NewUser) -> Result<User, UserStoreError>;

    /// Writes `user` over the stored row with the same id, provided the stored
    /// `version` still equals `user.version`. Returns the row with its bumped version.
    async fn update(&self, user: User) -> Result<User, UserStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UserStoreError {
    #[error("username already taken: {0}")]
    DuplicateUsername(String),
    #[error("user {id} was modified concurrently")]
    VersionConflict { id: UserId },
    #[error("store error: {0}")]
    Store(String),
}
