use crate::domain_model::RoleRecord;

#[async_trait::async_trait]
pub trait RoleRepo: Send + Sync {
    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<RoleRecord>, RoleStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RoleStoreError {
    #[error("store error: {0}")]
    Store(String),
}
