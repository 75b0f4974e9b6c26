use crate::domain_model::RoleRecord;
use crate::domain_port::RoleStoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    #[error("Role does not exist.")]
    RoleNotFound,
    #[error("store error: {0}")]
    Store(String),
}

impl From<RoleStoreError> for RoleError {
    fn from(err: RoleStoreError) -> Self {
        match err {
            RoleStoreError::Store(e) => RoleError::Store(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDto {
    pub id: i64,
    pub description: String,
}

impl From<RoleRecord> for RoleDto {
    fn from(record: RoleRecord) -> Self {
        RoleDto {
            id: record.id,
            description: record.description,
        }
    }
}

#[async_trait::async_trait]
pub trait RoleService: Send + Sync {
    async fn read_by_description(&self, description: &str) -> Result<RoleDto, RoleError>;
}
