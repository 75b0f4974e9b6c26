use crate::domain_model::RoleRecord;
use crate::domain_port::{RoleRepo, RoleStoreError};
use sqlx::{MySqlPool, Row};

pub struct MySqlRoleRepo {
    pool: MySqlPool,
}

impl MySqlRoleRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlRoleRepo { pool }
    }
}

#[async_trait::async_trait]
impl RoleRepo for MySqlRoleRepo {
    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<RoleRecord>, RoleStoreError> {
        let row = sqlx::query("SELECT id, description FROM roles WHERE description = ?")
            .bind(description)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RoleStoreError::Store(format!("query role: {e}")))?;

        Ok(row.map(|row| RoleRecord {
            id: row.get::<i64, _>("id"),
            description: row.get::<String, _>("description"),
        }))
    }
}
