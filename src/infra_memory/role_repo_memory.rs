use crate::domain_model::{Role, RoleRecord};
use crate::domain_port::{RoleRepo, RoleStoreError};

pub struct InMemoryRoleRepo {
    roles: Vec<RoleRecord>,
}

impl InMemoryRoleRepo {
    pub fn new(roles: Vec<RoleRecord>) -> Self {
        InMemoryRoleRepo { roles }
    }

    /// One row per `Role`, ids starting at 1.
    pub fn seeded() -> Self {
        let roles = Role::ALL
            .into_iter()
            .zip(1..)
            .map(|(role, id)| RoleRecord {
                id,
                description: role.description().to_owned(),
            })
            .collect();
        Self::new(roles)
    }
}

#[async_trait::async_trait]
impl RoleRepo for InMemoryRoleRepo {
    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<RoleRecord>, RoleStoreError> {
        Ok(self
            .roles
            .iter()
            .find(|r| r.description == description)
            .cloned())
    }
}
