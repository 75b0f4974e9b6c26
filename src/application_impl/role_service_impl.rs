use crate::application_port::{RoleDto, RoleError, RoleService};
use crate::domain_port::RoleRepo;
use std::sync::Arc;

pub struct RealRoleService {
    role_repo: Arc<dyn RoleRepo>,
}

impl RealRoleService {
    pub fn new(role_repo: Arc<dyn RoleRepo>) -> RealRoleService {
        RealRoleService { role_repo }
    }
}

#[async_trait::async_trait]
impl RoleService for RealRoleService {
    async fn read_by_description(&self, description: &str) -> Result<RoleDto, RoleError> {
        let role = self
            .role_repo
            .find_by_description(description)
            .await?
            .ok_or(RoleError::RoleNotFound)?;

        Ok(role.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra_memory::InMemoryRoleRepo;

    fn service() -> RealRoleService {
        RealRoleService::new(Arc::new(InMemoryRoleRepo::seeded()))
    }

    #[tokio::test]
    async fn reads_seeded_role_by_description() {
        let role = service().read_by_description("Manager").await.unwrap();
        assert_eq!(role.description, "Manager");
    }

    #[tokio::test]
    async fn unknown_description_is_role_not_found() {
        let err = service().read_by_description("Intern").await.unwrap_err();
        assert!(matches!(err, RoleError::RoleNotFound));
        assert_eq!(err.to_string(), "Role does not exist.");
    }
}
