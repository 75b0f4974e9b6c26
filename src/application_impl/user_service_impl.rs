use crate::application_port::{UserDto, UserError, UserService};
use crate::domain_model::*;
use crate::domain_port::{IdentityProvider, OpenWorkLookup, UserRepo};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct RealUserService {
    user_repo: Arc<dyn UserRepo>,
    identity_provider: Arc<dyn IdentityProvider>,
    project_lookup: Arc<dyn OpenWorkLookup>,
    task_lookup: Arc<dyn OpenWorkLookup>,
}

impl RealUserService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        identity_provider: Arc<dyn IdentityProvider>,
        project_lookup: Arc<dyn OpenWorkLookup>,
        task_lookup: Arc<dyn OpenWorkLookup>,
    ) -> RealUserService {
        RealUserService {
            user_repo,
            identity_provider,
            project_lookup,
            task_lookup,
        }
    }

    async fn find_active(&self, username: &str) -> Result<User, UserError> {
        self.user_repo
            .find_active_by_username(username)
            .await?
            .ok_or(UserError::UserNotFound)
    }

    fn lookup_for(&self, dependency: OpenWorkDependency) -> &dyn OpenWorkLookup {
        match dependency {
            OpenWorkDependency::Projects => self.project_lookup.as_ref(),
            OpenWorkDependency::Tasks => self.task_lookup.as_ref(),
        }
    }

    async fn check_if_user_can_be_deleted(&self, username: &str) -> Result<User, UserError> {
        let user = self.find_active(username).await?;
        self.check_user_connections(&user).await?;
        Ok(user)
    }

    // Managers are matched as assigned manager of projects, employees as
    // assigned employee of tasks.
    async fn check_user_connections(&self, user: &User) -> Result<(), UserError> {
        let Some(dependency) = user.role.open_work_dependency() else {
            return Ok(());
        };

        let count = self
            .lookup_for(dependency)
            .non_completed_count(&user.username)
            .await
            .map_err(|e| {
                warn!(username = %user.username, ?dependency, "open work count not retrieved: {e}");
                UserError::count_not_retrieved(dependency)
            })?;

        if count > 0 {
            warn!(
                username = %user.username,
                count,
                "delete rejected, user is linked to {}",
                dependency.linked_items()
            );
            return Err(UserError::linked_to(dependency));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl UserService for RealUserService {
    async fn create(&self, mut dto: UserDto) -> Result<UserDto, UserError> {
        if self
            .user_repo
            .find_active_by_username(&dto.username)
            .await?
            .is_some()
        {
            return Err(UserError::UserAlreadyExists);
        }

        let role = dto.role.ok_or(UserError::MissingRole)?;
        dto.enabled = true;

        let new_user = NewUser {
            first_name: dto.first_name.clone(),
            last_name: dto.last_name.clone(),
            username: dto.username.clone(),
            phone: dto.phone.clone(),
            gender: dto.gender,
            role,
            enabled: dto.enabled,
        };

        self.identity_provider
            .create_user(&dto.credential_profile(role))
            .await?;

        let saved = match self.user_repo.insert(new_user).await {
            Ok(saved) => saved,
            Err(e) => {
                error!(username = %dto.username, "store insert failed after credential was created: {e}");
                if let Err(undo) = self.identity_provider.delete_user(&dto.username).await {
                    error!(username = %dto.username, "credential left behind in identity provider: {undo}");
                }
                return Err(e.into());
            }
        };

        info!(username = %saved.username, id = %saved.id, "user created");
        Ok(saved.into())
    }

    async fn read_by_username(&self, username: &str) -> Result<UserDto, UserError> {
        let user = self.find_active(username).await?;
        Ok(user.into())
    }

    async fn read_all(&self) -> Result<Vec<UserDto>, UserError> {
        let users = self.user_repo.find_all_active().await?;

        Ok(users.into_iter().map(UserDto::from).collect())
    }

    async fn check_by_username(&self, username: &str) -> Result<bool, UserError> {
        self.find_active(username).await?;
        Ok(true)
    }

    async fn update(&self, username: &str, mut dto: UserDto) -> Result<UserDto, UserError> {
        let found = self.find_active(username).await?;

        dto.id = Some(found.id);
        dto.username = found.username.clone();
        dto.enabled = true;
        dto.role = Some(found.role);

        let user_to_update = User {
            id: found.id,
            first_name: dto.first_name.clone(),
            last_name: dto.last_name.clone(),
            username: dto.username.clone(),
            phone: dto.phone.clone(),
            gender: dto.gender,
            role: found.role,
            enabled: dto.enabled,
            is_deleted: false,
            version: found.version,
            created_at: found.created_at,
            updated_at: Utc::now(),
        };

        self.identity_provider
            .update_user(&dto.credential_profile(found.role))
            .await?;

        let updated = self
            .user_repo
            .update(user_to_update)
            .await
            .inspect_err(|e| {
                error!(%username, "credential updated but store update failed: {e}");
            })?;

        info!(%username, id = %updated.id, "user updated");
        Ok(updated.into())
    }

    async fn delete(&self, username: &str) -> Result<(), UserError> {
        let mut user_to_delete = self.check_if_user_can_be_deleted(username).await?;

        user_to_delete.mark_deleted();
        user_to_delete.updated_at = Utc::now();

        self.identity_provider.delete_user(username).await?;

        let deleted = self
            .user_repo
            .update(user_to_delete)
            .await
            .inspect_err(|e| {
                error!(%username, "credential deleted but store update failed: {e}");
            })?;

        info!(%username, parked_as = %deleted.username, "user deleted");
        Ok(())
    }
}
