use crate::domain_model::*;
use crate::domain_port::*;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Rows {
    next_id: i64,
    by_id: BTreeMap<UserId, User>,
}

impl Rows {
    fn active_holder(&self, username: &str) -> Option<&User> {
        self.by_id
            .values()
            .find(|u| u.is_active() && u.username == username)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepo {
    rows: Mutex<Rows>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Rows>, UserStoreError> {
        self.rows
            .lock()
            .map_err(|e| UserStoreError::Store(e.to_string()))
    }

    /// Every row including deleted ones.
    pub fn snapshot(&self) -> Vec<User> {
        self.rows
            .lock()
            .map(|rows| rows.by_id.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        self.rows
            .lock()
            .ok()
            .and_then(|rows| rows.by_id.get(&id).cloned())
    }
}

#[async_trait::async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn find_active_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserStoreError> {
        let rows = self.lock()?;
        Ok(rows.active_holder(username).cloned())
    }

    async fn find_all_active(&self) -> Result<Vec<User>, UserStoreError> {
        let rows = self.lock()?;
        let mut users: Vec<User> = rows
            .by_id
            .values()
            .filter(|u| u.is_active())
            .cloned()
            .collect();

        // by_id iterates in id order and sort_by is stable, so ties stay by id
        users.sort_by(|a, b| a.first_name.cmp(&b.first_name));

        Ok(users)
    }

    async fn insert(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut rows = self.lock()?;
        if rows.active_holder(&user.username).is_some() {
            return Err(UserStoreError::DuplicateUsername(user.username));
        }

        rows.next_id += 1;
        let now = Utc::now();
        let saved = User {
            id: UserId(rows.next_id),
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            phone: user.phone,
            gender: user.gender,
            role: user.role,
            enabled: user.enabled,
            is_deleted: false,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        rows.by_id.insert(saved.id, saved.clone());

        Ok(saved)
    }

    async fn update(&self, mut user: User) -> Result<User, UserStoreError> {
        let mut rows = self.lock()?;

        let stored_version = rows
            .by_id
            .get(&user.id)
            .map(|stored| stored.version)
            .ok_or_else(|| UserStoreError::Store(format!("no user with id {}", user.id)))?;
        if stored_version != user.version {
            return Err(UserStoreError::VersionConflict { id: user.id });
        }

        if user.is_active() {
            if let Some(holder) = rows.active_holder(&user.username) {
                if holder.id != user.id {
                    return Err(UserStoreError::DuplicateUsername(user.username));
                }
            }
        }

        user.version += 1;
        rows.by_id.insert(user.id, user.clone());

        Ok(user)
    }
}
