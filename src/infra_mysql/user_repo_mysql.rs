use super::util::write_error;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

const SELECT_USER: &str = r#"
SELECT u.id, u.first_name, u.last_name, u.user_name, u.phone, u.gender,
       r.description AS role, u.enabled, u.is_deleted, u.version,
       u.insert_date_time, u.last_update_date_time
FROM users u
JOIN roles r ON r.id = u.role_id
"#;

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }
}

fn store_error(e: sqlx::Error) -> UserStoreError {
    UserStoreError::Store(e.to_string())
}

fn user_from_row(row: &MySqlRow) -> Result<User, UserStoreError> {
    let gender: String = row.try_get("gender").map_err(store_error)?;
    let role: String = row.try_get("role").map_err(store_error)?;

    Ok(User {
        id: row.try_get::<UserId, _>("id").map_err(store_error)?,
        first_name: row.try_get("first_name").map_err(store_error)?,
        last_name: row.try_get("last_name").map_err(store_error)?,
        username: row.try_get("user_name").map_err(store_error)?,
        phone: row.try_get("phone").map_err(store_error)?,
        gender: gender
            .parse()
            .map_err(|e: UnknownGender| UserStoreError::Store(e.to_string()))?,
        role: role
            .parse()
            .map_err(|e: UnknownRole| UserStoreError::Store(e.to_string()))?,
        enabled: row.try_get("enabled").map_err(store_error)?,
        is_deleted: row.try_get("is_deleted").map_err(store_error)?,
        version: row.try_get("version").map_err(store_error)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("insert_date_time")
            .map_err(store_error)?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("last_update_date_time")
            .map_err(store_error)?,
    })
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn find_active_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserStoreError> {
        let sql = format!("{SELECT_USER} WHERE u.user_name = ? AND u.is_deleted = 0");

        sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::Store(format!("query user: {e}")))?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    async fn find_all_active(&self) -> Result<Vec<User>, UserStoreError> {
        let sql = format!("{SELECT_USER} WHERE u.is_deleted = 0 ORDER BY u.first_name, u.id");

        sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserStoreError::Store(format!("query users: {e}")))?
            .iter()
            .map(user_from_row)
            .collect()
    }

    async fn insert(&self, user: NewUser) -> Result<User, UserStoreError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
INSERT INTO users (first_name, last_name, user_name, phone, gender, role_id,
                   enabled, is_deleted, version, insert_date_time, last_update_date_time)
SELECT ?, ?, ?, ?, ?, r.id, ?, 0, 0, ?, ?
FROM roles r
WHERE r.description = ?
"#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .bind(&user.phone)
        .bind(user.gender.as_str())
        .bind(user.enabled)
        .bind(now)
        .bind(now)
        .bind(user.role.description())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &user.username))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::Store(format!(
                "role {} missing from roles table",
                user.role
            )));
        }
        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| UserStoreError::Store(e.to_string()))?;

        Ok(User {
            id: UserId(id),
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
        })
    }

    async fn update(&self, mut user: User) -> Result<User, UserStoreError> {
        let result = sqlx::query(
            r#"
UPDATE users
SET first_name = ?, last_name = ?, user_name = ?, phone = ?, gender = ?,
    enabled = ?, is_deleted = ?, version = version + 1, last_update_date_time = ?
WHERE id = ? AND version = ?
"#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .bind(&user.phone)
        .bind(user.gender.as_str())
        .bind(user.enabled)
        .bind(user.is_deleted)
        .bind(user.updated_at)
        .bind(user.id)
        .bind(user.version)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &user.username))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::VersionConflict { id: user.id });
        }

        user.version += 1;
        Ok(user)
    }
}
