use crate::domain_port::UserStoreError;
use sqlx::mysql::MySqlDatabaseError;

pub fn is_dup_key(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db) = err {
        if let Some(mysql_err) = db.try_downcast_ref::<MySqlDatabaseError>() {
            return mysql_err.number() == 1062; // ER_DUP_ENTRY
        }
    }

    false
}

pub fn write_error(err: sqlx::Error, username: &str) -> UserStoreError {
    if is_dup_key(&err) {
        UserStoreError::DuplicateUsername(username.to_owned())
    } else {
        UserStoreError::Store(err.to_string())
    }
}
