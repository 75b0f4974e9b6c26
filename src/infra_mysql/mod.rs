//! sqlx adapters for the `real` backend.
//!
//! Expected tables:
//! - `roles (id BIGINT PK, description VARCHAR UNIQUE)`
//! - `users (id BIGINT AUTO_INCREMENT PK, first_name, last_name, user_name, phone,
//!   gender VARCHAR, role_id BIGINT FK roles, enabled TINYINT(1), is_deleted TINYINT(1),
//!   version BIGINT, insert_date_time TIMESTAMP, last_update_date_time TIMESTAMP)`
//!   with a unique index over `user_name` among rows where `is_deleted = 0`.

mod role_repo_mysql;
mod user_repo_mysql;

pub use role_repo_mysql::*;
pub use user_repo_mysql::*;

mod util;
