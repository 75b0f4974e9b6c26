//! In-process adapters behind the `fake` backends. Also what the tests drive
//! the services with.

mod identity_provider_fake;
mod open_work_lookup_fake;
mod role_repo_memory;
mod user_repo_memory;

pub use identity_provider_fake::*;
pub use open_work_lookup_fake::*;
pub use role_repo_memory::*;
pub use user_repo_memory::*;
