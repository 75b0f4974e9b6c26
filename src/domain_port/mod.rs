// store

mod role_repo;
mod user_repo;

pub use role_repo::*;
pub use user_repo::*;

// remote

mod identity_provider;
mod open_work_lookup;

pub use identity_provider::*;
pub use open_work_lookup::*;
