mod role_service_impl;
mod user_service_impl;

pub use role_service_impl::*;
pub use user_service_impl::*;
