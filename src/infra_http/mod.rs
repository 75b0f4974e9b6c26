mod keycloak_gateway;
mod open_work_client;

pub use keycloak_gateway::*;
pub use open_work_client::*;
