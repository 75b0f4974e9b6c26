use super::error::ApiError;
use super::response::ApiResponse;
use crate::application_port::UserDto;
use crate::domain_model::Role;
use crate::server::Server;
use crate::settings::{Command, ProfileArgs};
use serde::Serialize;
use serde_json::Value;

fn to_value<T: Serialize>(data: T) -> Result<Value, ApiError> {
    serde_json::to_value(data).map_err(ApiError::internal)
}

fn user_dto(username: String, role: Option<Role>, profile: ProfileArgs) -> UserDto {
    UserDto {
        id: None,
        first_name: profile.first_name,
        last_name: profile.last_name,
        username,
        password: profile.password,
        enabled: true,
        phone: profile.phone,
        role,
        gender: profile.gender,
    }
}

async fn run(server: &Server, command: Command) -> Result<Value, ApiError> {
    let users = &server.user_service;

    match command {
        Command::Create {
            username,
            role,
            profile,
        } => to_value(users.create(user_dto(username, Some(role), profile)).await?),
        Command::Read { username } => to_value(users.read_by_username(&username).await?),
        Command::List => to_value(users.read_all().await?),
        Command::Check { username } => to_value(users.check_by_username(&username).await?),
        Command::Update { username, profile } => {
            let dto = user_dto(username.clone(), None, profile);
            to_value(users.update(&username, dto).await?)
        }
        Command::Delete { username } => {
            users.delete(&username).await?;
            Ok(Value::Null)
        }
        Command::Role { description } => {
            to_value(server.role_service.read_by_description(&description).await?)
        }
    }
}

pub async fn execute(server: &Server, command: Command) -> ApiResponse<Value> {
    run(server, command).await.into()
}
