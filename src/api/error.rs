use crate::application_port::*;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum ApiErrorCode {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Role not found")]
    RoleNotFound,
    #[error("Role missing")]
    MissingRole,
    #[error("Project count not retrieved")]
    ProjectCountNotRetrieved,
    #[error("Task count not retrieved")]
    TaskCountNotRetrieved,
    #[error("User can not be deleted")]
    UserCanNotBeDeleted,
    #[error("Concurrent modification")]
    Conflict,
    #[error("Identity provider error")]
    IdentityProviderError,
    #[error("Internal error")]
    InternalError,
}

impl ApiError {
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn internal<E: std::fmt::Display>(error: E) -> ApiError {
        warn!("Internal error: {}", error);
        ApiError::new(ApiErrorCode::InternalError, ApiErrorCode::InternalError.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        let code = match &error {
            UserError::UserAlreadyExists => ApiErrorCode::UserAlreadyExists,
            UserError::UserNotFound => ApiErrorCode::UserNotFound,
            UserError::MissingRole => ApiErrorCode::MissingRole,
            UserError::ProjectCountNotRetrieved => ApiErrorCode::ProjectCountNotRetrieved,
            UserError::TaskCountNotRetrieved => ApiErrorCode::TaskCountNotRetrieved,
            UserError::UserCanNotBeDeleted { .. } => ApiErrorCode::UserCanNotBeDeleted,
            UserError::Conflict => ApiErrorCode::Conflict,
            UserError::IdentityProvider(_) => ApiErrorCode::IdentityProviderError,
            UserError::Store(e) => return ApiError::internal(e),
        };
        ApiError::new(code, error.to_string())
    }
}

impl From<RoleError> for ApiError {
    fn from(error: RoleError) -> Self {
        match &error {
            RoleError::RoleNotFound => ApiError::new(ApiErrorCode::RoleNotFound, error.to_string()),
            RoleError::Store(e) => ApiError::internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::OpenWorkDependency;

    #[test]
    fn rejected_delete_keeps_linked_message() {
        let error = ApiError::from(UserError::linked_to(OpenWorkDependency::Tasks));
        assert_eq!(error.code, ApiErrorCode::UserCanNotBeDeleted);
        assert_eq!(
            error.message,
            "User cannot be deleted. User is linked to task(s)"
        );
    }

    #[test]
    fn store_failures_do_not_leak_details() {
        let error = ApiError::from(UserError::Store("connection refused 10.0.0.5".into()));
        assert_eq!(error.code, ApiErrorCode::InternalError);
        assert!(!error.message.contains("10.0.0.5"));
    }

    #[test]
    fn codes_serialize_as_names() {
        let json = serde_json::to_value(ApiError::from(UserError::ProjectCountNotRetrieved)).unwrap();
        assert_eq!(json["code"], "ProjectCountNotRetrieved");
        assert_eq!(json["message"], "Project count cannot be retrieved.");
    }
}
