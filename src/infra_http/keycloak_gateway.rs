use crate::domain_model::Role;
use crate::domain_port::*;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct KeycloakConfig {
    pub base_url: Url,
    pub realm: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct FoundUser {
    id: Uuid,
    username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserRepresentation<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    email_verified: bool,
    enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    credentials: Vec<PasswordCredential<'a>>,
}

#[derive(Debug, Serialize)]
struct PasswordCredential<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
    temporary: bool,
}

impl<'a> PasswordCredential<'a> {
    fn new(value: &'a str) -> Self {
        PasswordCredential {
            kind: "password",
            value,
            temporary: false,
        }
    }
}

/// Keycloak admin REST adapter. Authenticates as a confidential client with the
/// client-credentials grant, one token per operation.
pub struct KeycloakGateway {
    client: Client,
    cfg: KeycloakConfig,
}

impl KeycloakGateway {
    pub fn new(client: Client, cfg: KeycloakConfig) -> Self {
        KeycloakGateway { client, cfg }
    }

    fn url(&self, segments: &[&str]) -> Result<Url, IdentityProviderError> {
        let mut url = self.cfg.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                IdentityProviderError::Request(format!("invalid base url {}", self.cfg.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn admin_url(&self, tail: &[&str]) -> Result<Url, IdentityProviderError> {
        let mut segments = vec!["admin", "realms", self.cfg.realm.as_str()];
        segments.extend_from_slice(tail);
        self.url(&segments)
    }

    async fn admin_token(&self) -> Result<String, IdentityProviderError> {
        let url = self.url(&[
            "realms",
            self.cfg.realm.as_str(),
            "protocol",
            "openid-connect",
            "token",
        ])?;

        let response = self
            .client
            .post(url.as_str())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.cfg.client_id.as_str()),
                ("client_secret", self.cfg.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(request_error)?;

        let token: TokenResponse = expect_success(response)
            .await?
            .json()
            .await
            .map_err(request_error)?;
        Ok(token.access_token)
    }

    async fn find_user_id(&self, token: &str, username: &str) -> Result<Uuid, IdentityProviderError> {
        let mut url = self.admin_url(&["users"])?;
        url.query_pairs_mut()
            .append_pair("username", username)
            .append_pair("exact", "true");

        let response = self
            .client
            .get(url.as_str())
            .bearer_auth(token)
            .send()
            .await
            .map_err(request_error)?;

        let found: Vec<FoundUser> = expect_success(response)
            .await?
            .json()
            .await
            .map_err(request_error)?;

        // keycloak stores usernames lowercased
        found
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .map(|u| u.id)
            .ok_or_else(|| IdentityProviderError::NotFound(username.to_owned()))
    }

    async fn assign_realm_role(
        &self,
        token: &str,
        user_id: Uuid,
        role: Role,
    ) -> Result<(), IdentityProviderError> {
        let role_url = self.admin_url(&["roles", role.description()])?;
        let response = self
            .client
            .get(role_url.as_str())
            .bearer_auth(token)
            .send()
            .await
            .map_err(request_error)?;
        let representation: serde_json::Value = expect_success(response)
            .await?
            .json()
            .await
            .map_err(request_error)?;

        let user_id = user_id.to_string();
        let mapping_url =
            self.admin_url(&["users", user_id.as_str(), "role-mappings", "realm"])?;
        let response = self
            .client
            .post(mapping_url.as_str())
            .bearer_auth(token)
            .json(&[representation])
            .send()
            .await
            .map_err(request_error)?;
        expect_success(response).await?;

        Ok(())
    }
}

fn request_error(e: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::Request(e.to_string())
}

async fn expect_success(response: Response) -> Result<Response, IdentityProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(IdentityProviderError::Rejected {
        status: status.as_u16(),
        message,
    })
}

fn created_id(response: &Response) -> Option<Uuid> {
    response
        .headers()
        .get(reqwest::header::LOCATION)?
        .to_str()
        .ok()?
        .rsplit('/')
        .next()?
        .parse()
        .ok()
}

#[async_trait::async_trait]
impl IdentityProvider for KeycloakGateway {
    #[instrument(skip_all, fields(realm = %self.cfg.realm, username = %profile.username))]
    async fn create_user(&self, profile: &CredentialProfile) -> Result<(), IdentityProviderError> {
        let token = self.admin_token().await?;

        let representation = UserRepresentation {
            username: Some(profile.username.as_str()),
            first_name: &profile.first_name,
            last_name: &profile.last_name,
            email: &profile.username,
            email_verified: true,
            enabled: profile.enabled,
            credentials: profile
                .password
                .as_deref()
                .map(PasswordCredential::new)
                .into_iter()
                .collect(),
        };

        let response = self
            .client
            .post(self.admin_url(&["users"])?.as_str())
            .bearer_auth(&token)
            .json(&representation)
            .send()
            .await
            .map_err(request_error)?;
        let response = expect_success(response).await?;

        let user_id = match created_id(&response) {
            Some(id) => id,
            None => self.find_user_id(&token, &profile.username).await?,
        };
        debug!(%user_id, "credential created");

        self.assign_realm_role(&token, user_id, profile.role).await
    }

    #[instrument(skip_all, fields(realm = %self.cfg.realm, username = %profile.username))]
    async fn update_user(&self, profile: &CredentialProfile) -> Result<(), IdentityProviderError> {
        let token = self.admin_token().await?;
        let user_id = self.find_user_id(&token, &profile.username).await?.to_string();

        let representation = UserRepresentation {
            username: None,
            first_name: &profile.first_name,
            last_name: &profile.last_name,
            email: &profile.username,
            email_verified: true,
            enabled: profile.enabled,
            credentials: Vec::new(),
        };
        let response = self
            .client
            .put(self.admin_url(&["users", user_id.as_str()])?.as_str())
            .bearer_auth(&token)
            .json(&representation)
            .send()
            .await
            .map_err(request_error)?;
        expect_success(response).await?;

        if let Some(password) = profile.password.as_deref() {
            let response = self
                .client
                .put(
                    self.admin_url(&["users", user_id.as_str(), "reset-password"])?
                        .as_str(),
                )
                .bearer_auth(&token)
                .json(&PasswordCredential::new(password))
                .send()
                .await
                .map_err(request_error)?;
            expect_success(response).await?;
        }

        Ok(())
    }

    #[instrument(skip_all, fields(realm = %self.cfg.realm, %username))]
    async fn delete_user(&self, username: &str) -> Result<(), IdentityProviderError> {
        let token = self.admin_token().await?;
        let user_id = self.find_user_id(&token, username).await?.to_string();

        let response = self
            .client
            .delete(self.admin_url(&["users", user_id.as_str()])?.as_str())
            .bearer_auth(&token)
            .send()
            .await
            .map_err(request_error)?;
        expect_success(response).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const USER_ID: &str = "5f0c7a4e-8d3b-4a57-9a43-6c1f0c2b7e11";

    fn gateway(server: &MockServer) -> KeycloakGateway {
        KeycloakGateway::new(
            Client::new(),
            KeycloakConfig {
                base_url: Url::parse(&server.base_url()).unwrap(),
                realm: "teambridge".into(),
                client_id: "user-service".into(),
                client_secret: "s3cret".into(),
            },
        )
    }

    fn profile() -> CredentialProfile {
        CredentialProfile {
            username: "alice@teambridge.com".into(),
            first_name: "Alice".into(),
            last_name: "Archer".into(),
            password: Some("Abc1".into()),
            role: Role::Manager,
            enabled: true,
        }
    }

    fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(POST)
                .path("/realms/teambridge/protocol/openid-connect/token")
                .body_includes("grant_type=client_credentials");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"access_token":"tok","expires_in":300,"token_type":"Bearer"}"#);
        })
    }

    fn mock_find(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET)
                .path("/admin/realms/teambridge/users")
                .query_param("username", "alice@teambridge.com")
                .query_param("exact", "true")
                .header("authorization", "Bearer tok");
            then.status(200)
                .json_body(json!([{ "id": USER_ID, "username": "alice@teambridge.com" }]));
        })
    }

    #[tokio::test]
    async fn create_posts_user_and_maps_realm_role() {
        let server = MockServer::start();
        let token = mock_token(&server);
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/admin/realms/teambridge/users")
                .header("authorization", "Bearer tok")
                .body_includes(r#""username":"alice@teambridge.com""#)
                .body_includes(r#""type":"password""#);
            then.status(201).header(
                "location",
                format!("{}/admin/realms/teambridge/users/{USER_ID}", server.base_url()),
            );
        });
        let role = server.mock(|when, then| {
            when.method(GET).path("/admin/realms/teambridge/roles/Manager");
            then.status(200)
                .json_body(json!({ "id": "r-1", "name": "Manager" }));
        });
        let mapping = server.mock(|when, then| {
            when.method(POST)
                .path(format!("/admin/realms/teambridge/users/{USER_ID}/role-mappings/realm"))
                .body_includes(r#""name":"Manager""#);
            then.status(204);
        });

        gateway(&server).create_user(&profile()).await.unwrap();

        token.assert();
        create.assert();
        role.assert();
        mapping.assert();
    }

    #[tokio::test]
    async fn create_conflict_is_rejected() {
        let server = MockServer::start();
        mock_token(&server);
        server.mock(|when, then| {
            when.method(POST).path("/admin/realms/teambridge/users");
            then.status(409)
                .body(r#"{"errorMessage":"User exists with same username"}"#);
        });

        let err = gateway(&server).create_user(&profile()).await.unwrap_err();

        assert!(matches!(err, IdentityProviderError::Rejected { status: 409, .. }));
    }

    #[tokio::test]
    async fn update_puts_representation_and_resets_password() {
        let server = MockServer::start();
        mock_token(&server);
        let find = mock_find(&server);
        let put = server.mock(|when, then| {
            when.method(PUT)
                .path(format!("/admin/realms/teambridge/users/{USER_ID}"))
                .body_includes(r#""firstName":"Alice""#);
            then.status(204);
        });
        let reset = server.mock(|when, then| {
            when.method(PUT)
                .path(format!("/admin/realms/teambridge/users/{USER_ID}/reset-password"))
                .body_includes(r#""value":"Abc1""#);
            then.status(204);
        });

        gateway(&server).update_user(&profile()).await.unwrap();

        find.assert();
        put.assert();
        reset.assert();
    }

    #[tokio::test]
    async fn delete_removes_user_found_by_username() {
        let server = MockServer::start();
        mock_token(&server);
        mock_find(&server);
        let delete = server.mock(|when, then| {
            when.method(DELETE)
                .path(format!("/admin/realms/teambridge/users/{USER_ID}"))
                .header("authorization", "Bearer tok");
            then.status(204);
        });

        gateway(&server)
            .delete_user("alice@teambridge.com")
            .await
            .unwrap();

        delete.assert();
    }

    #[tokio::test]
    async fn delete_of_unknown_credential_is_not_found() {
        let server = MockServer::start();
        mock_token(&server);
        server.mock(|when, then| {
            when.method(GET).path("/admin/realms/teambridge/users");
            then.status(200).json_body(json!([]));
        });

        let err = gateway(&server).delete_user("ghost").await.unwrap_err();

        assert!(matches!(err, IdentityProviderError::NotFound(name) if name == "ghost"));
    }

    #[tokio::test]
    async fn token_refusal_surfaces_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/realms/teambridge/protocol/openid-connect/token");
            then.status(401).body(r#"{"error":"unauthorized_client"}"#);
        });

        let err = gateway(&server).delete_user("alice").await.unwrap_err();

        assert!(matches!(err, IdentityProviderError::Rejected { status: 401, .. }));
    }
}
