use crate::domain_port::{LookupError, OpenWorkLookup};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

const PROJECT_COUNT_BY_MANAGER: &[&str] = &["api", "v1", "project", "count", "manager"];
const TASK_COUNT_BY_EMPLOYEE: &[&str] = &["api", "v1", "task", "count", "employee"];

/// Envelope the sibling services wrap every response in.
#[derive(Debug, Deserialize)]
struct ResponseWrapper {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<i64>,
}

/// `GET {base}/api/v1/{project|task}/count/{manager|employee}/{owner}`
pub struct HttpOpenWorkLookup {
    client: Client,
    base_url: Url,
    segments: &'static [&'static str],
}

impl HttpOpenWorkLookup {
    pub fn projects(client: Client, base_url: Url) -> Self {
        HttpOpenWorkLookup {
            client,
            base_url,
            segments: PROJECT_COUNT_BY_MANAGER,
        }
    }

    pub fn tasks(client: Client, base_url: Url) -> Self {
        HttpOpenWorkLookup {
            client,
            base_url,
            segments: TASK_COUNT_BY_EMPLOYEE,
        }
    }

    fn url_for(&self, owner: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| LookupError::Transport(format!("invalid base url {}", self.base_url)))?
            .pop_if_empty()
            .extend(self.segments)
            .push(owner);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl OpenWorkLookup for HttpOpenWorkLookup {
    #[instrument(skip_all, fields(base_url = %self.base_url, %owner))]
    async fn non_completed_count(&self, owner: &str) -> Result<u32, LookupError> {
        let url = self.url_for(owner)?;

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let parsed = serde_json::from_slice::<Option<ResponseWrapper>>(&body);

        if !status.is_success() {
            let detail = match parsed {
                Ok(Some(ResponseWrapper {
                    message: Some(message),
                    ..
                })) => format!("HTTP {status}: {message}"),
                _ => format!("HTTP {status}"),
            };
            return Err(LookupError::Transport(detail));
        }

        let wrapper = match parsed {
            Ok(Some(wrapper)) => wrapper,
            Ok(None) => return Err(LookupError::EmptyBody),
            Err(_) if body.is_empty() => return Err(LookupError::EmptyBody),
            Err(e) => return Err(LookupError::Unsuccessful(format!("unreadable body: {e}"))),
        };

        if !wrapper.success {
            return Err(LookupError::Unsuccessful(
                wrapper
                    .message
                    .unwrap_or_else(|| "lookup reported failure".to_owned()),
            ));
        }

        let data = wrapper.data.ok_or(LookupError::EmptyBody)?;
        u32::try_from(data).map_err(|_| LookupError::Unsuccessful(format!("invalid count {data}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn lookup(server: &MockServer) -> HttpOpenWorkLookup {
        let base = Url::parse(&server.base_url()).unwrap();
        HttpOpenWorkLookup::projects(Client::new(), base)
    }

    #[tokio::test]
    async fn returns_count_from_successful_envelope() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/v1/project/count/manager/alice");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"success":true,"message":"Projects are retrieved","code":200,"data":3}"#);
        });

        let count = lookup(&server).non_completed_count("alice").await.unwrap();

        assert_eq!(count, 3);
        mock.assert();
    }

    #[tokio::test]
    async fn task_lookup_uses_employee_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/v1/task/count/employee/bob");
            then.status(200).body(r#"{"success":true,"data":0}"#);
        });
        let base = Url::parse(&server.base_url()).unwrap();
        let lookup = HttpOpenWorkLookup::tasks(Client::new(), base);

        assert_eq!(lookup.non_completed_count("bob").await.unwrap(), 0);
        mock.assert();
    }

    #[tokio::test]
    async fn unsuccessful_envelope_is_not_zero() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/project/count/manager/alice");
            then.status(200)
                .body(r#"{"success":false,"message":"Project service unavailable","data":0}"#);
        });

        let err = lookup(&server).non_completed_count("alice").await.unwrap_err();

        assert_eq!(
            err,
            LookupError::Unsuccessful("Project service unavailable".to_string())
        );
    }

    #[tokio::test]
    async fn null_body_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/project/count/manager/alice");
            then.status(200).body("null");
        });

        let err = lookup(&server).non_completed_count("alice").await.unwrap_err();

        assert_eq!(err, LookupError::EmptyBody);
    }

    #[tokio::test]
    async fn missing_data_is_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/project/count/manager/alice");
            then.status(200).body(r#"{"success":true}"#);
        });

        let err = lookup(&server).non_completed_count("alice").await.unwrap_err();

        assert_eq!(err, LookupError::EmptyBody);
    }

    #[tokio::test]
    async fn server_error_without_envelope_is_transport_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/project/count/manager/alice");
            then.status(502).body("Bad Gateway");
        });

        let err = lookup(&server).non_completed_count("alice").await.unwrap_err();

        assert!(matches!(err, LookupError::Transport(msg) if msg.contains("502")));
    }

    #[tokio::test]
    async fn server_error_with_success_envelope_is_not_a_count() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/project/count/manager/alice");
            then.status(500)
                .header("content-type", "application/json")
                .body(r#"{"success":true,"message":"Internal Server Error","data":0}"#);
        });

        let err = lookup(&server).non_completed_count("alice").await.unwrap_err();

        assert!(matches!(err, LookupError::Transport(msg) if msg.contains("500")));
    }
}
