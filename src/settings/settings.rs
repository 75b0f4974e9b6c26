use anyhow::{Result, anyhow};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub log: Log,
    pub user: User,
    pub mysql: MySql,
    pub identity_provider: IdentityProvider,
    pub lookup: Lookup,
    pub http_client: HttpClient,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub backend: String, // "fake" or "real"
}

#[derive(Debug, Deserialize)]
pub struct MySql {
    pub dsn: Secret,
}

#[derive(Debug, Deserialize)]
pub struct IdentityProvider {
    pub backend: String, // "fake" or "keycloak"
    pub base_url: String,
    pub realm: String,
    pub client_id: String,
    pub client_secret: Secret,
}

#[derive(Debug, Deserialize)]
pub struct Lookup {
    pub backend: String, // "fake" or "http"
    pub project_base_url: String,
    pub task_base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct HttpClient {
    pub timeout_secs: u64,
}

/// Keeps credentials out of `Debug` output.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"***\"")
    }
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

/// Loads the TOML file at `path` (or the build profile's default), then lets
/// `USER_DIRECTORY__SECTION__KEY` environment variables override single keys.
pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .add_source(Environment::with_prefix("USER_DIRECTORY").separator("__"))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_settings_use_fake_backends() {
        let settings = parse_settings(Some("settings/dev.toml")).unwrap();
        assert_eq!(settings.user.backend, "fake");
        assert_eq!(settings.identity_provider.backend, "fake");
        assert_eq!(settings.lookup.backend, "fake");
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let settings = parse_settings(Some("settings/release.toml")).unwrap();
        let printed = format!("{settings:?}");
        assert!(!printed.contains(settings.identity_provider.client_secret.expose()));
        assert!(printed.contains("***"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(parse_settings(Some("settings/does-not-exist.toml")).is_err());
    }
}
