use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_http::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::Settings;
use anyhow::anyhow;
use sqlx::{MySql, Pool};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub struct Server {
    pub user_service: Arc<dyn UserService>,
    pub role_service: Arc<dyn RoleService>,
    pool: Option<Pool<MySql>>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_client.timeout_secs))
            .build()?;

        let (user_repo, role_repo, pool): (Arc<dyn UserRepo>, Arc<dyn RoleRepo>, _) =
            match settings.user.backend.as_str() {
                "fake" => (
                    Arc::new(InMemoryUserRepo::new()),
                    Arc::new(InMemoryRoleRepo::seeded()),
                    None,
                ),
                "real" => {
                    let pool = Pool::<MySql>::connect(settings.mysql.dsn.expose()).await?;
                    (
                        Arc::new(MySqlUserRepo::new(pool.clone())),
                        Arc::new(MySqlRoleRepo::new(pool.clone())),
                        Some(pool),
                    )
                }
                other => return Err(anyhow!("Unknown user backend: {}", other)),
            };

        let idp = &settings.identity_provider;
        let identity_provider: Arc<dyn IdentityProvider> = match idp.backend.as_str() {
            "fake" => Arc::new(FakeIdentityProvider::new()),
            "keycloak" => Arc::new(KeycloakGateway::new(
                http_client.clone(),
                KeycloakConfig {
                    base_url: Url::parse(&idp.base_url)?,
                    realm: idp.realm.clone(),
                    client_id: idp.client_id.clone(),
                    client_secret: idp.client_secret.expose().to_owned(),
                },
            )),
            other => return Err(anyhow!("Unknown identity provider backend: {}", other)),
        };

        let lookup = &settings.lookup;
        let (project_lookup, task_lookup): (Arc<dyn OpenWorkLookup>, Arc<dyn OpenWorkLookup>) =
            match lookup.backend.as_str() {
                "fake" => (
                    Arc::new(FakeOpenWorkLookup::new()),
                    Arc::new(FakeOpenWorkLookup::new()),
                ),
                "http" => (
                    Arc::new(HttpOpenWorkLookup::projects(
                        http_client.clone(),
                        Url::parse(&lookup.project_base_url)?,
                    )),
                    Arc::new(HttpOpenWorkLookup::tasks(
                        http_client.clone(),
                        Url::parse(&lookup.task_base_url)?,
                    )),
                ),
                other => return Err(anyhow!("Unknown lookup backend: {}", other)),
            };

        let user_service: Arc<dyn UserService> = Arc::new(RealUserService::new(
            user_repo,
            identity_provider,
            project_lookup,
            task_lookup,
        ));
        let role_service: Arc<dyn RoleService> = Arc::new(RealRoleService::new(role_repo));

        debug!(
            user = %settings.user.backend,
            identity_provider = %idp.backend,
            lookup = %lookup.backend,
            "server wired"
        );

        Ok(Self {
            user_service,
            role_service,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
        debug!("server shut down");
    }
}
