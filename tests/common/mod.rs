#![allow(dead_code)]

use std::sync::Arc;
use user_directory::application_impl::RealUserService;
use user_directory::application_port::{UserDto, UserService};
use user_directory::domain_model::{Gender, Role};
use user_directory::domain_port::UserRepo;
use user_directory::infra_memory::*;

pub struct Harness {
    pub repo: Arc<InMemoryUserRepo>,
    pub idp: Arc<FakeIdentityProvider>,
    pub projects: Arc<FakeOpenWorkLookup>,
    pub tasks: Arc<FakeOpenWorkLookup>,
    pub service: RealUserService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_identity_provider(FakeIdentityProvider::new())
    }

    pub fn with_identity_provider(idp: FakeIdentityProvider) -> Self {
        let repo = Arc::new(InMemoryUserRepo::new());
        Self::with_parts(repo.clone(), repo, idp)
    }

    /// `store` is what the service talks to; `repo` is what the test inspects.
    pub fn with_parts(
        repo: Arc<InMemoryUserRepo>,
        store: Arc<dyn UserRepo>,
        idp: FakeIdentityProvider,
    ) -> Self {
        let idp = Arc::new(idp);
        let projects = Arc::new(FakeOpenWorkLookup::new());
        let tasks = Arc::new(FakeOpenWorkLookup::new());
        let service = RealUserService::new(store, idp.clone(), projects.clone(), tasks.clone());

        Harness {
            repo,
            idp,
            projects,
            tasks,
            service,
        }
    }

    pub async fn seed(&self, username: &str, role: Role) -> UserDto {
        self.service
            .create(dto(username, role))
            .await
            .expect("seed user")
    }
}

pub fn dto(username: &str, role: Role) -> UserDto {
    UserDto {
        id: None,
        first_name: capitalize(username),
        last_name: "Tester".into(),
        username: username.into(),
        password: Some("Abc1".into()),
        enabled: false,
        phone: "5550100".into(),
        role: Some(role),
        gender: Gender::Female,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
