use crate::domain_port::*;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityProviderCall {
    Create(String),
    Update(String),
    Delete(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityProviderOp {
    Create,
    Update,
    Delete,
}

/// Records every call. Optionally rejects one kind of operation.
#[derive(Debug, Default)]
pub struct FakeIdentityProvider {
    calls: Mutex<Vec<IdentityProviderCall>>,
    failing: Option<IdentityProviderOp>,
}

impl FakeIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(op: IdentityProviderOp) -> Self {
        FakeIdentityProvider {
            calls: Mutex::default(),
            failing: Some(op),
        }
    }

    pub fn calls(&self) -> Vec<IdentityProviderCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(
        &self,
        op: IdentityProviderOp,
        call: IdentityProviderCall,
    ) -> Result<(), IdentityProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.failing == Some(op) {
            return Err(IdentityProviderError::Rejected {
                status: 503,
                message: format!("simulated {op:?} failure"),
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn create_user(&self, profile: &CredentialProfile) -> Result<(), IdentityProviderError> {
        self.record(
            IdentityProviderOp::Create,
            IdentityProviderCall::Create(profile.username.clone()),
        )
    }

    async fn update_user(&self, profile: &CredentialProfile) -> Result<(), IdentityProviderError> {
        self.record(
            IdentityProviderOp::Update,
            IdentityProviderCall::Update(profile.username.clone()),
        )
    }

    async fn delete_user(&self, username: &str) -> Result<(), IdentityProviderError> {
        self.record(
            IdentityProviderOp::Delete,
            IdentityProviderCall::Delete(username.to_owned()),
        )
    }
}
