use crate::domain_port::{LookupError, OpenWorkLookup};
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers from a per-owner table; owners not in the table have no open work.
#[derive(Debug, Default)]
pub struct FakeOpenWorkLookup {
    responses: Mutex<HashMap<String, Result<u32, LookupError>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeOpenWorkLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, owner: &str, response: Result<u32, LookupError>) -> Self {
        self.set(owner, response);
        self
    }

    pub fn set(&self, owner: &str, response: Result<u32, LookupError>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(owner.to_owned(), response);
        }
    }

    /// Owners queried so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl OpenWorkLookup for FakeOpenWorkLookup {
    async fn non_completed_count(&self, owner: &str) -> Result<u32, LookupError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(owner.to_owned());
        }

        let responses = self
            .responses
            .lock()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        responses.get(owner).cloned().unwrap_or(Ok(0))
    }
}
