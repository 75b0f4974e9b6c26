/// Read-only count of non-completed work attributed to an owner, served by a
/// sibling service.
#[async_trait::async_trait]
pub trait OpenWorkLookup: Send + Sync {
    async fn non_completed_count(&self, owner: &str) -> Result<u32, LookupError>;
}

/// Any way the count can fail to arrive. None of these may be read as zero.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("lookup reported failure: {0}")]
    Unsuccessful(String),
    #[error("lookup returned no count")]
    EmptyBody,
    #[error("lookup request failed: {0}")]
    Transport(String),
}
