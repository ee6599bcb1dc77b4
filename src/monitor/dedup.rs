use std::collections::HashSet;
use tokio::sync::RwLock;

/// Token addresses already alerted on during this process lifetime.
#[derive(Debug, Default)]
pub struct SeenTokens {
    addresses: RwLock<HashSet<String>>,
}

impl SeenTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn has(&self, address: &str) -> bool {
        self.addresses.read().await.contains(address)
    }

    /// Records `address`; returns false when it was already present.
    pub async fn mark_seen(&self, address: &str) -> bool {
        self.addresses.write().await.insert(address.to_string())
    }

    pub async fn len(&self) -> usize {
        self.addresses.read().await.len()
    }
}
