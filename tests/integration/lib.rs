//! Shared fixtures for the keystash integration tests.

use std::sync::Arc;

use keystash_secrets::{MemoryVault, SecretStore};

/// A store over a fresh in-memory vault.
pub fn memory_store(service: &str) -> SecretStore<Arc<MemoryVault>> {
    SecretStore::new(service, Arc::new(MemoryVault::new()))
}

/// A second store sharing `store`'s vault under another service.
pub fn sibling_store(
    store: &SecretStore<Arc<MemoryVault>>,
    service: &str,
) -> SecretStore<Arc<MemoryVault>> {
    SecretStore::new(service, Arc::clone(store.vault()))
}
