//! Service-scoped secret storage for keystash.
//!
//! A [`SecretStore`] keeps short string secrets (tokens, passwords) under
//! string keys, isolated by a service namespace. Every operation builds a
//! [`Query`], hands it to a [`Vault`] primitive and maps the returned
//! [`Status`] into a [`StoreError`].
//!
//! The vault is injected. [`KeychainVault`] talks to the macOS keychain;
//! `MemoryVault` (behind the `test-utils` feature) keeps items in memory and
//! records every call, which is what the test suites run against.

pub mod error;
pub mod keychain;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod query;
pub mod status;
pub mod store;
pub mod vault;

pub use error::{Result, StoreError};
pub use keychain::{platform_vault, KeychainVault};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::{MemoryVault, Primitive, VaultCall};
pub use query::{Attribute, Query, Value};
pub use status::Status;
pub use store::SecretStore;
pub use vault::{SearchResult, Vault};
