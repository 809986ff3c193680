//! The vault primitive contract.

use std::sync::Arc;

use crate::query::Query;
use crate::status::Status;

/// Object returned by a successful search.
#[derive(Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// The raw payload of the matched item.
    Data(Vec<u8>),
    /// Anything that is not a byte blob (attribute dictionaries, arrays of
    /// matches, references). The store treats this as a vault anomaly.
    Other,
}

impl std::fmt::Debug for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Data(d) => write!(f, "Data([REDACTED; {} bytes])", d.len()),
            Self::Other => f.write_str("Other"),
        }
    }
}

/// A secure credential vault addressed by status-coded primitive calls.
///
/// Each call is a single blocking round-trip. Implementations serialize
/// individual primitives but offer nothing across calls; callers composing
/// several primitives (like [`crate::SecretStore::set`]) are not atomic.
pub trait Vault: Send + Sync {
    /// Look up items matching `query`.
    fn search(&self, query: &Query) -> (Status, Option<SearchResult>);

    /// Insert the item described by `query`.
    fn insert(&self, query: &Query) -> Status;

    /// Replace attributes of the items matching `query` with `attributes`.
    fn update(&self, query: &Query, attributes: &Query) -> Status;

    /// Delete the items matching `query`.
    fn delete(&self, query: &Query) -> Status;
}

impl<V: Vault + ?Sized> Vault for &V {
    fn search(&self, query: &Query) -> (Status, Option<SearchResult>) {
        (**self).search(query)
    }

    fn insert(&self, query: &Query) -> Status {
        (**self).insert(query)
    }

    fn update(&self, query: &Query, attributes: &Query) -> Status {
        (**self).update(query, attributes)
    }

    fn delete(&self, query: &Query) -> Status {
        (**self).delete(query)
    }
}

impl<V: Vault + ?Sized> Vault for Box<V> {
    fn search(&self, query: &Query) -> (Status, Option<SearchResult>) {
        (**self).search(query)
    }

    fn insert(&self, query: &Query) -> Status {
        (**self).insert(query)
    }

    fn update(&self, query: &Query, attributes: &Query) -> Status {
        (**self).update(query, attributes)
    }

    fn delete(&self, query: &Query) -> Status {
        (**self).delete(query)
    }
}

impl<V: Vault + ?Sized> Vault for Arc<V> {
    fn search(&self, query: &Query) -> (Status, Option<SearchResult>) {
        (**self).search(query)
    }

    fn insert(&self, query: &Query) -> Status {
        (**self).insert(query)
    }

    fn update(&self, query: &Query, attributes: &Query) -> Status {
        (**self).update(query, attributes)
    }

    fn delete(&self, query: &Query) -> Status {
        (**self).delete(query)
    }
}
