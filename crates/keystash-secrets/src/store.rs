//! Service-scoped secret store.
//!
//! [`SecretStore`] keeps one UTF-8 string per key under a fixed service
//! namespace. It holds no state of its own: every operation is built as a
//! [`Query`], sent to the [`Vault`] in a single primitive call (two for
//! [`SecretStore::set`]) and the resulting [`Status`] is mapped to
//! [`StoreError`].

use crate::error::{Result, StoreError};
use crate::query::{Attribute, Query, Value};
use crate::status::Status;
use crate::vault::{SearchResult, Vault};

/// A keyed string store over a vault, scoped to one service.
pub struct SecretStore<V = Box<dyn Vault>> {
    service: String,
    vault: V,
}

impl<V: Vault> SecretStore<V> {
    /// Create a store for `service` over `vault`.
    pub fn new(service: impl Into<String>, vault: V) -> Self {
        Self {
            service: service.into(),
            vault,
        }
    }

    /// The service namespace every query is bound to.
    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Get the string saved under `key`, or `None` if nothing has been saved.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let query = self.get_query(key);
        let (status, result) = self.vault.search(&query);

        match status {
            Status::SUCCESS => {
                let Some(SearchResult::Data(data)) = result else {
                    return Err(StoreError::UnexpectedError);
                };
                String::from_utf8(data)
                    .map(Some)
                    .map_err(|_| StoreError::ConversionFailure)
            }
            Status::ITEM_NOT_FOUND => Ok(None),
            status => Err(StoreError::UnexpectedStatus(status)),
        }
    }

    /// Whether anything is saved under `key`.
    pub fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Save `value` under `key`, adding the item or updating it in place.
    ///
    /// This is a lookup followed by an insert or an update, not one atomic
    /// vault operation. Two concurrent `set` calls for the same key may both
    /// take the insert branch, in which case one fails with
    /// [`StoreError::UnexpectedStatus`] carrying [`Status::DUPLICATE_ITEM`];
    /// concurrent updates resolve as last write wins.
    pub fn set(&self, value: &str, key: &str) -> Result<()> {
        match self.get(key)? {
            None => self.add(value, key),
            Some(_) => self.update(value, key),
        }
    }

    /// Insert a new item. Fails if one already exists for `key`.
    fn add(&self, value: &str, key: &str) -> Result<()> {
        let query = self
            .mutation_query(key)
            .with(Attribute::ValueData, Value::Data(encode(value)));

        let status = self.vault.insert(&query);
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus(status));
        }
        Ok(())
    }

    /// Replace the value of an existing item.
    ///
    /// Returns [`StoreError::ItemNotFound`] when nothing is stored under
    /// `key`, so callers can decide whether that matters to them.
    pub fn update(&self, value: &str, key: &str) -> Result<()> {
        let query = self.mutation_query(key);
        let attributes = Query::new().with(Attribute::ValueData, Value::Data(encode(value)));

        match self.vault.update(&query, &attributes) {
            Status::SUCCESS => Ok(()),
            Status::ITEM_NOT_FOUND => Err(StoreError::ItemNotFound),
            status => Err(StoreError::UnexpectedStatus(status)),
        }
    }

    /// Remove the value saved under `key`.
    ///
    /// Removing a key that holds nothing is an error
    /// ([`StoreError::UnexpectedStatus`] with [`Status::ITEM_NOT_FOUND`]),
    /// unlike [`SecretStore::remove_all`].
    pub fn remove(&self, key: &str) -> Result<()> {
        let query = self.mutation_query(key);

        let status = self.vault.delete(&query);
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus(status));
        }
        Ok(())
    }

    /// Remove every value saved under the service. An empty service is fine.
    pub fn remove_all(&self) -> Result<()> {
        let query = self.remove_all_query();

        match self.vault.delete(&query) {
            Status::SUCCESS | Status::ITEM_NOT_FOUND => Ok(()),
            status => Err(StoreError::UnexpectedStatus(status)),
        }
    }

    /// Attributes shared by every query: generic passwords in this service,
    /// synchronized or not.
    pub fn common_query(&self) -> Query {
        Query::new()
            .with(Attribute::Class, Value::GenericPassword)
            .with(Attribute::Synchronizable, Value::SynchronizableAny)
            .with(Attribute::Service, Value::Text(self.service.clone()))
    }

    /// Lookup of a single item's payload.
    pub fn get_query(&self, key: &str) -> Query {
        self.common_query()
            .with(Attribute::MatchLimit, Value::MatchOne)
            .with(Attribute::ReturnData, Value::Bool(true))
            .with(Attribute::Account, Value::Text(key.to_string()))
    }

    /// Addressing for inserts, updates and deletes of a single item.
    pub fn mutation_query(&self, key: &str) -> Query {
        self.common_query()
            .with(Attribute::Account, Value::Text(key.to_string()))
    }

    /// Every item in the service.
    pub fn remove_all_query(&self) -> Query {
        self.common_query()
            .with(Attribute::MatchLimit, Value::MatchAll)
    }
}

// `&str` is UTF-8 by construction, so encoding cannot fail; decoding can.
fn encode(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}
