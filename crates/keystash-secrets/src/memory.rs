//! In-memory vault.
//!
//! Mirrors the keychain's addressing rules for generic passwords: items are
//! keyed by `(service, account)`, searches and deletes match on whichever of
//! the two the query names, and inserts reject duplicates. Every call is
//! recorded, and statuses can be scripted per primitive, so store behavior
//! can be checked without touching the real keychain.

use std::collections::{BTreeMap, HashMap, VecDeque};

use parking_lot::Mutex;

use crate::query::{Attribute, Query, Value};
use crate::status::Status;
use crate::vault::{SearchResult, Vault};

/// The four vault primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Search,
    Insert,
    Update,
    Delete,
}

/// A recorded vault call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultCall {
    Search(Query),
    Insert(Query),
    Update { query: Query, attributes: Query },
    Delete(Query),
}

impl VaultCall {
    pub fn primitive(&self) -> Primitive {
        match self {
            Self::Search(_) => Primitive::Search,
            Self::Insert(_) => Primitive::Insert,
            Self::Update { .. } => Primitive::Update,
            Self::Delete(_) => Primitive::Delete,
        }
    }

    /// The addressing query of the call.
    pub fn query(&self) -> &Query {
        match self {
            Self::Search(q) | Self::Insert(q) | Self::Delete(q) => q,
            Self::Update { query, .. } => query,
        }
    }
}

type ItemKey = (String, String);

#[derive(Default)]
struct State {
    items: BTreeMap<ItemKey, Vec<u8>>,
    calls: Vec<VaultCall>,
    scripted: HashMap<Primitive, VecDeque<Status>>,
    search_returns_other: bool,
}

impl State {
    fn scripted(&mut self, primitive: Primitive) -> Option<Status> {
        self.scripted.get_mut(&primitive)?.pop_front()
    }

    fn matching(&self, query: &Query) -> Vec<ItemKey> {
        self.items
            .keys()
            .filter(|(service, account)| {
                query.service().map_or(true, |s| s == service)
                    && query.account().map_or(true, |a| a == account)
            })
            .cloned()
            .collect()
    }
}

/// A vault holding items in process memory.
#[derive(Default)]
pub struct MemoryVault {
    state: Mutex<State>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<VaultCall> {
        self.state.lock().calls.clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Make the next `primitive` call return `status` without touching items.
    ///
    /// Scripted statuses queue up and are consumed in order.
    pub fn fail_next(&self, primitive: Primitive, status: Status) {
        self.state
            .lock()
            .scripted
            .entry(primitive)
            .or_default()
            .push_back(status);
    }

    /// Make successful searches return a non-data object.
    pub fn set_search_returns_other(&self, enabled: bool) {
        self.state.lock().search_returns_other = enabled;
    }

    /// Number of items stored under `service`.
    pub fn item_count(&self, service: &str) -> usize {
        self.state
            .lock()
            .items
            .keys()
            .filter(|(s, _)| s == service)
            .count()
    }

    /// Raw payload of an item, bypassing the primitives.
    pub fn raw_item(&self, service: &str, account: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .items
            .get(&(service.to_string(), account.to_string()))
            .cloned()
    }

    /// Store a raw payload, bypassing the primitives.
    pub fn put_raw_item(&self, service: &str, account: &str, payload: Vec<u8>) {
        self.state
            .lock()
            .items
            .insert((service.to_string(), account.to_string()), payload);
    }
}

fn is_generic_password(query: &Query) -> bool {
    matches!(query.get(Attribute::Class), Some(Value::GenericPassword))
}

impl Vault for MemoryVault {
    fn search(&self, query: &Query) -> (Status, Option<SearchResult>) {
        let mut state = self.state.lock();
        state.calls.push(VaultCall::Search(query.clone()));
        if let Some(status) = state.scripted(Primitive::Search) {
            return (status, None);
        }
        if !is_generic_password(query) {
            return (Status::PARAM, None);
        }

        let matches = state.matching(query);
        let Some(first) = matches.first() else {
            return (Status::ITEM_NOT_FOUND, None);
        };

        let wants_data = matches!(query.get(Attribute::ReturnData), Some(Value::Bool(true)));
        let single = !matches!(query.get(Attribute::MatchLimit), Some(Value::MatchAll));
        let result = if !wants_data {
            None
        } else if state.search_returns_other || !single {
            // Multiple matches come back as an array, never a bare blob.
            Some(SearchResult::Other)
        } else {
            state.items.get(first).cloned().map(SearchResult::Data)
        };
        (Status::SUCCESS, result)
    }

    fn insert(&self, query: &Query) -> Status {
        let mut state = self.state.lock();
        state.calls.push(VaultCall::Insert(query.clone()));
        if let Some(status) = state.scripted(Primitive::Insert) {
            return status;
        }
        if !is_generic_password(query) {
            return Status::PARAM;
        }

        let key = (
            query.service().unwrap_or_default().to_string(),
            query.account().unwrap_or_default().to_string(),
        );
        if state.items.contains_key(&key) {
            return Status::DUPLICATE_ITEM;
        }
        let payload = query.data(Attribute::ValueData).unwrap_or_default().to_vec();
        state.items.insert(key, payload);
        Status::SUCCESS
    }

    fn update(&self, query: &Query, attributes: &Query) -> Status {
        let mut state = self.state.lock();
        state.calls.push(VaultCall::Update {
            query: query.clone(),
            attributes: attributes.clone(),
        });
        if let Some(status) = state.scripted(Primitive::Update) {
            return status;
        }
        if !is_generic_password(query) {
            return Status::PARAM;
        }

        let matches = state.matching(query);
        if matches.is_empty() {
            return Status::ITEM_NOT_FOUND;
        }
        if let Some(payload) = attributes.data(Attribute::ValueData) {
            for key in matches {
                state.items.insert(key, payload.to_vec());
            }
        }
        Status::SUCCESS
    }

    fn delete(&self, query: &Query) -> Status {
        let mut state = self.state.lock();
        state.calls.push(VaultCall::Delete(query.clone()));
        if let Some(status) = state.scripted(Primitive::Delete) {
            return status;
        }
        if !is_generic_password(query) {
            return Status::PARAM;
        }

        // Like SecItemDelete, every match goes regardless of the match limit.
        let matches = state.matching(query);
        if matches.is_empty() {
            return Status::ITEM_NOT_FOUND;
        }
        for key in matches {
            state.items.remove(&key);
        }
        Status::SUCCESS
    }
}
