//! Vault queries.
//!
//! A [`Query`] is a plain attribute map describing which keychain items an
//! operation addresses (and, for inserts and updates, what they should hold).
//! Queries are built fresh for every call and never mutated once handed to a
//! vault; [`Query::with`] consumes the query and returns the extended one.

use std::collections::BTreeMap;
use std::fmt;

/// Attribute names understood by the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    /// Item class (`kSecClass`).
    Class,
    /// iCloud synchronization matching (`kSecAttrSynchronizable`).
    Synchronizable,
    /// Namespace the item lives under (`kSecAttrService`).
    Service,
    /// How many matches a search or delete covers (`kSecMatchLimit`).
    MatchLimit,
    /// Ask the search to return the stored payload (`kSecReturnData`).
    ReturnData,
    /// Caller key of the item (`kSecAttrAccount`).
    Account,
    /// The stored payload (`kSecValueData`).
    ValueData,
}

/// Attribute values.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    /// `kSecClassGenericPassword`
    GenericPassword,
    /// `kSecAttrSynchronizableAny`: match items whether synchronized or not.
    SynchronizableAny,
    /// `kSecMatchLimitOne`
    MatchOne,
    /// `kSecMatchLimitAll`
    MatchAll,
    Bool(bool),
    Text(String),
    Data(Vec<u8>),
}

// Payloads are secrets; keep them out of logs and panic messages.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenericPassword => f.write_str("GenericPassword"),
            Self::SynchronizableAny => f.write_str("SynchronizableAny"),
            Self::MatchOne => f.write_str("MatchOne"),
            Self::MatchAll => f.write_str("MatchAll"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Data(d) => write!(f, "Data([REDACTED; {} bytes])", d.len()),
        }
    }
}

/// An attribute map sent to a vault primitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    fields: BTreeMap<Attribute, Value>,
}

impl Query {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return this query with `attribute` set to `value`.
    pub fn with(mut self, attribute: Attribute, value: Value) -> Self {
        self.fields.insert(attribute, value);
        self
    }

    pub fn get(&self, attribute: Attribute) -> Option<&Value> {
        self.fields.get(&attribute)
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        self.fields.contains_key(&attribute)
    }

    /// Text value of `attribute`, if it holds one.
    pub fn text(&self, attribute: Attribute) -> Option<&str> {
        match self.fields.get(&attribute) {
            Some(Value::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Byte payload of `attribute`, if it holds one.
    pub fn data(&self, attribute: Attribute) -> Option<&[u8]> {
        match self.fields.get(&attribute) {
            Some(Value::Data(d)) => Some(d),
            _ => None,
        }
    }

    pub fn service(&self) -> Option<&str> {
        self.text(Attribute::Service)
    }

    pub fn account(&self) -> Option<&str> {
        self.text(Attribute::Account)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate attributes in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &Value)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_replaces_existing_value() {
        let query = Query::new()
            .with(Attribute::MatchLimit, Value::MatchOne)
            .with(Attribute::MatchLimit, Value::MatchAll);
        assert_eq!(query.len(), 1);
        assert_eq!(query.get(Attribute::MatchLimit), Some(&Value::MatchAll));
    }

    #[test]
    fn test_typed_accessors() {
        let query = Query::new()
            .with(Attribute::Service, Value::Text("svc".into()))
            .with(Attribute::ValueData, Value::Data(b"abc".to_vec()));

        assert_eq!(query.service(), Some("svc"));
        assert_eq!(query.account(), None);
        assert_eq!(query.data(Attribute::ValueData), Some(&b"abc"[..]));
        // Wrong value kind is not coerced.
        assert_eq!(query.text(Attribute::ValueData), None);
    }

    #[test]
    fn test_iter_is_ordered_by_attribute() {
        let query = Query::new()
            .with(Attribute::Account, Value::Text("a".into()))
            .with(Attribute::Class, Value::GenericPassword);
        let attrs: Vec<Attribute> = query.iter().map(|(a, _)| a).collect();
        assert_eq!(attrs, vec![Attribute::Class, Attribute::Account]);
    }

    #[test]
    fn test_data_is_redacted_in_debug() {
        let value = Value::Data(b"hunter2".to_vec());
        let rendered = format!("{:?}", value);
        assert_eq!(rendered, "Data([REDACTED; 7 bytes])");
        assert!(!rendered.contains("hunter2"));
    }
}
