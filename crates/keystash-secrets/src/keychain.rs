//! OS keychain vault.
//!
//! On macOS, [`KeychainVault`] translates each [`Query`] into a
//! `CFDictionary` and calls the Security.framework `SecItem*` functions
//! directly, passing their `OSStatus` back untouched.
//!
//! Other platforms have no keychain backend yet; [`platform_vault`] returns
//! `None` there and callers decide how to report it.

use crate::vault::Vault;

/// Vault backed by the login keychain.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeychainVault {
    _private: (),
}

impl KeychainVault {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The platform's secure vault, if this build has one.
#[cfg(target_os = "macos")]
pub fn platform_vault() -> Option<Box<dyn Vault>> {
    Some(Box::new(KeychainVault::new()))
}

/// The platform's secure vault, if this build has one.
#[cfg(not(target_os = "macos"))]
pub fn platform_vault() -> Option<Box<dyn Vault>> {
    tracing::warn!("no OS keychain backend on this platform");
    None
}

// ---------------------------------------------------------------------------
// macOS Security.framework implementation
// ---------------------------------------------------------------------------

#[cfg(target_os = "macos")]
mod macos {
    use std::ptr;

    use core_foundation::base::{CFType, CFTypeRef, TCFType};
    use core_foundation::boolean::CFBoolean;
    use core_foundation::data::CFData;
    use core_foundation::dictionary::CFDictionary;
    use core_foundation::string::{CFString, CFStringRef};
    use security_framework_sys::item::{
        kSecAttrAccount, kSecAttrService, kSecAttrSynchronizable, kSecAttrSynchronizableAny,
        kSecClass, kSecClassGenericPassword, kSecMatchLimit, kSecMatchLimitAll,
        kSecMatchLimitOne, kSecReturnData, kSecValueData,
    };
    use security_framework_sys::keychain_item::{
        SecItemAdd, SecItemCopyMatching, SecItemDelete, SecItemUpdate,
    };
    use tracing::debug;

    use super::KeychainVault;
    use crate::query::{Attribute, Query, Value};
    use crate::status::Status;
    use crate::vault::{SearchResult, Vault};

    fn constant(raw: CFStringRef) -> CFString {
        // Security.framework constants are static and never released.
        unsafe { CFString::wrap_under_get_rule(raw) }
    }

    fn attribute_key(attribute: Attribute) -> CFString {
        let raw = unsafe {
            match attribute {
                Attribute::Class => kSecClass,
                Attribute::Synchronizable => kSecAttrSynchronizable,
                Attribute::Service => kSecAttrService,
                Attribute::MatchLimit => kSecMatchLimit,
                Attribute::ReturnData => kSecReturnData,
                Attribute::Account => kSecAttrAccount,
                Attribute::ValueData => kSecValueData,
            }
        };
        constant(raw)
    }

    fn attribute_value(value: &Value) -> CFType {
        match value {
            Value::GenericPassword => constant(unsafe { kSecClassGenericPassword }).as_CFType(),
            Value::SynchronizableAny => constant(unsafe { kSecAttrSynchronizableAny }).as_CFType(),
            Value::MatchOne => constant(unsafe { kSecMatchLimitOne }).as_CFType(),
            Value::MatchAll => constant(unsafe { kSecMatchLimitAll }).as_CFType(),
            Value::Bool(b) => CFBoolean::from(*b).as_CFType(),
            Value::Text(s) => CFString::new(s).as_CFType(),
            Value::Data(d) => CFData::from_buffer(d).as_CFType(),
        }
    }

    fn to_dictionary(query: &Query) -> CFDictionary<CFString, CFType> {
        let pairs: Vec<(CFString, CFType)> = query
            .iter()
            .map(|(attribute, value)| (attribute_key(attribute), attribute_value(value)))
            .collect();
        CFDictionary::from_CFType_pairs(&pairs)
    }

    impl Vault for KeychainVault {
        fn search(&self, query: &Query) -> (Status, Option<SearchResult>) {
            let dict = to_dictionary(query);
            let mut result: CFTypeRef = ptr::null();
            let status =
                Status::new(unsafe { SecItemCopyMatching(dict.as_concrete_TypeRef(), &mut result) });
            debug!(service = ?query.service(), %status, "keychain search");

            if result.is_null() {
                return (status, None);
            }
            // SecItemCopyMatching follows the create rule for its result.
            let object = unsafe { CFType::wrap_under_create_rule(result) };
            let found = match object.downcast::<CFData>() {
                Some(data) => SearchResult::Data(data.bytes().to_vec()),
                None => SearchResult::Other,
            };
            (status, Some(found))
        }

        fn insert(&self, query: &Query) -> Status {
            let dict = to_dictionary(query);
            let status =
                Status::new(unsafe { SecItemAdd(dict.as_concrete_TypeRef(), ptr::null_mut()) });
            debug!(service = ?query.service(), %status, "keychain insert");
            status
        }

        fn update(&self, query: &Query, attributes: &Query) -> Status {
            let dict = to_dictionary(query);
            let attrs = to_dictionary(attributes);
            let status = Status::new(unsafe {
                SecItemUpdate(dict.as_concrete_TypeRef(), attrs.as_concrete_TypeRef())
            });
            debug!(service = ?query.service(), %status, "keychain update");
            status
        }

        fn delete(&self, query: &Query) -> Status {
            let dict = to_dictionary(query);
            let status = Status::new(unsafe { SecItemDelete(dict.as_concrete_TypeRef()) });
            debug!(service = ?query.service(), %status, "keychain delete");
            status
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_no_platform_vault_off_macos() {
        assert!(platform_vault().is_none());
    }

    /// Exercises the real login keychain, so it only runs on request.
    #[cfg(target_os = "macos")]
    #[test]
    #[ignore]
    fn test_keychain_roundtrip() {
        use crate::SecretStore;

        let store = SecretStore::new("keystash-test", KeychainVault::new());
        store.set("test-value", "test-key").unwrap();
        assert_eq!(store.get("test-key").unwrap().as_deref(), Some("test-value"));
        store.remove_all().unwrap();
        assert_eq!(store.get("test-key").unwrap(), None);
    }
}
