//! Behavioral properties of the secret store over an in-memory vault.

use keystash_integration_tests::{memory_store, sibling_store};
use keystash_secrets::{Status, StoreError};

const KEYS: [&str; 5] = ["token", "refresh-token", "password", "", "ключ"];
const VALUES: [&str; 4] = ["v", "", "pässwörd ✓", "a much longer value with spaces"];

#[test]
fn test_unwritten_keys_are_absent() {
    let store = memory_store("fresh");
    for key in KEYS {
        assert_eq!(store.get(key).unwrap(), None, "key {:?}", key);
    }
}

#[test]
fn test_set_then_get_returns_value() {
    for key in KEYS {
        for value in VALUES {
            let store = memory_store("roundtrip");
            store.set(value, key).unwrap();
            assert_eq!(store.get(key).unwrap().as_deref(), Some(value));
        }
    }
}

#[test]
fn test_second_set_overwrites() {
    let store = memory_store("overwrite");
    for key in KEYS {
        store.set("first", key).unwrap();
        store.set("second", key).unwrap();
        assert_eq!(store.get(key).unwrap().as_deref(), Some("second"));
    }
    assert_eq!(store.vault().item_count("overwrite"), KEYS.len());
}

#[test]
fn test_remove_then_get_is_absent() {
    let store = memory_store("remove");
    for key in KEYS {
        store.set("value", key).unwrap();
        store.remove(key).unwrap();
        assert_eq!(store.get(key).unwrap(), None);
    }
}

#[test]
fn test_remove_is_not_idempotent() {
    let store = memory_store("remove-twice");
    store.set("value", "key").unwrap();
    store.remove("key").unwrap();

    let err = store.remove("key").unwrap_err();
    assert_eq!(err, StoreError::UnexpectedStatus(Status::ITEM_NOT_FOUND));
}

#[test]
fn test_remove_all_is_idempotent() {
    let store = memory_store("bulk");
    store.remove_all().unwrap();

    for (i, key) in KEYS.iter().enumerate() {
        store.set(&format!("value-{i}"), key).unwrap();
    }
    store.remove_all().unwrap();
    for key in KEYS {
        assert_eq!(store.get(key).unwrap(), None);
    }
    store.remove_all().unwrap();
}

#[test]
fn test_namespaces_are_isolated() {
    let alpha = memory_store("alpha");
    let beta = sibling_store(&alpha, "beta");

    alpha.set("alpha-value", "shared").unwrap();
    beta.set("beta-value", "shared").unwrap();
    assert_eq!(alpha.get("shared").unwrap().as_deref(), Some("alpha-value"));
    assert_eq!(beta.get("shared").unwrap().as_deref(), Some("beta-value"));

    beta.remove("shared").unwrap();
    assert_eq!(alpha.get("shared").unwrap().as_deref(), Some("alpha-value"));

    beta.set("again", "other").unwrap();
    alpha.remove_all().unwrap();
    assert_eq!(beta.get("other").unwrap().as_deref(), Some("again"));
}

#[test]
fn test_unit_test_scenario() {
    let store = memory_store("UnitTest");

    store.set("some-value", "some-key").unwrap();
    assert_eq!(store.get("some-key").unwrap().as_deref(), Some("some-value"));

    store.update("other-value", "some-key").unwrap();

    store.set("some-value", "a-key").unwrap();
    store.remove("a-key").unwrap();
    assert_eq!(store.get("a-key").unwrap(), None);
}
