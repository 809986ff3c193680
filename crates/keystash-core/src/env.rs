//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Environment variable names read by keystash.
pub mod vars {
    /// Base directory override (default `~/.keystash`).
    pub const KEYSTASH_HOME: &str = "KEYSTASH_HOME";

    /// Service namespace override.
    pub const KEYSTASH_SERVICE: &str = "KEYSTASH_SERVICE";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_var_set() {
        env::set_var("KEYSTASH_TEST_VAR", "value");
        assert_eq!(get_var("KEYSTASH_TEST_VAR").as_deref(), Some("value"));
    }

    #[test]
    fn test_empty_var_is_unset() {
        env::set_var("KEYSTASH_TEST_EMPTY", "");
        assert_eq!(get_var("KEYSTASH_TEST_EMPTY"), None);
        assert_eq!(get_var("KEYSTASH_TEST_NONEXISTENT"), None);
    }
}
