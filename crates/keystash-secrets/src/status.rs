//! Vault status codes.

use std::fmt;

/// Result code returned by every vault primitive.
///
/// The numbering follows the Security.framework `OSStatus` values so the
/// keychain backend can pass codes through untouched. Only [`Status::SUCCESS`]
/// and [`Status::ITEM_NOT_FOUND`] carry meaning for the store; everything else
/// is opaque and ends up in [`crate::StoreError::UnexpectedStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(i32);

impl Status {
    /// `errSecSuccess`
    pub const SUCCESS: Status = Status(0);

    /// `errSecParam`: one or more query attributes were invalid.
    pub const PARAM: Status = Status(-50);

    /// `errSecDuplicateItem`: an insert collided with an existing item.
    pub const DUPLICATE_ITEM: Status = Status(-25299);

    /// `errSecItemNotFound`
    pub const ITEM_NOT_FOUND: Status = Status(-25300);

    /// Wrap a raw status code.
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// The raw status code.
    pub const fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    pub fn is_not_found(self) -> bool {
        self == Self::ITEM_NOT_FOUND
    }

    fn name(self) -> Option<&'static str> {
        match self {
            Self::SUCCESS => Some("success"),
            Self::PARAM => Some("invalid parameter"),
            Self::DUPLICATE_ITEM => Some("duplicate item"),
            Self::ITEM_NOT_FOUND => Some("item not found"),
            _ => None,
        }
    }
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> Self {
        status.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.0),
            None => write!(f, "status {}", self.0),
        }
    }
}
