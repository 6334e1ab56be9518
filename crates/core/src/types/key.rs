//! Newtype keys for type-safe entity references.
//!
//! Use the `define_key!` macro to create type-safe wrappers around the
//! opaque string identifiers flowing through the bot (shop keys used as
//! command routing tokens, LINE user ids), preventing accidental mixups.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe string key wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Display`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use otoku_core::define_key;
/// define_key!(ShopKey);
/// define_key!(UserId);
///
/// let shop = ShopKey::new("tanaka-bakery");
/// let user = UserId::new("U4af4980629");
///
/// // These are different types, so this won't compile:
/// // let _: ShopKey = user;
/// ```
#[macro_export]
macro_rules! define_key {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new key from any string-like value.
            #[must_use]
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(key: $name) -> Self {
                key.0
            }
        }
    };
}

// Define standard entity keys
define_key!(ShopKey);
define_key!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shop_key_roundtrip() {
        let key = ShopKey::new("tanaka-bakery");
        assert_eq!(key.as_str(), "tanaka-bakery");
        assert_eq!(key.to_string(), "tanaka-bakery");
        assert_eq!(String::from(key), "tanaka-bakery");
    }

    #[test]
    fn test_keys_compare_by_value() {
        assert_eq!(ShopKey::new("a"), ShopKey::from("a"));
        assert_ne!(ShopKey::new("a"), ShopKey::new("b"));
    }

    #[test]
    fn test_serde_transparent() {
        let key = ShopKey::new("shopA");
        let json = serde_json::to_string(&key).expect("serializes");
        assert_eq!(json, "\"shopA\"");
        let back: ShopKey = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, key);
    }
}
