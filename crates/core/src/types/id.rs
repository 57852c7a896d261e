//! Newtype IDs for type-safe `ShipHero` entity references.
//!
//! `ShipHero` identifiers are opaque base64 strings (e.g. `Q3VzdG9tZXJBY2NvdW50Ojg4Nzc0`).
//! Use the `define_id!` macro to create wrappers that prevent accidentally
//! passing a warehouse ID where a customer account ID is expected.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Errors that can occur when parsing an ID.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty or only whitespace.
    #[error("{0} cannot be empty")]
    Empty(&'static str),
}

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `parse()` (trims, rejects empty input) and `as_str()`
/// - `Display` and `AsRef<str>`
///
/// # Example
///
/// ```rust
/// # use binscope_core::define_id;
/// define_id!(BinId, "bin id");
///
/// let bin = BinId::parse(" A-01 ").unwrap();
/// assert_eq!(bin.as_str(), "A-01");
/// assert!(BinId::parse("   ").is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $label:literal) => {
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
            /// Parse an ID, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns `IdError::Empty` if nothing is left after trimming.
            pub fn parse(value: &str) -> ::core::result::Result<Self, $crate::types::id::IdError> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err($crate::types::id::IdError::Empty($label));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID, returning the owned string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(CustomerAccountId, "customer account id");
define_id!(WarehouseId, "warehouse id");

impl CustomerAccountId {
    /// Build the `ShipHero` UUID for a legacy numeric customer account ID.
    ///
    /// `ShipHero` encodes entity IDs as `base64("<Entity>:<legacy id>")`, so
    /// this works without an API round trip when the `uuid` lookup fails.
    ///
    /// ```rust
    /// # use binscope_core::CustomerAccountId;
    /// let id = CustomerAccountId::from_legacy(88774);
    /// assert_eq!(id.as_str(), "Q3VzdG9tZXJBY2NvdW50Ojg4Nzc0");
    /// ```
    #[must_use]
    pub fn from_legacy(legacy_id: i64) -> Self {
        Self(STANDARD.encode(format!("CustomerAccount:{legacy_id}")))
    }
}
