//! Normalization policies.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How `sellable` is decided for stock in a dynamically slotted location.
///
/// `ShipHero`'s `locations` entries carry `pickable` but no sellable flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SlottedSellablePolicy {
    /// Stock in a slotted location is always sellable.
    #[default]
    Always,
    /// Use the warehouse product's `active` flag (inactive means not sellable).
    Active,
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sellable policy '{0}' (expected 'always' or 'active')")]
pub struct ParsePolicyError(String);

impl SlottedSellablePolicy {
    /// Resolve `sellable` for a slotted location given the product's active flag.
    #[must_use]
    pub const fn sellable(self, product_active: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Active => product_active,
        }
    }
}

impl FromStr for SlottedSellablePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "active" => Ok(Self::Active),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

impl fmt::Display for SlottedSellablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::Active => f.write_str("active"),
        }
    }
}
