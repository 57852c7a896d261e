//! Core types for Binscope.
//!
//! This module provides type-safe wrappers for warehouse identifiers and the
//! record shapes that flow from the fetcher through normalization.

pub mod id;
pub mod item;
pub mod location;
pub mod policy;
pub mod record;

pub use id::*;
pub use item::FlatInventoryItem;
pub use location::{LocationAggregate, LocationProduct, LocationSummary};
pub use policy::{ParsePolicyError, SlottedSellablePolicy};
pub use record::{LocationEntry, RawProductRecord};
