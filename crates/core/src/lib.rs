//! Binscope Core - Inventory normalization library.
//!
//! This crate provides the warehouse-independent pieces of Binscope:
//! - `dashboard` - JSON/CSV API in front of the `ShipHero` GraphQL API
//! - `cli` - Command-line export of the same data
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Records arrive already fetched; everything here is request-scoped
//! and allocation-only, so it can be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - String ID newtypes and the record/item/location data model
//! - [`inventory`] - Flat-item normalization, bin-location aggregation, CSV export

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod inventory;
pub mod types;

pub use inventory::*;
pub use types::*;
