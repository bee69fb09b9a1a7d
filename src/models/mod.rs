//! Core data models for the converter
//!
//! This module contains the data structures that represent the conversion
//! domain: yen amounts, normalized sales records, and Yayoi ledger entries.

pub mod ledger;
pub mod money;
pub mod transaction;

pub use ledger::{EntryKind, LedgerEntry};
pub use money::Yen;
pub use transaction::{Marketplace, SalesRecord};
