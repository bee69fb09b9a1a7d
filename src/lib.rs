//! Mercari to Yayoi conversion library
//!
//! Converts Mercari sales export files into import CSVs for the Yayoi
//! accounting system. Two export schemas are supported: direct marketplace
//! sales (UTF-8) and Mercari Shops settlement reports (Shift-JIS). Each
//! sale decomposes into up to three ledger entries (sales, commission,
//! and shipping fee), written to three separate Shift-JIS output files,
//! one per settlement account/category.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Error types
//! - `models`: Core data models (amounts, sales records, ledger entries)
//! - `services`: Import, date filtering, mapping, and the conversion pipeline
//! - `export`: Yayoi CSV serialization and output naming
//!
//! # Example
//!
//! ```rust,ignore
//! use mercari_yayoi::models::Marketplace;
//! use mercari_yayoi::services::{convert, ConvertOptions, DateRange};
//!
//! let opts = ConvertOptions {
//!     input: "sales.csv".into(),
//!     output_base: None,
//!     marketplace: Marketplace::Direct,
//!     range: DateRange::unbounded(),
//! };
//! let summary = convert(&opts)?;
//! ```

pub mod error;
pub mod export;
pub mod models;
pub mod services;

pub use error::{ConvertError, ConvertResult};
