//! Output serialization for the Yayoi accounting system

pub mod csv;

pub use csv::{write_ledger, OutputPaths};
