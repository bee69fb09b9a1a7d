//! Business logic for the conversion pipeline
//!
//! Reading, filtering, mapping, and orchestration. Data flows strictly
//! left to right, record by record; only the per-category output
//! accumulators carry cross-record state.

pub mod convert;
pub mod filter;
pub mod import;
pub mod mapper;

pub use convert::{convert, ConvertOptions, ConvertSummary, OutputReport};
pub use filter::DateRange;
pub use import::RecordReader;
pub use mapper::map_record;
