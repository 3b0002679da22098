//! Persistence of extracted records as per-city CSV tables

// Module declarations
mod csv_codec;
pub mod csv_store;

// Re-export public API
pub use csv_codec::{parse_rows, write_row};
pub use csv_store::{CsvStore, decode_table, encode_table};
