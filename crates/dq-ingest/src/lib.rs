//! Loading raw CSV input and exporting clean tables.

pub mod csv_table;
pub mod frame;

pub use csv_table::{NULL_TOKENS, is_null_token, raw_cell, read_csv_table};
pub use frame::{table_to_dataframe, write_clean_csv};
