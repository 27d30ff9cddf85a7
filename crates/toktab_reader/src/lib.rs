//! toktab_reader: Reader for line-oriented token specifications.
//!
//! Turns specification text into an ordered [`TokenTable`]:
//! - blank lines and comment lines are skipped
//! - each other line is split into a name and an optional quoted spelling
//! - malformed lines and duplicate names are reported as diagnostics
//!
//! [`TokenTable`]: toktab_core::TokenTable

mod fields;
mod reader;

pub use fields::{split_fields, Field, SplitError};
pub use reader::{read_token_spec, ReadResult, SpecReader};
