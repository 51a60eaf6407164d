//! # Input/Output utilities for genelist.
//!
//! Reading the operator supplied, tab separated entity lists and writing the
//! consolidated interval lists as four column BED files.
//!
pub mod bed;
pub mod tsv;

// re-expose core functions
pub use bed::*;
pub use tsv::*;
