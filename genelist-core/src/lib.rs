//! # Core models for genelist
//!
//! Typed building blocks shared by every genelist crate: canonical
//! chromosomes, the entity/class/analysis vocabulary, resolved intervals and
//! consolidated output lines, the error taxonomy, and the traits the
//! consolidation core uses to reach its external collaborators.
//!
pub mod errors;
pub mod models;
pub mod traits;
pub mod utils;

pub use errors::*;
pub use traits::*;
