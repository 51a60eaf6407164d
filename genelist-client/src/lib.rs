//! Clients for the external services genelist resolves entities against.
//!
//! - [ensembl::EnsemblClient] looks up coordinates and maps symbols to accessions
//! - [atlas::AtlasClient] reads fusion partners from the Atlas of Genetics and Cytogenetics in Oncology
//!
//! Both are configured through builders, with defaults taken from the
//! environment (see [consts]).
pub mod atlas;
pub mod consts;
pub mod ensembl;
pub mod http;
pub mod utils;

pub use atlas::AtlasClient;
pub use ensembl::EnsemblClient;
