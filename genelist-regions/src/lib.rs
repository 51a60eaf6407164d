//! Region consolidation for curated gene lists.
//!
//! This crate turns the rows of a gene list into a minimal set of annotated,
//! non-overlapping genomic intervals:
//!
//! - [ingest] validates rows and normalizes them into entities
//! - [strategy] decides how each (class, analysis) pair is resolved
//! - [resolve] looks entities up and pads their coordinates
//! - [partners] adds known fusion partners for structural variant lists
//! - [consolidate] sorts and merges the resulting intervals
//!
//! [pipeline] chains all of the above on a bounded thread pool.
//!
//! # Example
//!
//! ```no_run
//! use genelist_core::models::Analysis;
//! use genelist_io::read_tsv;
//! use genelist_regions::pipeline::{Pipeline, PipelineConfig};
//! # use genelist_core::errors::*;
//! # use genelist_core::models::*;
//! # use genelist_core::traits::*;
//! # struct Offline;
//! # impl AnnotationLookup for Offline {
//! #     fn lookup(&self, a: &str, _: GenomeBuild, _: bool) -> Result<ExternalCoordinateRecord, LookupError> { Err(LookupError::NotFound(a.into())) }
//! # }
//! # impl IdentifierResolver for Offline {
//! #     fn candidates(&self, _: &str, _: GenomeBuild) -> Result<Vec<String>, LookupError> { Ok(vec![]) }
//! # }
//! # impl PartnerLookup for Offline {
//! #     fn partners(&self, id: &str) -> Result<Vec<String>, PartnerError> { Err(PartnerError::Unregistered(id.into())) }
//! # }
//!
//! let table = read_tsv("genes.tsv").unwrap();
//! let config = PipelineConfig::new(Analysis::Sv).with_tables(["aml"]);
//! let report = Pipeline::new(Offline, Offline, Offline, config).run(&table).unwrap();
//!
//! for line in &report.lines {
//!     println!("{}", line);
//! }
//! ```

pub mod consolidate;
pub mod errors;
pub mod ingest;
pub mod partners;
pub mod pipeline;
pub mod resolve;
pub mod strategy;

#[cfg(test)]
mod testing;

// re-exports
pub use consolidate::consolidate;
pub use errors::{IngestError, PipelineError};
pub use ingest::{IngestPolicy, Ingested, ingest, validate_header};
pub use pipeline::{Pipeline, PipelineConfig, Report};
pub use resolve::{CoordinateResolver, MissingIdentifiers};
pub use strategy::{Strategy, strategy};
