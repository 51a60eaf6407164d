//! Contracts the consolidation core needs from its external collaborators.
//!
//! The pipeline only talks to these traits; HTTP clients, test doubles or
//! caches can stand behind them. All collaborators must be shareable across
//! the lookup worker pool.

use crate::errors::{LookupError, PartnerError};
use crate::models::{ExternalCoordinateRecord, GenomeBuild};

/// Coordinates of an already resolved external accession.
pub trait AnnotationLookup: Send + Sync {
    ///
    /// Look up one accession.
    ///
    /// # Arguments
    /// - accession: external system identifier (gene, transcript or exon)
    /// - build: coordinate build the answer must refer to
    /// - expand: whether to include the nested transcript/exon hierarchy
    ///
    /// A missing accession is [LookupError::NotFound]; an unreachable or
    /// failing service is [LookupError::Transport].
    fn lookup(
        &self,
        accession: &str,
        build: GenomeBuild,
        expand: bool,
    ) -> Result<ExternalCoordinateRecord, LookupError>;
}

/// Symbol to accession cross references.
pub trait IdentifierResolver: Send + Sync {
    /// All accessions the service knows for a gene or transcript symbol, in service order.
    fn candidates(&self, symbol: &str, build: GenomeBuild) -> Result<Vec<String>, LookupError>;
}

/// Known fusion partners of a gene.
pub trait PartnerLookup: Send + Sync {
    ///
    /// Partner gene symbols for an internal catalog identifier.
    ///
    /// Identifiers that are not registered with the catalog fail with
    /// [PartnerError::Unregistered] before any request is made.
    fn partners(&self, id: &str) -> Result<Vec<String>, PartnerError>;
}

impl<T: AnnotationLookup + ?Sized> AnnotationLookup for &T {
    fn lookup(
        &self,
        accession: &str,
        build: GenomeBuild,
        expand: bool,
    ) -> Result<ExternalCoordinateRecord, LookupError> {
        (**self).lookup(accession, build, expand)
    }
}

impl<T: IdentifierResolver + ?Sized> IdentifierResolver for &T {
    fn candidates(&self, symbol: &str, build: GenomeBuild) -> Result<Vec<String>, LookupError> {
        (**self).candidates(symbol, build)
    }
}

impl<T: PartnerLookup + ?Sized> PartnerLookup for &T {
    fn partners(&self, id: &str) -> Result<Vec<String>, PartnerError> {
        (**self).partners(id)
    }
}
