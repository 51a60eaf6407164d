//! In-memory collaborators for tests.

use std::collections::{HashMap, HashSet};

use genelist_core::errors::{LookupError, PartnerError, TransportError};
use genelist_core::models::{ExternalCoordinateRecord, GenomeBuild};
use genelist_core::traits::{AnnotationLookup, IdentifierResolver, PartnerLookup};

pub fn record(accession: &str, chromosome: &str, start: u32, end: u32) -> ExternalCoordinateRecord {
    ExternalCoordinateRecord {
        accession: accession.to_string(),
        chromosome: chromosome.to_string(),
        start,
        end,
        ..Default::default()
    }
}

fn timed_out(key: &str) -> TransportError {
    TransportError::Unreachable {
        url: format!("memory://{}", key),
        reason: "timed out".to_string(),
    }
}

/// Annotation service backed by maps. Unknown keys are not found.
#[derive(Default)]
pub struct MemoryAnnotations {
    pub records: HashMap<String, ExternalCoordinateRecord>,
    pub symbols: HashMap<String, Vec<String>>,
    pub unreachable: HashSet<String>,
}

impl MemoryAnnotations {
    pub fn with_record(mut self, record: ExternalCoordinateRecord) -> Self {
        self.records.insert(record.accession.clone(), record);
        self
    }

    pub fn with_symbol(mut self, symbol: &str, candidates: &[&str]) -> Self {
        self.symbols.insert(
            symbol.to_string(),
            candidates.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn with_unreachable(mut self, key: &str) -> Self {
        self.unreachable.insert(key.to_string());
        self
    }
}

impl AnnotationLookup for MemoryAnnotations {
    fn lookup(
        &self,
        accession: &str,
        _build: GenomeBuild,
        expand: bool,
    ) -> Result<ExternalCoordinateRecord, LookupError> {
        if self.unreachable.contains(accession) {
            return Err(timed_out(accession).into());
        }
        let mut record = self
            .records
            .get(accession)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(accession.to_string()))?;
        if !expand {
            record.transcripts.clear();
            record.exons.clear();
        }
        Ok(record)
    }
}

impl IdentifierResolver for MemoryAnnotations {
    fn candidates(&self, symbol: &str, _build: GenomeBuild) -> Result<Vec<String>, LookupError> {
        if self.unreachable.contains(symbol) {
            return Err(timed_out(symbol).into());
        }
        Ok(self.symbols.get(symbol).cloned().unwrap_or_default())
    }
}

/// Partner catalog backed by a map. Unknown ids are unregistered.
#[derive(Default)]
pub struct MemoryPartners {
    pub catalog: HashMap<String, Vec<String>>,
    pub unreachable: HashSet<String>,
}

impl MemoryPartners {
    pub fn with_partners(mut self, id: &str, partners: &[&str]) -> Self {
        self.catalog.insert(
            id.to_string(),
            partners.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    pub fn with_unreachable(mut self, id: &str) -> Self {
        self.catalog.insert(id.to_string(), Vec::new());
        self.unreachable.insert(id.to_string());
        self
    }
}

impl PartnerLookup for MemoryPartners {
    fn partners(&self, id: &str) -> Result<Vec<String>, PartnerError> {
        if self.unreachable.contains(id) {
            return Err(timed_out(id).into());
        }
        self.catalog
            .get(id)
            .cloned()
            .ok_or_else(|| PartnerError::Unregistered(id.to_string()))
    }
}
