//! Turning entities into padded, annotated intervals.
//!
//! Genes and transcripts are first mapped from their symbol to an external
//! accession, then looked up either as a single span or expanded into their
//! exons, depending on the [Strategy] for the analysis. Exons are looked up
//! directly by accession and regions carry their own coordinates.
//!
//! Resolution failures never abort a run. Every entity that could not be
//! resolved is collected in a [MissingIdentifiers] value that the caller
//! reports once at the end.

use std::collections::HashMap;
use std::fmt::{self, Display};

use indicatif::ProgressBar;
use log::{info, warn};
use rayon::prelude::*;

use genelist_core::errors::LookupError;
use genelist_core::models::interval::ACCESSION_SEPARATOR;
use genelist_core::models::{
    Analysis, Chromosome, Class, Entity, ExternalCoordinateRecord, GenomeBuild, Interval,
};
use genelist_core::traits::{AnnotationLookup, IdentifierResolver};

use crate::strategy::{Strategy, strategy};

/// Joins the transcripts that share one exon.
pub const TRANSCRIPT_SEPARATOR: char = '&';

/// Genes the symbol service does not map cleanly (renamed symbols and readthrough loci), GRCh38.
pub const FALLBACK_GENE_IDS: [(&str, &str); 4] = [
    ("AFND", "ENSG00000130396"),
    ("CSFR3", "ENSG00000119535"),
    ("SEPT5-GP1BB", "ENSG00000284874"),
    ("TMX2-CTNND1", "ENSG00000288534"),
];

pub fn fallback_accession(symbol: &str, build: GenomeBuild) -> Option<&'static str> {
    match build {
        GenomeBuild::GRCh38 => FALLBACK_GENE_IDS
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, accession)| *accession),
        GenomeBuild::GRCh37 => None,
    }
}

///
/// Entities that could not be resolved, in the order they were recorded.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MissingIdentifiers {
    entries: Vec<(String, Class)>,
}

impl MissingIdentifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entity. Recording the same (id, class) twice has no effect.
    pub fn record(&mut self, id: &str, class: Class) {
        if !self.entries.iter().any(|(i, c)| i == id && *c == class) {
            self.entries.push((id.to_string(), class));
        }
    }

    /// Fold another accumulator into this one, keeping first-seen order.
    pub fn merge(&mut self, other: MissingIdentifiers) {
        for (id, class) in other.entries {
            self.record(&id, class);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Class)> {
        self.entries.iter()
    }

    /// The end-of-run message, or `None` if nothing is missing.
    pub fn summary(&self) -> Option<String> {
        match self.is_empty() {
            true => None,
            false => Some(self.to_string()),
        }
    }
}

impl Display for MissingIdentifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self
            .entries
            .iter()
            .map(|(id, class)| format!("{} ({})", id, class))
            .collect();
        write!(
            f,
            "The following ids were not found and excluded: {}. Double check spelling or consider classing them as regions",
            ids.join(",")
        )
    }
}

/// Output of resolving a batch of entities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolved {
    pub intervals: Vec<Interval>,
    pub missing: MissingIdentifiers,
}

///
/// Resolves entities to intervals for one genome build.
///
pub struct CoordinateResolver<L, R> {
    lookup: L,
    resolver: R,
    build: GenomeBuild,
}

impl<L: AnnotationLookup, R: IdentifierResolver> CoordinateResolver<L, R> {
    pub fn new(lookup: L, resolver: R, build: GenomeBuild) -> Self {
        CoordinateResolver {
            lookup,
            resolver,
            build,
        }
    }

    pub fn build(&self) -> GenomeBuild {
        self.build
    }

    ///
    /// Map an entity's identifier to the accession used for coordinate lookups.
    ///
    /// Exon identifiers already are accessions, as are gene and transcript
    /// identifiers that carry their class' accession prefix. Otherwise the
    /// first candidate with the right prefix is taken; gene candidates must
    /// also sit on a canonical chromosome. Known problem symbols fall back to
    /// a fixed registry.
    ///
    pub fn accession(&self, entity: &Entity) -> Result<String, LookupError> {
        let prefix = match (entity.class, entity.class.accession_prefix()) {
            (Class::Gene | Class::Transcript, Some(prefix)) => prefix,
            _ => return Ok(entity.id.clone()),
        };

        if entity.id.starts_with(prefix) {
            return Ok(entity.id.clone());
        }

        let candidates = match self.resolver.candidates(&entity.id, self.build) {
            Ok(candidates) => candidates,
            Err(LookupError::NotFound(_)) => Vec::new(),
            Err(err) => return Err(err),
        };

        for candidate in candidates.iter().filter(|c| c.starts_with(prefix)) {
            if entity.class == Class::Transcript || self.on_primary_contig(candidate)? {
                return Ok(candidate.clone());
            }
        }

        if entity.class == Class::Gene {
            if let Some(accession) = fallback_accession(&entity.id, self.build) {
                info!("Using registered accession {} for {}", accession, entity.id);
                return Ok(accession.to_string());
            }
        }

        Err(LookupError::NotFound(entity.id.clone()))
    }

    fn on_primary_contig(&self, accession: &str) -> Result<bool, LookupError> {
        match self.lookup.lookup(accession, self.build, false) {
            Ok(record) => Ok(record.chromosome.parse::<Chromosome>().is_ok()),
            Err(LookupError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    ///
    /// Resolve one entity for one analysis.
    ///
    /// # Arguments
    /// - entity: the entity to resolve
    /// - analysis: selects padding and exon expansion
    pub fn resolve(
        &self,
        entity: &Entity,
        analysis: Analysis,
    ) -> Result<Vec<Interval>, LookupError> {
        match strategy(entity.class, analysis) {
            Strategy::Fixed => {
                let coordinates = entity
                    .coordinates
                    .ok_or_else(|| LookupError::NotFound(entity.id.clone()))?;
                Ok(vec![Interval::new(
                    coordinates.chr.label(),
                    coordinates.start,
                    coordinates.end,
                    &entity.id,
                )])
            }
            Strategy::DirectExon { padding } => {
                let record = self.lookup.lookup(&entity.id, self.build, false)?;
                let annotation = span_annotation(&entity.id, &record.accession);
                Ok(vec![record.to_interval(&annotation).padded(padding)])
            }
            Strategy::Span { padding } => {
                let accession = self.accession(entity)?;
                let record = self.lookup.lookup(&accession, self.build, false)?;
                let annotation = span_annotation(&entity.id, &record.accession);
                Ok(vec![record.to_interval(&annotation).padded(padding)])
            }
            Strategy::ExonSet { padding } => {
                let accession = self.accession(entity)?;
                let record = self.lookup.lookup(&accession, self.build, true)?;
                let intervals = match entity.class {
                    Class::Transcript => transcript_exons(&entity.id, &record, padding),
                    _ => gene_exons(&entity.id, &record, padding),
                };
                if intervals.is_empty() {
                    warn!("{} ({}) has no annotated exons", entity.id, record.accession);
                }
                Ok(intervals)
            }
        }
    }

    ///
    /// Resolve a batch of entities on the current rayon pool.
    ///
    /// Per-entity outcomes are collected first and merged afterwards, in input order.
    ///
    pub fn resolve_all(
        &self,
        entities: &[Entity],
        analysis: Analysis,
        progress: &ProgressBar,
    ) -> Resolved {
        let outcomes: Vec<(&Entity, Result<Vec<Interval>, LookupError>)> = entities
            .par_iter()
            .map(|entity| {
                let outcome = self.resolve(entity, analysis);
                progress.inc(1);
                (entity, outcome)
            })
            .collect();

        let mut resolved = Resolved::default();
        for (entity, outcome) in outcomes {
            match outcome {
                Ok(intervals) => {
                    info!("Resolved {} to {} interval(s)", entity, intervals.len());
                    resolved.intervals.extend(intervals);
                }
                Err(err) => {
                    warn!("Could not resolve {}: {}", entity, err);
                    resolved.missing.record(&entity.id, entity.class);
                }
            }
        }

        resolved
    }
}

/// `id|accession`, or just `id` when both are the same.
fn span_annotation(id: &str, accession: &str) -> String {
    if accession.is_empty() || accession == id {
        id.to_string()
    } else {
        format!("{}{}{}", id, ACCESSION_SEPARATOR, accession)
    }
}

fn chromosome_or<'a>(record: &'a ExternalCoordinateRecord, parent: &'a str) -> &'a str {
    match record.chromosome.is_empty() {
        true => parent,
        false => &record.chromosome,
    }
}

///
/// One interval per distinct exon of a gene, in order of first occurrence.
///
/// An exon shared by several transcripts keeps the coordinates of its first
/// occurrence; its annotation lists every transcript that contains it.
///
fn gene_exons(id: &str, gene: &ExternalCoordinateRecord, padding: u32) -> Vec<Interval> {
    struct SharedExon<'a> {
        accession: &'a str,
        chr: &'a str,
        start: u32,
        end: u32,
        transcripts: Vec<&'a str>,
    }

    let mut exons: Vec<SharedExon> = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for transcript in &gene.transcripts {
        let transcript_chr = chromosome_or(transcript, &gene.chromosome);
        for exon in &transcript.exons {
            match seen.get(exon.accession.as_str()) {
                Some(&i) => {
                    if !exons[i].transcripts.contains(&transcript.accession.as_str()) {
                        exons[i].transcripts.push(&transcript.accession);
                    }
                }
                None => {
                    seen.insert(&exon.accession, exons.len());
                    exons.push(SharedExon {
                        accession: &exon.accession,
                        chr: chromosome_or(exon, transcript_chr),
                        start: exon.start,
                        end: exon.end,
                        transcripts: vec![&transcript.accession],
                    });
                }
            }
        }
    }

    exons
        .into_iter()
        .map(|exon| {
            let annotation = format!(
                "{id}{sep}{gene}{sep}{txs}{sep}{exon}",
                sep = ACCESSION_SEPARATOR,
                gene = gene.accession,
                txs = exon.transcripts.join(TRANSCRIPT_SEPARATOR.to_string().as_str()),
                exon = exon.accession
            );
            Interval::new(exon.chr, exon.start, exon.end, &annotation).padded(padding)
        })
        .collect()
}

/// One interval per exon of a transcript.
fn transcript_exons(
    id: &str,
    transcript: &ExternalCoordinateRecord,
    padding: u32,
) -> Vec<Interval> {
    transcript
        .exons
        .iter()
        .map(|exon| {
            let annotation = format!(
                "{id}{sep}{tx}{sep}{exon}",
                sep = ACCESSION_SEPARATOR,
                tx = transcript.accession,
                exon = exon.accession
            );
            Interval::new(
                chromosome_or(exon, &transcript.chromosome),
                exon.start,
                exon.end,
                &annotation,
            )
            .padded(padding)
        })
        .collect()
}
