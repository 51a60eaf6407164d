//! End-to-end run: rows in, consolidated lines out.

use std::collections::BTreeSet;

use indicatif::ProgressBar;
use log::{info, warn};

use genelist_core::errors::{PartnerError, ValidationError};
use genelist_core::models::{Analysis, ConsolidatedLine, Entity, GenomeBuild};
use genelist_core::traits::{AnnotationLookup, IdentifierResolver, PartnerLookup};
use genelist_io::TsvTable;

use crate::consolidate::consolidate;
use crate::errors::PipelineError;
use crate::ingest::{IngestPolicy, IngestWarning, ingest};
use crate::partners::expand_all;
use crate::resolve::{CoordinateResolver, MissingIdentifiers};

pub const DEFAULT_THREADS: usize = 4;

///
/// What to extract from a list.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    pub analysis: Analysis,
    pub build: GenomeBuild,
    /// Table tags to select; empty selects every entity.
    pub tables: BTreeSet<String>,
    pub threads: usize,
    pub policy: IngestPolicy,
}

impl PipelineConfig {
    pub fn new(analysis: Analysis) -> Self {
        PipelineConfig {
            analysis,
            build: GenomeBuild::default(),
            tables: BTreeSet::new(),
            threads: DEFAULT_THREADS,
            policy: IngestPolicy::default(),
        }
    }

    pub fn with_build(mut self, build: GenomeBuild) -> Self {
        self.build = build;
        self
    }

    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tables = tables
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_policy(mut self, policy: IngestPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn selects(&self, entity: &Entity) -> bool {
        entity.has_analysis(self.analysis)
            && (self.tables.is_empty() || entity.in_any_table(&self.tables))
    }
}

/// Everything a run produced, including the non-fatal problems.
#[derive(Debug, Default)]
pub struct Report {
    pub lines: Vec<ConsolidatedLine>,
    pub selected: usize,
    pub row_errors: Vec<ValidationError>,
    pub warnings: Vec<IngestWarning>,
    pub partner_errors: Vec<(String, PartnerError)>,
    pub missing: MissingIdentifiers,
}

///
/// Drives ingestion, partner expansion, coordinate resolution and
/// consolidation for one analysis.
///
pub struct Pipeline<L, R, P> {
    resolver: CoordinateResolver<L, R>,
    partners: P,
    config: PipelineConfig,
    progress: ProgressBar,
}

impl<L, R, P> Pipeline<L, R, P>
where
    L: AnnotationLookup,
    R: IdentifierResolver,
    P: PartnerLookup,
{
    pub fn new(lookup: L, resolver: R, partners: P, config: PipelineConfig) -> Self {
        Pipeline {
            resolver: CoordinateResolver::new(lookup, resolver, config.build),
            partners,
            config,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report lookup progress on the given bar.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    ///
    /// Run the whole pipeline over a parsed table.
    ///
    /// Only schema errors, fail-fast row errors and thread pool setup abort
    /// the run. Everything else ends up in the [Report].
    ///
    pub fn run(&self, table: &TsvTable) -> Result<Report, PipelineError> {
        let ingested = ingest(&table.header, &table.rows, self.config.policy)?;
        info!(
            "Ingested {} entities ({} rows skipped)",
            ingested.entities.len(),
            ingested.errors.len()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()?;

        let mut report = Report {
            row_errors: ingested.errors,
            warnings: ingested.warnings,
            ..Default::default()
        };

        let selected: Vec<Entity> = ingested
            .entities
            .into_iter()
            .filter(|e| self.config.selects(e))
            .collect();

        let entities = match self.config.analysis {
            Analysis::Sv => {
                let expanded = pool.install(|| expand_all(&selected, &self.partners));
                report.partner_errors = expanded.errors;
                expanded.entities
            }
            _ => selected,
        };
        report.selected = entities.len();

        info!(
            "Resolving {} entities for {} on GRCh{}",
            entities.len(),
            self.config.analysis,
            self.resolver.build()
        );
        self.progress.set_length(entities.len() as u64);
        let resolved = pool.install(|| {
            self.resolver
                .resolve_all(&entities, self.config.analysis, &self.progress)
        });
        self.progress.finish_and_clear();

        report.missing.merge(resolved.missing);
        if let Some(summary) = report.missing.summary() {
            warn!("{}", summary);
        }

        report.lines = consolidate(resolved.intervals);
        info!("Consolidated into {} lines", report.lines.len());

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryAnnotations, MemoryPartners, record};
    use genelist_io::parse_tsv;
    use pretty_assertions::assert_eq;
    use rstest::*;

    const LIST: &str = "id\tclass\tanalyses\ttables\tinclude_partners\tcoordinates
ABL1\tgene\tsv,cnv\taml\ttrue\t
BCR\tgene\tcnv\tall\tfalse\t
ITD\tregion\tsv,pindel\taml\tfalse\tchr22:23180000-23180600
LOST\tgene\tsv\taml\tfalse\t
BAD\tlocus\tsv\taml\tfalse\t
";

    fn annotations() -> MemoryAnnotations {
        MemoryAnnotations::default()
            .with_record(record("ENSG_ABL1", "9", 130713946, 130887675))
            .with_record(record("ENSG_BCR", "22", 23180365, 23318037))
            .with_record(record("ENSG_ETV6", "12", 11649674, 11895377))
            .with_symbol("ABL1", &["ENSG_ABL1"])
            .with_symbol("BCR", &["ENSG_BCR"])
            .with_symbol("ETV6", &["ENSG_ETV6"])
    }

    type MemoryPipeline = Pipeline<MemoryAnnotations, MemoryAnnotations, MemoryPartners>;

    fn pipeline(config: PipelineConfig) -> MemoryPipeline {
        let partners = MemoryPartners::default().with_partners("ABL1", &["BCR", "ETV6"]);
        Pipeline::new(annotations(), annotations(), partners, config)
    }

    fn as_strings(lines: &[ConsolidatedLine]) -> Vec<String> {
        lines.iter().map(|l| l.as_string(true)).collect()
    }

    #[rstest]
    fn test_sv_run_expands_partners_and_merges() {
        let table = parse_tsv(LIST.as_bytes()).unwrap();
        let config = PipelineConfig::new(Analysis::Sv).with_tables(["AML"]);

        let report = pipeline(config).run(&table).unwrap();

        assert_eq!(
            as_strings(&report.lines),
            vec![
                "chr9\t130713896\t130887725\tABL1|ENSG_ABL1",
                "chr12\t11649624\t11895427\tETV6|ENSG_ETV6",
                "chr22\t23180000\t23318087\tITD;BCR|ENSG_BCR",
            ]
        );
        assert_eq!(report.selected, 5);
        assert_eq!(report.row_errors.len(), 1);
        assert_eq!(
            report.missing.summary().unwrap(),
            "The following ids were not found and excluded: LOST (gene). Double check spelling or consider classing them as regions"
        );
    }

    #[rstest]
    fn test_tables_and_analysis_select_entities() {
        let table = parse_tsv(LIST.as_bytes()).unwrap();
        let config = PipelineConfig::new(Analysis::Cnv)
            .with_tables(["all"])
            .with_threads(1);

        let report = pipeline(config).run(&table).unwrap();

        assert_eq!(
            as_strings(&report.lines),
            vec!["chr22\t23180365\t23318037\tBCR|ENSG_BCR"]
        );
        assert!(report.missing.is_empty());
        assert!(report.partner_errors.is_empty());
    }

    #[rstest]
    fn test_fail_fast_aborts() {
        let table = parse_tsv(LIST.as_bytes()).unwrap();
        let config = PipelineConfig::new(Analysis::Sv).with_policy(IngestPolicy::FailFast);

        let result = pipeline(config).run(&table);
        assert!(matches!(result, Err(PipelineError::Ingest(_))));
    }
}
