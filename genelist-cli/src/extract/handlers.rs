use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use genelist_client::{AtlasClient, EnsemblClient};
use genelist_core::models::{Analysis, GenomeBuild};
use genelist_io::{emit, read_tsv};
use genelist_regions::{IngestPolicy, Pipeline, PipelineConfig};

///
/// Default output name: `{tables}_{analysis}_{build}_{date}.bed`.
///
pub fn default_bed_name(
    tables: &[String],
    analysis: Analysis,
    build: GenomeBuild,
    date: NaiveDate,
) -> String {
    format!(
        "{}_{}_{}_{}.bed",
        tables.join("_"),
        analysis,
        build,
        date.format("%Y-%m-%d")
    )
}

/// Run the full pipeline and write the BED file.
///
/// # Arguments
/// - matches: matched items from CLAP args
pub fn run_extract(matches: &ArgMatches) -> Result<()> {
    let tsv = matches
        .get_one::<String>("tsv")
        .context("A gene list is required")?;
    let analysis: Analysis = matches
        .get_one::<String>("analysis")
        .context("An analysis is required")?
        .parse()?;
    let build: GenomeBuild = matches
        .get_one::<String>("build")
        .context("A genome build is required")?
        .parse()?;
    let tables: Vec<String> = matches
        .get_many::<String>("tables")
        .context("At least one table is required")?
        .map(|t| t.trim().to_lowercase())
        .collect();
    let threads = *matches
        .get_one::<usize>("threads")
        .context("A thread count is required")?;
    let chr_prefix = !matches.get_flag("no-chr");
    let policy = match matches.get_flag("fail-fast") {
        true => IngestPolicy::FailFast,
        false => IngestPolicy::SkipAndLog,
    };
    let bed = matches
        .get_one::<String>("bed")
        .cloned()
        .unwrap_or_else(|| default_bed_name(&tables, analysis, build, Local::now().date_naive()));

    let table = read_tsv(tsv)?;

    let ensembl = EnsemblClient::builder().finish()?;
    let atlas = AtlasClient::builder().finish()?;

    let config = PipelineConfig::new(analysis)
        .with_build(build)
        .with_tables(&tables)
        .with_threads(threads)
        .with_policy(policy);

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
        )?
        .progress_chars("##-"),
    );
    progress.set_message("Resolving");

    let pipeline = Pipeline::new(&ensembl, &ensembl, atlas, config).with_progress(progress);
    let config = pipeline.config();
    info!(
        "Extracting {} regions for table(s) {} on GRCh{} with {} thread(s)",
        config.analysis,
        tables.join(","),
        config.build,
        config.threads
    );
    let report = pipeline.run(&table)?;

    for error in &report.row_errors {
        warn!("Skipped {}", error);
    }
    for (id, error) in &report.partner_errors {
        warn!("No partners added for {}: {}", id, error);
    }

    emit(&report.lines, &bed, chr_prefix)?;
    info!(
        "Wrote {} line(s) from {} entities to {}",
        report.lines.len(),
        report.selected,
        bed
    );

    Ok(())
}
