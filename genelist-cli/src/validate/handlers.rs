use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use log::info;

use genelist_io::read_tsv;
use genelist_regions::{IngestPolicy, ingest};

/// Check a list and report every problem found.
///
/// # Arguments
/// - matches: matched items from CLAP args
pub fn run_validate(matches: &ArgMatches) -> Result<()> {
    let tsv = matches
        .get_one::<String>("tsv")
        .context("A gene list is required")?;
    let policy = match matches.get_flag("fail-fast") {
        true => IngestPolicy::FailFast,
        false => IngestPolicy::SkipAndLog,
    };

    let table = read_tsv(tsv)?;
    let ingested = ingest(&table.header, &table.rows, policy)?;

    for warning in &ingested.warnings {
        println!("warning: {}", warning);
    }
    for error in &ingested.errors {
        println!("error: {}", error);
    }

    info!(
        "{}: {} valid row(s), {} invalid row(s), {} warning(s)",
        tsv,
        ingested.entities.len(),
        ingested.errors.len(),
        ingested.warnings.len()
    );

    match ingested.errors.is_empty() {
        true => Ok(()),
        false => Err(anyhow!("{} contains {} invalid row(s)", tsv, ingested.errors.len())),
    }
}
