use anyhow::{Context, Result};
use clap::ArgMatches;
use log::warn;

use genelist_client::AtlasClient;
use genelist_core::traits::PartnerLookup;

///
/// Format `gene\tpartner1,partner2` for every gene whose lookup succeeds.
///
/// A failed lookup is logged and skipped; later genes are still listed.
///
pub fn partner_lines<P: PartnerLookup>(lookup: &P, genes: &[&str]) -> Vec<String> {
    genes
        .iter()
        .filter_map(|gene| match lookup.partners(gene) {
            Ok(partners) => {
                let partners: Vec<String> = partners.into_iter().filter(|p| p != gene).collect();
                Some(format!("{}\t{}", gene, partners.join(",")))
            }
            Err(err) => {
                warn!("No partners listed for {}: {}", gene, err);
                None
            }
        })
        .collect()
}

/// Print the fusion partners of every requested gene, one gene per line.
///
/// # Arguments
/// - matches: matched items from CLAP args
pub fn run_partners(matches: &ArgMatches) -> Result<()> {
    let genes: Vec<&str> = matches
        .get_many::<String>("gene")
        .context("At least one gene is required")?
        .map(|g| g.as_str())
        .collect();

    let atlas = AtlasClient::builder().finish()?;

    for line in partner_lines(&atlas, &genes) {
        println!("{}", line);
    }

    Ok(())
}
