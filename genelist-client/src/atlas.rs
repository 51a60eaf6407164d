//! Fusion partners from the Atlas of Genetics and Cytogenetics in Oncology.
//!
//! The Atlas has no API; partners are read from the gene fusion page of a
//! registered gene. The page contract this module relies on:
//!
//! - the partner list sits on the first line containing `</ul>`
//! - entries are separated by `<li class="border list-group-item">`
//! - each entry names genes separated by spaces, optionally followed by a
//!   cytoband in parentheses, e.g. `ABL1 (9q34.12)`
//!
//! A page without a `</ul>` line is treated as markup drift and reported as
//! a transport error.

use std::collections::BTreeSet;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Result, anyhow};
use log::info;
use regex::Regex;
use ureq::Agent;

use genelist_core::errors::{PartnerError, TransportError};
use genelist_core::traits::PartnerLookup;

use super::consts::{ATLAS_IDS, ATLAS_ITEM_DELIMITER, ATLAS_LIST_END};
use super::http::{build_agent, get_text};
use super::utils::{get_default_atlas_url, get_default_timeout, trim_url};

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static CYTOBAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" \(\d?\d?[XY]?[pq]?\d?\d?\.?\d?\d?\d?\)").expect("cytoband pattern is valid")
});

/// Catalog id of a gene, if the catalog has a fusion page for it.
pub fn catalog_id(symbol: &str) -> Option<u32> {
    ATLAS_IDS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, id)| *id)
}

///
/// Extract partner symbols from a fusion page.
///
/// # Returns
/// - sorted, deduplicated partner symbols (may include the page's own gene)
pub fn scrape_partners(url: &str, page: &str) -> Result<Vec<String>, TransportError> {
    let line = page
        .lines()
        .find(|l| l.contains(ATLAS_LIST_END))
        .ok_or_else(|| TransportError::Markup {
            url: url.to_string(),
            reason: format!("no line contains {}", ATLAS_LIST_END),
        })?;

    let partners: BTreeSet<String> = line
        .split(ATLAS_ITEM_DELIMITER)
        .flat_map(|item| {
            let item = TAG_RE.replace_all(item, " ");
            let item = CYTOBAND_RE.replace_all(&item, "");
            item.split_whitespace()
                .filter(|token| token.len() > 1)
                .map(|token| token.to_string())
                .collect::<Vec<String>>()
        })
        .collect();

    Ok(partners.into_iter().collect())
}

/// Builder for constructing an [`AtlasClient`].
#[derive(Default)]
pub struct AtlasClientBuilder {
    root_url: Option<String>,
    timeout: Option<Duration>,
}

impl AtlasClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Atlas root url.
    pub fn with_root_url(mut self, url: String) -> Self {
        self.root_url = Some(url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Consumes the builder and creates an AtlasClient.
    pub fn finish(self) -> Result<AtlasClient> {
        let root_url = self
            .root_url
            .map(trim_url)
            .unwrap_or_else(get_default_atlas_url);
        if !root_url.starts_with("http://") && !root_url.starts_with("https://") {
            return Err(anyhow!("Atlas url must be http(s), got '{}'", root_url));
        }

        let timeout = self.timeout.unwrap_or_else(get_default_timeout);

        Ok(AtlasClient {
            agent: build_agent(timeout),
            root_url,
        })
    }
}

/// Client for the Atlas fusion partner pages.
pub struct AtlasClient {
    agent: Agent,
    root_url: String,
}

impl AtlasClient {
    pub fn builder() -> AtlasClientBuilder {
        AtlasClientBuilder::new()
    }

    /// Fusion page of a registered gene.
    pub fn fusion_url(&self, symbol: &str) -> Result<String, PartnerError> {
        let id = catalog_id(symbol).ok_or_else(|| PartnerError::Unregistered(symbol.to_string()))?;
        Ok(format!("{}/gene-fusions/?id={}", self.root_url, id))
    }
}

impl PartnerLookup for AtlasClient {
    fn partners(&self, id: &str) -> Result<Vec<String>, PartnerError> {
        let url = self.fusion_url(id)?;
        let page = get_text(&self.agent, &url)?;
        let partners = scrape_partners(&url, &page)?;
        info!("Atlas lists {} partner(s) for {}", partners.len(), id);
        Ok(partners)
    }
}
