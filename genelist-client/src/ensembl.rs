//! Ensembl REST client.
//!
//! Implements coordinate lookups and symbol cross references against the
//! Ensembl REST API, one endpoint per genome build.

use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::Deserialize;
use ureq::Agent;

use genelist_core::errors::{LookupError, TransportError};
use genelist_core::models::{ExternalCoordinateRecord, GenomeBuild};
use genelist_core::traits::{AnnotationLookup, IdentifierResolver};

use super::consts::{ENSEMBL_SPECIES, JSON_CONTENT_TYPE};
use super::http::{build_agent, get_text};
use super::utils::{get_default_ensembl_url, get_default_timeout, trim_url};

/// Builder for constructing an [`EnsemblClient`].
///
/// Endpoints default to the `ENSEMBL_38_REST_URL` / `ENSEMBL_37_REST_URL`
/// environment variables, then to the public Ensembl servers.
///
/// # Examples
///
/// ```rust,no_run
/// use genelist_client::ensembl::EnsemblClient;
/// use genelist_core::models::GenomeBuild;
///
/// # fn main() -> anyhow::Result<()> {
/// let client = EnsemblClient::builder()
///     .with_url(GenomeBuild::GRCh38, "http://localhost:3000".to_string())
///     .finish()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct EnsemblClientBuilder {
    url_38: Option<String>,
    url_37: Option<String>,
    timeout: Option<Duration>,
}

impl EnsemblClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the REST endpoint for one build.
    pub fn with_url(mut self, build: GenomeBuild, url: String) -> Self {
        match build {
            GenomeBuild::GRCh37 => self.url_37 = Some(url),
            GenomeBuild::GRCh38 => self.url_38 = Some(url),
        }
        self
    }

    /// Sets the per request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Consumes the builder and creates an EnsemblClient.
    pub fn finish(self) -> Result<EnsemblClient> {
        let url_38 = self
            .url_38
            .map(trim_url)
            .unwrap_or_else(|| get_default_ensembl_url(GenomeBuild::GRCh38));
        let url_37 = self
            .url_37
            .map(trim_url)
            .unwrap_or_else(|| get_default_ensembl_url(GenomeBuild::GRCh37));

        for url in [&url_38, &url_37] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow!("Ensembl url must be http(s), got '{}'", url));
            }
        }

        let timeout = self.timeout.unwrap_or_else(get_default_timeout);

        Ok(EnsemblClient {
            agent: build_agent(timeout),
            url_38,
            url_37,
        })
    }
}

/// Client for the Ensembl REST API.
pub struct EnsemblClient {
    agent: Agent,
    url_38: String,
    url_37: String,
}

#[derive(Deserialize)]
struct CrossReference {
    id: String,
}

impl EnsemblClient {
    pub fn builder() -> EnsemblClientBuilder {
        EnsemblClientBuilder::new()
    }

    pub fn base_url(&self, build: GenomeBuild) -> &str {
        match build {
            GenomeBuild::GRCh37 => &self.url_37,
            GenomeBuild::GRCh38 => &self.url_38,
        }
    }

    pub fn lookup_url(&self, accession: &str, build: GenomeBuild, expand: bool) -> String {
        let expand = if expand { ";expand=1" } else { "" };
        format!(
            "{}/lookup/id/{}?{}{}",
            self.base_url(build),
            accession,
            JSON_CONTENT_TYPE,
            expand
        )
    }

    pub fn cross_reference_url(&self, symbol: &str, build: GenomeBuild) -> String {
        format!(
            "{}/xrefs/symbol/{}/{}?{}",
            self.base_url(build),
            ENSEMBL_SPECIES,
            symbol,
            JSON_CONTENT_TYPE
        )
    }

    fn fetch(&self, url: &str, key: &str) -> Result<String, LookupError> {
        get_text(&self.agent, url).map_err(|err| match err {
            TransportError::Status {
                status: 400 | 404, ..
            } => LookupError::NotFound(key.to_string()),
            err => LookupError::Transport(err),
        })
    }
}

/// Decode a lookup response.
pub fn parse_record(url: &str, body: &str) -> Result<ExternalCoordinateRecord, LookupError> {
    serde_json::from_str(body).map_err(|e| {
        LookupError::Transport(TransportError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })
    })
}

/// Decode a cross reference response into accessions, in response order.
pub fn parse_candidates(url: &str, body: &str) -> Result<Vec<String>, LookupError> {
    let references: Vec<CrossReference> = serde_json::from_str(body).map_err(|e| {
        LookupError::Transport(TransportError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })
    })?;
    Ok(references.into_iter().map(|r| r.id).collect())
}

impl AnnotationLookup for EnsemblClient {
    fn lookup(
        &self,
        accession: &str,
        build: GenomeBuild,
        expand: bool,
    ) -> Result<ExternalCoordinateRecord, LookupError> {
        let url = self.lookup_url(accession, build, expand);
        let body = self.fetch(&url, accession)?;
        parse_record(&url, &body)
    }
}

impl IdentifierResolver for EnsemblClient {
    fn candidates(&self, symbol: &str, build: GenomeBuild) -> Result<Vec<String>, LookupError> {
        let url = self.cross_reference_url(symbol, build);
        let body = self.fetch(&url, symbol)?;
        parse_candidates(&url, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn client() -> EnsemblClient {
        EnsemblClient::builder()
            .with_url(GenomeBuild::GRCh38, "https://rest.example.org/".to_string())
            .with_url(GenomeBuild::GRCh37, "https://grch37.example.org".to_string())
            .with_timeout(Duration::from_secs(1))
            .finish()
            .unwrap()
    }

    #[rstest]
    fn test_lookup_urls(client: EnsemblClient) {
        assert_eq!(
            client.lookup_url("ENSG00000097007", GenomeBuild::GRCh38, false),
            "https://rest.example.org/lookup/id/ENSG00000097007?content-type=application/json"
        );
        assert_eq!(
            client.lookup_url("ENSG00000097007", GenomeBuild::GRCh37, true),
            "https://grch37.example.org/lookup/id/ENSG00000097007?content-type=application/json;expand=1"
        );
    }

    #[rstest]
    fn test_cross_reference_url(client: EnsemblClient) {
        assert_eq!(
            client.cross_reference_url("ABL1", GenomeBuild::GRCh38),
            "https://rest.example.org/xrefs/symbol/homo_sapiens/ABL1?content-type=application/json"
        );
    }

    #[rstest]
    fn test_rejects_non_http_url() {
        let result = EnsemblClient::builder()
            .with_url(GenomeBuild::GRCh38, "ftp://rest.example.org".to_string())
            .finish();
        assert!(result.is_err());
    }

    #[rstest]
    fn test_parse_expanded_record() {
        let body = r#"{
            "id": "ENSG01", "display_name": "GENE1", "seq_region_name": "9",
            "start": 100, "end": 500, "strand": 1, "object_type": "Gene",
            "Transcript": [{
                "id": "ENST01", "seq_region_name": "9", "start": 100, "end": 500,
                "Exon": [
                    {"id": "ENSE01", "seq_region_name": "9", "start": 100, "end": 150},
                    {"id": "ENSE02", "seq_region_name": "9", "start": 300, "end": 350}
                ]
            }]
        }"#;

        let record = parse_record("url", body).unwrap();

        assert_eq!(record.accession, "ENSG01");
        assert_eq!(record.display_name.as_deref(), Some("GENE1"));
        assert_eq!(record.transcripts.len(), 1);
        let exons: Vec<&str> = record.transcripts[0]
            .exons
            .iter()
            .map(|e| e.accession.as_str())
            .collect();
        assert_eq!(exons, vec!["ENSE01", "ENSE02"]);
    }

    #[rstest]
    fn test_parse_candidates_keeps_order() {
        let body = r#"[{"type": "gene", "id": "ENSG02"}, {"type": "transcript", "id": "ENST01"}]"#;
        assert_eq!(parse_candidates("url", body).unwrap(), vec!["ENSG02", "ENST01"]);
    }

    #[rstest]
    fn test_malformed_body_is_transport_error() {
        let err = parse_record("https://rest.example.org/x", "<html>").unwrap_err();
        assert!(matches!(err, LookupError::Transport(TransportError::Body { .. })));
    }
}
