use std::env;
use std::time::Duration;

use log::warn;

use genelist_core::models::GenomeBuild;

use super::consts::{
    ATLAS_ROOT_URL_ENV, DEFAULT_ATLAS_ROOT_URL, DEFAULT_ENSEMBL_37_REST_URL,
    DEFAULT_ENSEMBL_38_REST_URL, DEFAULT_HTTP_TIMEOUT_SECS, ENSEMBL_37_REST_URL_ENV,
    ENSEMBL_38_REST_URL_ENV, HTTP_TIMEOUT_ENV,
};

/// Get the Ensembl REST endpoint for a build from the environment, falling back to the public one
///
/// # Returns
/// - base url without trailing slash
pub fn get_default_ensembl_url(build: GenomeBuild) -> String {
    let (var, default) = match build {
        GenomeBuild::GRCh37 => (ENSEMBL_37_REST_URL_ENV, DEFAULT_ENSEMBL_37_REST_URL),
        GenomeBuild::GRCh38 => (ENSEMBL_38_REST_URL_ENV, DEFAULT_ENSEMBL_38_REST_URL),
    };
    trim_url(env::var(var).unwrap_or_else(|_| default.to_string()))
}

/// Get the Atlas root url from environment variable
pub fn get_default_atlas_url() -> String {
    trim_url(env::var(ATLAS_ROOT_URL_ENV).unwrap_or_else(|_| DEFAULT_ATLAS_ROOT_URL.to_string()))
}

/// Get the request timeout from environment variable. Unparsable values fall back to the default.
pub fn get_default_timeout() -> Duration {
    match env::var(HTTP_TIMEOUT_ENV) {
        Ok(val) => parse_timeout(&val).unwrap_or_else(|| {
            warn!(
                "{}={} is not a number of seconds, using {}",
                HTTP_TIMEOUT_ENV, val, DEFAULT_HTTP_TIMEOUT_SECS
            );
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)
        }),
        Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
    }
}

fn parse_timeout(val: &str) -> Option<Duration> {
    val.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

pub(crate) fn trim_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
