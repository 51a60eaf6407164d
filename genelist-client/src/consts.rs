//! Constants for service endpoints and the partner catalog.
//!
//! This module defines environment variable names, default endpoints and the
//! static registry of genes the partner catalog knows about.

// Environment variable names

/// Environment variable name for the GRCh38 Ensembl REST endpoint.
///
/// # Example
///
/// ```bash
/// export ENSEMBL_38_REST_URL=http://localhost:3000
/// ```
pub const ENSEMBL_38_REST_URL_ENV: &str = "ENSEMBL_38_REST_URL";

/// Environment variable name for the GRCh37 Ensembl REST endpoint.
pub const ENSEMBL_37_REST_URL_ENV: &str = "ENSEMBL_37_REST_URL";

/// Environment variable name for the root of the Atlas of Genetics and Cytogenetics in Oncology.
pub const ATLAS_ROOT_URL_ENV: &str = "ATLAS_ROOT_URL";

/// Environment variable name for the per request timeout, in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "GENELIST_HTTP_TIMEOUT";

// Defaults

pub const DEFAULT_ENSEMBL_38_REST_URL: &str = "https://rest.ensembl.org";
pub const DEFAULT_ENSEMBL_37_REST_URL: &str = "https://grch37.rest.ensembl.org";
pub const DEFAULT_ATLAS_ROOT_URL: &str = "https://atlasgeneticsoncology.org";

/// Default per request timeout, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

pub const ENSEMBL_SPECIES: &str = "homo_sapiens";
pub const JSON_CONTENT_TYPE: &str = "content-type=application/json";

// Partner catalog

/// Catalog ids of the genes with a fusion partner page.
pub const ATLAS_IDS: [(&str, u32); 16] = [
    ("ABL1", 1),
    ("ABL2", 226),
    ("CRLF2", 51262),
    ("CSF1R", 40161),
    ("ETV6", 38),
    ("FGFR1", 113),
    ("IGH", 40),
    ("JAK2", 98),
    ("KAT6A", 25),
    ("KMT2A", 13),
    ("MLLT10", 4),
    ("NUP98", 63),
    ("NUTM1", 41595),
    ("PDGFRB", 21),
    ("RARA", 46),
    ("RUNX1", 52),
];

/// Opens one partner entry in the fusion page markup.
pub const ATLAS_ITEM_DELIMITER: &str = r#"<li class="border list-group-item">"#;

/// Closes the partner list in the fusion page markup.
pub const ATLAS_LIST_END: &str = "</ul>";
