use std::fmt::{self, Display};
use std::path::PathBuf;

use thiserror::Error;

/// The input header does not describe a usable table. Fatal for the whole run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Input is empty, expected a header row")]
    EmptyInput,

    #[error("Found repeated column(s): {}", .0.join(", "))]
    DuplicateColumns(Vec<String>),

    #[error("Found unknown column(s): {}", .0.join(", "))]
    UnknownColumns(Vec<String>),

    #[error("The following columns are missing: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// What exactly was wrong with a single input row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    #[error("header and row length are differing (expected {expected}, found {found})")]
    RowLength { expected: usize, found: usize },

    #[error("identifier is empty")]
    EmptyIdentifier,

    #[error("{0} is not a valid analysis")]
    InvalidAnalysis(String),

    #[error("{0} is not a valid class")]
    InvalidClass(String),

    #[error("{0} does not match expected coordinates string (e.g. chr1:0-10)")]
    InvalidCoordinates(String),

    #[error("{0} is not a valid chromosome")]
    InvalidChromosome(String),

    #[error("start {start} is greater than end {end}")]
    InvertedCoordinates { start: u32, end: u32 },

    #[error("class region requires coordinates")]
    MissingCoordinates,

    #[error("{0} could not be converted to a valid bool")]
    InvalidBool(String),

    #[error("no table given")]
    EmptyTables,
}

/// One row failed the domain rules. The row is skipped, never coerced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("row {row}: {kind}")]
pub struct ValidationError {
    pub row: usize,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(row: usize, kind: ValidationErrorKind) -> Self {
        ValidationError { row, kind }
    }
}

/// An external collaborator could not be reached or answered with something unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Could not reach url {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("Request to {url} returned {status}")]
    Status { url: String, status: u16 },

    #[error("Could not read response to request to {url}: {reason}")]
    Body { url: String, reason: String },

    /// The page was fetched but its markup no longer has the expected shape.
    #[error("Unexpected markup at {url}: {reason}")]
    Markup { url: String, reason: String },
}

/// Failure of the annotation or identifier lookup for one identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{0} was not found")]
    NotFound(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failure of the fusion partner lookup for one entity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartnerError {
    /// The identifier has no entry in the partner catalog registry.
    #[error("Id for {0} is not registered")]
    Unregistered(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The target file could not be created or written.
#[derive(Error, Debug)]
#[error("Could not write bed file {}: {source}", .path.display())]
pub struct OutputError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// A label that is not one of the canonical chromosomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0} is not a valid chromosome")]
pub struct ChromosomeParseError(pub String);

/// A vocabulary token (class, analysis, build) that is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{token} is not a valid {vocabulary}")]
pub struct VocabularyError {
    pub vocabulary: Vocabulary,
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    Analysis,
    Class,
    Build,
}

impl Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Vocabulary::Analysis => "analysis",
            Vocabulary::Class => "class",
            Vocabulary::Build => "genome build",
        };
        write!(f, "{}", name)
    }
}
