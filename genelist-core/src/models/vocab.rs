use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::{Vocabulary, VocabularyError};

///
/// Kind of genomic entity a row describes.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Class {
    Gene,
    Transcript,
    Exon,
    Region,
}

impl Class {
    pub const ALL: [Class; 4] = [Class::Gene, Class::Transcript, Class::Exon, Class::Region];

    pub fn as_str(&self) -> &'static str {
        match self {
            Class::Gene => "gene",
            Class::Transcript => "transcript",
            Class::Exon => "exon",
            Class::Region => "region",
        }
    }

    /// Row index into class-keyed lookup tables.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Prefix of Ensembl accessions for this class, if the class is resolved through Ensembl.
    pub fn accession_prefix(&self) -> Option<&'static str> {
        match self {
            Class::Gene => Some("ENSG"),
            Class::Transcript => Some("ENST"),
            Class::Exon => Some("ENSE"),
            Class::Region => None,
        }
    }
}

impl FromStr for Class {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Class::ALL
            .into_iter()
            .find(|c| c.as_str() == token)
            .ok_or_else(|| VocabularyError {
                vocabulary: Vocabulary::Class,
                token: s.to_string(),
            })
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Downstream variant-calling analysis a list is curated for.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Analysis {
    Snv,
    Cnv,
    Sv,
    Pindel,
}

impl Analysis {
    pub const ALL: [Analysis; 4] = [Analysis::Snv, Analysis::Cnv, Analysis::Sv, Analysis::Pindel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Analysis::Snv => "snv",
            Analysis::Cnv => "cnv",
            Analysis::Sv => "sv",
            Analysis::Pindel => "pindel",
        }
    }

    /// Column index into class-keyed lookup tables.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Analysis {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Analysis::ALL
            .into_iter()
            .find(|a| a.as_str() == token)
            .ok_or_else(|| VocabularyError {
                vocabulary: Vocabulary::Analysis,
                token: s.to_string(),
            })
    }
}

impl Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Reference genome build coordinates are requested for.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GenomeBuild {
    GRCh37,
    #[default]
    GRCh38,
}

impl GenomeBuild {
    /// Short form used on the command line and in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenomeBuild::GRCh37 => "37",
            GenomeBuild::GRCh38 => "38",
        }
    }
}

impl FromStr for GenomeBuild {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_start_matches("grch") {
            "37" | "hg19" => Ok(GenomeBuild::GRCh37),
            "38" | "hg38" => Ok(GenomeBuild::GRCh38),
            _ => Err(VocabularyError {
                vocabulary: Vocabulary::Build,
                token: s.to_string(),
            }),
        }
    }
}

impl Display for GenomeBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
