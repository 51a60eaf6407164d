use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::ChromosomeParseError;

/// Canonical chromosome labels, in canonical order.
pub const CHROMOSOMES: [&str; 25] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y", "M",
];

pub const CHR_PREFIX: &str = "chr";

///
/// One of the 25 primary human chromosomes.
///
/// Ordering follows canonical order: 1..22, X, Y, M. Labels are parsed with
/// or without a `chr` prefix; alternate contigs and patch scaffolds do not
/// parse.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Chromosome(u8);

impl Chromosome {
    /// Position in canonical order, starting at 0 for chromosome 1.
    pub fn rank(&self) -> usize {
        self.0 as usize
    }

    /// Label without prefix, e.g. `X`.
    pub fn label(&self) -> &'static str {
        CHROMOSOMES[self.rank()]
    }

    /// Label, optionally `chr`-prefixed.
    pub fn display_label(&self, chr_prefix: bool) -> String {
        match chr_prefix {
            true => format!("{}{}", CHR_PREFIX, self.label()),
            false => self.label().to_string(),
        }
    }
}

impl FromStr for Chromosome {
    type Err = ChromosomeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let label = label.strip_prefix(CHR_PREFIX).unwrap_or(label);
        CHROMOSOMES
            .iter()
            .position(|c| *c == label)
            .map(|rank| Chromosome(rank as u8))
            .ok_or_else(|| ChromosomeParseError(s.to_string()))
    }
}

impl Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
