use std::collections::BTreeSet;
use std::fmt::{self, Display};

use super::chromosome::Chromosome;
use super::vocab::{Analysis, Class};

///
/// Coordinates given directly in the input for class `region`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedCoordinates {
    pub chr: Chromosome,
    pub start: u32,
    pub end: u32,
}

impl Display for FixedCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chr{}:{}-{}", self.chr, self.start, self.end)
    }
}

///
/// A validated, canonical record describing one gene, transcript, exon or
/// fixed region to be included in an analysis list.
///
/// `coordinates` is populated if and only if `class` is [Class::Region].
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub id: String,
    pub class: Class,
    pub analyses: BTreeSet<Analysis>,
    pub tables: BTreeSet<String>,
    pub include_partners: bool,
    pub coordinates: Option<FixedCoordinates>,
}

impl Entity {
    ///
    /// A gene entity tagged for structural variant calling only, as produced
    /// by fusion partner expansion.
    ///
    pub fn sv_partner(id: &str, tables: BTreeSet<String>) -> Self {
        Entity {
            id: id.to_string(),
            class: Class::Gene,
            analyses: BTreeSet::from([Analysis::Sv]),
            tables,
            include_partners: false,
            coordinates: None,
        }
    }

    pub fn has_analysis(&self, analysis: Analysis) -> bool {
        self.analyses.contains(&analysis)
    }

    /// True if any of the given table tags is carried by this entity.
    pub fn in_any_table<'a, I>(&self, tables: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        tables.into_iter().any(|t| self.tables.contains(t))
    }

    /// Whether fusion partners should be looked up for this entity.
    pub fn wants_partners(&self) -> bool {
        self.include_partners && self.class == Class::Gene && self.has_analysis(Analysis::Sv)
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.class)
    }
}
