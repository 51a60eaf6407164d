//! Which resolution rule applies to a (class, analysis) pair.

use genelist_core::models::{Analysis, Class};

/// Padding around exons, both sides.
pub const EXON_PADDING: u32 = 10;

/// Padding around whole genes for breakpoint callers (sv, pindel).
pub const BREAKPOINT_PADDING: u32 = 50;

///
/// How an entity is turned into intervals.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Coordinates come straight from the input row.
    Fixed,
    /// The identifier is an exon accession; its own span is padded.
    DirectExon { padding: u32 },
    /// Every exon of the resolved gene or transcript is padded.
    ExonSet { padding: u32 },
    /// The whole resolved gene or transcript span is padded.
    Span { padding: u32 },
}

const EXON: Strategy = Strategy::DirectExon {
    padding: EXON_PADDING,
};
const EXON_SET: Strategy = Strategy::ExonSet {
    padding: EXON_PADDING,
};
const SPAN: Strategy = Strategy::Span { padding: 0 };
const BREAKPOINT_SPAN: Strategy = Strategy::Span {
    padding: BREAKPOINT_PADDING,
};

// rows follow Class::index, columns follow Analysis::index (snv, cnv, sv, pindel)
const STRATEGIES: [[Strategy; 4]; 4] = [
    [EXON_SET, SPAN, BREAKPOINT_SPAN, BREAKPOINT_SPAN],
    [EXON_SET, SPAN, BREAKPOINT_SPAN, BREAKPOINT_SPAN],
    [EXON, EXON, EXON, EXON],
    [Strategy::Fixed; 4],
];

///
/// Look up the resolution rule for a class under an analysis.
///
pub fn strategy(class: Class, analysis: Analysis) -> Strategy {
    STRATEGIES[class.index()][analysis.index()]
}
