use std::fmt::{self, Display};

use super::chromosome::Chromosome;

/// Separates an entity's own identifier from the accessions it resolved to.
pub const ACCESSION_SEPARATOR: char = '|';

///
/// A single resolved genomic span with an annotation, prior to merging.
///
/// The chromosome label is kept as reported by its source; it is normalized
/// (and non-primary contigs dropped) only when intervals are consolidated.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Interval {
    pub chr: String,
    pub start: u32,
    pub end: u32,
    pub annotation: String,
}

impl Interval {
    pub fn new(chr: &str, start: u32, end: u32, annotation: &str) -> Self {
        Interval {
            chr: chr.to_string(),
            start,
            end,
            annotation: annotation.to_string(),
        }
    }

    ///
    /// Widen the interval symmetrically. The start saturates at 0.
    ///
    pub fn padded(mut self, padding: u32) -> Self {
        self.start = self.start.saturating_sub(padding);
        self.end = self.end.saturating_add(padding);
        self
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chr, self.start, self.end, self.annotation
        )
    }
}

/// Everything before the first `|` of an annotation.
pub fn entity_of(annotation: &str) -> &str {
    annotation
        .split_once(ACCESSION_SEPARATOR)
        .map_or(annotation, |(entity, _)| entity)
}

///
/// A final, non-overlapping, annotated genomic span ready for output.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct ConsolidatedLine {
    pub chr: Chromosome,
    pub start: u32,
    pub end: u32,
    pub annotation: String,
}

impl ConsolidatedLine {
    ///
    /// Get the four-column, tab separated representation of the line
    ///
    pub fn as_string(&self, chr_prefix: bool) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.chr.display_label(chr_prefix),
            self.start,
            self.end,
            self.annotation
        )
    }

    /// View the line as an interval, e.g. to consolidate output again.
    pub fn to_interval(&self) -> Interval {
        Interval {
            chr: self.chr.label().to_string(),
            start: self.start,
            end: self.end,
            annotation: self.annotation.clone(),
        }
    }
}

impl Display for ConsolidatedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_padding_saturates_at_zero() {
        let interval = Interval::new("1", 5, 20, "G1").padded(10);
        assert_eq!(interval.start, 0);
        assert_eq!(interval.end, 30);
    }

    #[rstest]
    fn test_zero_padding_is_identity() {
        let interval = Interval::new("1", 100, 200, "G1");
        assert_eq!(interval.clone().padded(0), interval);
    }

    #[rstest]
    #[case("G1", "G1")]
    #[case("G1|ENSG01", "G1")]
    #[case("G1|ENSG01|ENST01&ENST02|ENSE01", "G1")]
    #[case("", "")]
    fn test_entity_prefix(#[case] annotation: &str, #[case] entity: &str) {
        assert_eq!(entity_of(annotation), entity);
    }

    #[rstest]
    fn test_line_as_string() {
        let line = ConsolidatedLine {
            chr: "X".parse().unwrap(),
            start: 1,
            end: 15,
            annotation: "G1|1|2".to_string(),
        };
        assert_eq!(line.as_string(true), "chrX\t1\t15\tG1|1|2");
        assert_eq!(line.as_string(false), "X\t1\t15\tG1|1|2");
    }
}
