#[cfg(feature = "serde")]
use serde::Deserialize;

use super::interval::Interval;

///
/// Coordinates of one feature as reported by the annotation service.
///
/// Mirrors the hierarchy of a gene: a gene record carries its transcripts,
/// a transcript record carries its exons. Child lists are only populated
/// when the lookup was asked to expand the hierarchy.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct ExternalCoordinateRecord {
    #[cfg_attr(feature = "serde", serde(rename = "id"))]
    pub accession: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub display_name: Option<String>,

    #[cfg_attr(feature = "serde", serde(rename = "seq_region_name"))]
    pub chromosome: String,

    pub start: u32,
    pub end: u32,

    #[cfg_attr(feature = "serde", serde(rename = "Transcript", default))]
    pub transcripts: Vec<ExternalCoordinateRecord>,

    #[cfg_attr(feature = "serde", serde(rename = "Exon", default))]
    pub exons: Vec<ExternalCoordinateRecord>,
}

impl ExternalCoordinateRecord {
    /// The record's span as an unpadded interval.
    pub fn to_interval(&self, annotation: &str) -> Interval {
        Interval::new(&self.chromosome, self.start, self.end, annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_to_interval_keeps_raw_chromosome() {
        let record = ExternalCoordinateRecord {
            accession: "ENSG00000097007".to_string(),
            chromosome: "HG1_PATCH".to_string(),
            start: 130713946,
            end: 130887675,
            ..Default::default()
        };
        let interval = record.to_interval("ABL1|ENSG00000097007");
        assert_eq!(interval.chr, "HG1_PATCH");
        assert_eq!((interval.start, interval.end), (130713946, 130887675));
    }
}
