//! Validation and normalization of input rows into typed entities.

use std::collections::{BTreeSet, HashMap};
use std::fmt::{self, Display};
use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use genelist_core::errors::{SchemaError, ValidationError, ValidationErrorKind};
use genelist_core::models::{Analysis, Chromosome, Class, Entity, FixedCoordinates};
use genelist_core::utils::split_list;
use genelist_io::TsvRow;

use crate::errors::IngestError;

pub const ANALYSES: &str = "analyses";
pub const CLASS: &str = "class";
pub const COORDINATES: &str = "coordinates";
pub const ID: &str = "id";
pub const INCLUDE_PARTNERS: &str = "include_partners";
pub const TABLES: &str = "tables";

/// Every column a list may carry, alphabetically.
pub const COLUMNS: [&str; 6] = [ANALYSES, CLASS, COORDINATES, ID, INCLUDE_PARTNERS, TABLES];

/// Columns that must be present, alphabetically.
pub const REQUIRED_COLUMNS: [&str; 5] = [ANALYSES, CLASS, ID, INCLUDE_PARTNERS, TABLES];

static COORDINATES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(chr)?(\d{1,2}|X|Y|M):(\d+)-(\d+)$").expect("coordinates pattern is valid")
});

/// What to do with a row that fails validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IngestPolicy {
    /// Abort on the first invalid row.
    FailFast,
    /// Skip invalid rows, keeping every error with its row number.
    #[default]
    SkipAndLog,
}

/// A non-fatal adjustment made to a row during ingestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestWarning {
    pub row: usize,
    pub message: String,
}

impl Display for IngestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.message)
    }
}

/// Result of ingesting a whole table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ingested {
    pub entities: Vec<Entity>,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<IngestWarning>,
}

///
/// Positions of the known columns within a validated header.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    width: usize,
    analyses: usize,
    class: usize,
    coordinates: Option<usize>,
    id: usize,
    include_partners: usize,
    tables: usize,
}

///
/// Check a header row against the recognized columns.
///
/// Column names are matched case-insensitively after trimming. Repeated
/// columns are reported first, then unknown ones, then missing ones.
///
/// # Arguments
/// - header: the first row of the input
pub fn validate_header(header: &[String]) -> Result<ColumnLayout, SchemaError> {
    if header.is_empty() || header.iter().all(|h| h.trim().is_empty()) {
        return Err(SchemaError::EmptyInput);
    }

    let mut positions: HashMap<String, usize> = HashMap::with_capacity(header.len());
    let mut duplicates: BTreeSet<String> = BTreeSet::new();
    for (i, h) in header.iter().enumerate() {
        let name = h.trim().to_lowercase();
        if positions.contains_key(&name) {
            duplicates.insert(name);
        } else {
            positions.insert(name, i);
        }
    }
    if !duplicates.is_empty() {
        return Err(SchemaError::DuplicateColumns(duplicates.into_iter().collect()));
    }

    let mut unknown: Vec<String> = positions
        .keys()
        .filter(|name| !COLUMNS.contains(&name.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        unknown.sort();
        return Err(SchemaError::UnknownColumns(unknown));
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !positions.contains_key(**name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns(missing));
    }

    // all required columns are present past this point
    let at = |name: &str| positions[name];

    Ok(ColumnLayout {
        width: header.len(),
        analyses: at(ANALYSES),
        class: at(CLASS),
        coordinates: positions.get(COORDINATES).copied(),
        id: at(ID),
        include_partners: at(INCLUDE_PARTNERS),
        tables: at(TABLES),
    })
}

impl ColumnLayout {
    ///
    /// Turn one row into an [Entity].
    ///
    /// Returns the entity and, if the include-partners flag had to be
    /// dropped, a warning describing it.
    ///
    /// # Arguments
    /// - row: 1-based row number used in errors and warnings
    /// - values: the row's cells, in header order
    pub fn ingest_row(
        &self,
        row: usize,
        values: &[String],
    ) -> Result<(Entity, Option<IngestWarning>), ValidationError> {
        let fail = |kind| ValidationError::new(row, kind);

        if values.len() != self.width {
            return Err(fail(ValidationErrorKind::RowLength {
                expected: self.width,
                found: values.len(),
            }));
        }

        let id = values[self.id].trim().to_string();
        if id.is_empty() {
            return Err(fail(ValidationErrorKind::EmptyIdentifier));
        }

        let class_cell = values[self.class].trim();
        let class: Class = class_cell
            .parse()
            .map_err(|_| fail(ValidationErrorKind::InvalidClass(class_cell.to_string())))?;

        let analyses = parse_analyses(&values[self.analyses]).map_err(fail)?;

        let tables: BTreeSet<String> = split_list(&values[self.tables])
            .into_iter()
            .map(|t| t.to_lowercase())
            .collect();
        if tables.is_empty() {
            return Err(fail(ValidationErrorKind::EmptyTables));
        }

        let mut include_partners = parse_bool(&values[self.include_partners]).map_err(fail)?;

        let coordinates = match class {
            Class::Region => {
                let cell = self.coordinates.map(|i| values[i].trim()).unwrap_or_default();
                if cell.is_empty() {
                    return Err(fail(ValidationErrorKind::MissingCoordinates));
                }
                Some(parse_coordinates(cell).map_err(fail)?)
            }
            _ => None,
        };

        let mut warning = None;
        if include_partners && !(class == Class::Gene && analyses.contains(&Analysis::Sv)) {
            include_partners = false;
            let message = format!(
                "include_partners only applies to class gene with analysis sv, ignoring it for {}",
                id
            );
            warn!("row {}: {}", row, message);
            warning = Some(IngestWarning { row, message });
        }

        let entity = Entity {
            id,
            class,
            analyses,
            tables,
            include_partners,
            coordinates,
        };

        Ok((entity, warning))
    }
}

///
/// Ingest a whole table under the given policy.
///
/// # Arguments
/// - header: the header row
/// - rows: data rows with their line numbers
/// - policy: how invalid rows are treated
pub fn ingest(
    header: &[String],
    rows: &[TsvRow],
    policy: IngestPolicy,
) -> Result<Ingested, IngestError> {
    let layout = validate_header(header)?;
    let mut ingested = Ingested::default();

    for row in rows {
        match layout.ingest_row(row.line, &row.values) {
            Ok((entity, warning)) => {
                ingested.entities.push(entity);
                ingested.warnings.extend(warning);
            }
            Err(err) => match policy {
                IngestPolicy::FailFast => return Err(err.into()),
                IngestPolicy::SkipAndLog => {
                    warn!("Skipping {}", err);
                    ingested.errors.push(err);
                }
            },
        }
    }

    Ok(ingested)
}

fn parse_analyses(cell: &str) -> Result<BTreeSet<Analysis>, ValidationErrorKind> {
    let tokens = split_list(cell);
    if tokens.is_empty() {
        return Err(ValidationErrorKind::InvalidAnalysis(cell.trim().to_string()));
    }

    tokens
        .iter()
        .map(|t| {
            t.parse::<Analysis>()
                .map_err(|_| ValidationErrorKind::InvalidAnalysis(t.to_string()))
        })
        .collect()
}

///
/// Parse a boolean cell. Accepts `true/false`, `1/0`, `t/f` and `yes/no`,
/// case-insensitively.
///
pub fn parse_bool(cell: &str) -> Result<bool, ValidationErrorKind> {
    match cell.trim().to_lowercase().as_str() {
        "true" | "t" | "1" | "yes" => Ok(true),
        "false" | "f" | "0" | "no" => Ok(false),
        _ => Err(ValidationErrorKind::InvalidBool(cell.to_string())),
    }
}

///
/// Parse a `chr1:5-10` style coordinate string.
///
pub fn parse_coordinates(cell: &str) -> Result<FixedCoordinates, ValidationErrorKind> {
    let invalid = || ValidationErrorKind::InvalidCoordinates(cell.to_string());

    let captures = COORDINATES_RE.captures(cell).ok_or_else(invalid)?;

    let chr: Chromosome = captures[2]
        .parse()
        .map_err(|_| ValidationErrorKind::InvalidChromosome(captures[2].to_string()))?;
    let start: u32 = captures[3].parse().map_err(|_| invalid())?;
    let end: u32 = captures[4].parse().map_err(|_| invalid())?;

    if start > end {
        return Err(ValidationErrorKind::InvertedCoordinates { start, end });
    }

    Ok(FixedCoordinates { chr, start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[fixture]
    fn header() -> Vec<String> {
        strings(&["id", "class", "analyses", "tables", "include_partners", "coordinates"])
    }

    #[fixture]
    fn layout(header: Vec<String>) -> ColumnLayout {
        validate_header(&header).unwrap()
    }

    fn row(line: usize, values: &[&str]) -> TsvRow {
        TsvRow {
            line,
            values: strings(values),
        }
    }

    #[rstest]
    fn test_missing_required_columns_are_named() {
        let err = validate_header(&strings(&["class", "id", "tables"])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingColumns(strings(&["analyses", "include_partners"]))
        );
    }

    #[rstest]
    fn test_unknown_columns() {
        let err = validate_header(&strings(&[
            "id", "class", "analyses", "tables", "include_partners", "strand", "comment",
        ]))
        .unwrap_err();
        assert_eq!(err, SchemaError::UnknownColumns(strings(&["comment", "strand"])));
    }

    #[rstest]
    #[case(&["id", "class", "analyses", "tables", "include_partners", "id"], &["id"])]
    #[case(&["id", "Class", "analyses", "tables", " class ", "include_partners"], &["class"])]
    #[case(
        &["tables", "id", "class", "analyses", "tables", "include_partners", "id"],
        &["id", "tables"]
    )]
    fn test_repeated_columns_are_rejected(#[case] header: &[&str], #[case] repeated: &[&str]) {
        let err = validate_header(&strings(header)).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateColumns(strings(repeated)));
    }

    #[rstest]
    fn test_repeated_column_never_shadows_row_values() {
        let header = strings(&["id", "class", "analyses", "tables", "include_partners", "id"]);
        let rows = vec![row(2, &["ABL1", "gene", "sv", "aml", "false", "BCR"])];

        let result = ingest(&header, &rows, IngestPolicy::SkipAndLog);

        assert_eq!(
            result.unwrap_err(),
            IngestError::Schema(SchemaError::DuplicateColumns(strings(&["id"])))
        );
    }

    #[rstest]
    fn test_empty_header() {
        assert_eq!(validate_header(&[]).unwrap_err(), SchemaError::EmptyInput);
    }

    #[rstest]
    fn test_coordinates_column_is_optional() {
        let layout =
            validate_header(&strings(&["ID", "Class", "analyses", "tables", "include_partners"]))
                .unwrap();
        let (entity, _) = layout
            .ingest_row(2, &strings(&["ABL1", "gene", "snv", "aml", "false"]))
            .unwrap();
        assert_eq!(entity.id, "ABL1");
        assert_eq!(entity.coordinates, None);
    }

    #[rstest]
    fn test_region_row(layout: ColumnLayout) {
        let (entity, warning) = layout
            .ingest_row(2, &strings(&["FLT3_ITD", "region", "pindel", "AML", "false", "chr1:5-10"]))
            .unwrap();

        assert_eq!(warning, None);
        assert_eq!(entity.class, Class::Region);
        assert_eq!(entity.tables, BTreeSet::from(["aml".to_string()]));
        assert_eq!(
            entity.coordinates,
            Some(FixedCoordinates {
                chr: "1".parse().unwrap(),
                start: 5,
                end: 10
            })
        );
    }

    #[rstest]
    fn test_gene_row_normalizes_lists(layout: ColumnLayout) {
        let (entity, _) = layout
            .ingest_row(3, &strings(&[" ABL1 ", "Gene", "SNV, sv,snv", "aml, ALL", "1", ""]))
            .unwrap();

        assert_eq!(entity.id, "ABL1");
        assert_eq!(entity.analyses, BTreeSet::from([Analysis::Snv, Analysis::Sv]));
        assert_eq!(
            entity.tables,
            BTreeSet::from(["aml".to_string(), "all".to_string()])
        );
        assert!(entity.include_partners);
    }

    #[rstest]
    fn test_coordinates_ignored_for_genes(layout: ColumnLayout) {
        let (entity, _) = layout
            .ingest_row(2, &strings(&["ABL1", "gene", "cnv", "aml", "no", "chr9:1-2"]))
            .unwrap();
        assert_eq!(entity.coordinates, None);
    }

    #[rstest]
    #[case(&["ABL1", "exon", "sv", "aml", "true", ""])]
    #[case(&["ABL1", "gene", "snv,cnv", "aml", "true", ""])]
    fn test_partner_flag_is_forced_off(layout: ColumnLayout, #[case] values: &[&str]) {
        let (entity, warning) = layout.ingest_row(7, &strings(values)).unwrap();
        assert!(!entity.include_partners);
        assert_eq!(warning.unwrap().row, 7);
    }

    #[rstest]
    #[case(
        &["ABL1", "gene", "snv", "aml", "false"],
        ValidationErrorKind::RowLength { expected: 6, found: 5 }
    )]
    #[case(
        &["  ", "gene", "snv", "aml", "false", ""],
        ValidationErrorKind::EmptyIdentifier
    )]
    #[case(
        &["ABL1", "locus", "snv", "aml", "false", ""],
        ValidationErrorKind::InvalidClass("locus".into())
    )]
    #[case(
        &["ABL1", "gene", "snv,indel", "aml", "false", ""],
        ValidationErrorKind::InvalidAnalysis("indel".into())
    )]
    #[case(
        &["ABL1", "gene", "", "aml", "false", ""],
        ValidationErrorKind::InvalidAnalysis("".into())
    )]
    #[case(
        &["ABL1", "gene", "snv", " , ", "false", ""],
        ValidationErrorKind::EmptyTables
    )]
    #[case(
        &["ABL1", "gene", "snv", "aml", "maybe", ""],
        ValidationErrorKind::InvalidBool("maybe".into())
    )]
    #[case(
        &["R1", "region", "snv", "aml", "false", ""],
        ValidationErrorKind::MissingCoordinates
    )]
    #[case(
        &["R1", "region", "snv", "aml", "false", "chr1:5"],
        ValidationErrorKind::InvalidCoordinates("chr1:5".into())
    )]
    #[case(
        &["R1", "region", "snv", "aml", "false", "chr23:5-10"],
        ValidationErrorKind::InvalidChromosome("23".into())
    )]
    #[case(
        &["R1", "region", "snv", "aml", "false", "chr1:10-5"],
        ValidationErrorKind::InvertedCoordinates { start: 10, end: 5 }
    )]
    fn test_invalid_rows(
        layout: ColumnLayout,
        #[case] values: &[&str],
        #[case] kind: ValidationErrorKind,
    ) {
        let err = layout.ingest_row(4, &strings(values)).unwrap_err();
        assert_eq!(err, ValidationError::new(4, kind));
    }

    #[rstest]
    #[case("true", true)]
    #[case("T", true)]
    #[case("1", true)]
    #[case("Yes", true)]
    #[case("FALSE", false)]
    #[case("f", false)]
    #[case("0", false)]
    #[case("no", false)]
    fn test_parse_bool(#[case] cell: &str, #[case] expected: bool) {
        assert_eq!(parse_bool(cell).unwrap(), expected);
    }

    #[rstest]
    #[case("chr1:5-10", "1", 5, 10)]
    #[case("X:0-0", "X", 0, 0)]
    #[case("chrM:1-16569", "M", 1, 16569)]
    fn test_parse_coordinates(
        #[case] cell: &str,
        #[case] chr: &str,
        #[case] start: u32,
        #[case] end: u32,
    ) {
        let coordinates = parse_coordinates(cell).unwrap();
        assert_eq!(coordinates.chr.label(), chr);
        assert_eq!((coordinates.start, coordinates.end), (start, end));
    }

    #[rstest]
    fn test_skip_and_log_keeps_valid_rows(header: Vec<String>) {
        let rows = vec![
            row(2, &["ABL1", "gene", "sv", "aml", "true", ""]),
            row(3, &["BAD", "locus", "sv", "aml", "true", ""]),
            row(4, &["ENSE00001", "exon", "snv", "aml", "true", ""]),
        ];

        let ingested = ingest(&header, &rows, IngestPolicy::SkipAndLog).unwrap();

        let ids: Vec<&str> = ingested.entities.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ABL1", "ENSE00001"]);
        assert_eq!(ingested.errors.len(), 1);
        assert_eq!(ingested.errors[0].row, 3);
        assert_eq!(ingested.warnings.len(), 1);
        assert_eq!(ingested.warnings[0].row, 4);
    }

    #[rstest]
    fn test_fail_fast_returns_first_error(header: Vec<String>) {
        let rows = vec![
            row(2, &["ABL1", "gene", "sv", "aml", "true", ""]),
            row(3, &["BAD", "locus", "sv", "aml", "true", ""]),
            row(4, &["", "gene", "sv", "aml", "true", ""]),
        ];

        let err = ingest(&header, &rows, IngestPolicy::FailFast).unwrap_err();
        assert_eq!(
            err,
            IngestError::Validation(ValidationError::new(
                3,
                ValidationErrorKind::InvalidClass("locus".into())
            ))
        );
    }

    #[rstest]
    fn test_schema_error_aborts_before_rows() {
        let rows = vec![row(2, &["G1", "gene", "a"])];
        let err = ingest(&strings(&["class", "id", "tables"]), &rows, IngestPolicy::SkipAndLog)
            .unwrap_err();
        assert!(matches!(err, IngestError::Schema(SchemaError::MissingColumns(_))));
    }
}
