//! Chromosome-ordered interval merge with annotation concatenation.

use genelist_core::models::interval::{ACCESSION_SEPARATOR, entity_of};
use genelist_core::models::{Chromosome, ConsolidatedLine, Interval};

/// Separates contributions of different entities within one merged line.
pub const ENTITY_SEPARATOR: char = ';';

///
/// An interval placed on a canonical chromosome.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedInterval {
    pub chr: Chromosome,
    pub start: u32,
    pub end: u32,
    pub annotation: String,
}

///
/// Normalize chromosome labels, dropping intervals on non-canonical contigs.
///
pub fn place(intervals: Vec<Interval>) -> Vec<PlacedInterval> {
    intervals
        .into_iter()
        .filter_map(|i| {
            let chr = i.chr.parse::<Chromosome>().ok()?;
            Some(PlacedInterval {
                chr,
                start: i.start,
                end: i.end,
                annotation: i.annotation,
            })
        })
        .collect()
}

///
/// Order intervals with successive stable sorts: annotation, end, start,
/// then chromosome.
///
pub fn sort_multi_pass(intervals: &mut [PlacedInterval]) {
    intervals.sort_by(|a, b| a.annotation.cmp(&b.annotation));
    intervals.sort_by_key(|i| i.end);
    intervals.sort_by_key(|i| i.start);
    intervals.sort_by_key(|i| i.chr);
}

///
/// Order intervals by the composite key (chromosome, start, end, annotation).
///
pub fn sort_composite(intervals: &mut [PlacedInterval]) {
    intervals.sort_by(|a, b| {
        (a.chr, a.start, a.end, &a.annotation).cmp(&(b.chr, b.start, b.end, &b.annotation))
    });
}

///
/// Concatenate the annotations of a merged run.
///
/// A contributor from the same entity as the one before it only adds the
/// part after its entity prefix, separated by `|`; a contributor from a
/// different entity is appended whole, separated by `;`.
///
/// ```text
/// G1|1, G1|2, G4|1  ->  G1|1|2;G4|1
/// ```
pub fn join_annotations<'a, I>(annotations: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut joined = String::new();
    let mut previous: Option<&str> = None;

    for annotation in annotations {
        let entity = entity_of(annotation);
        match previous {
            None => joined.push_str(annotation),
            Some(prev) if prev == entity => {
                let rest = &annotation[entity.len()..];
                let rest = rest.strip_prefix(ACCESSION_SEPARATOR).unwrap_or(rest);
                if !rest.is_empty() {
                    joined.push(ACCESSION_SEPARATOR);
                    joined.push_str(rest);
                }
            }
            Some(_) => {
                joined.push(ENTITY_SEPARATOR);
                joined.push_str(annotation);
            }
        }
        previous = Some(entity);
    }

    joined
}

///
/// Merge intervals into the minimal set of non-overlapping annotated lines.
///
/// Intervals on non-canonical contigs are dropped. An interval joins the
/// current run if it is on the same chromosome and starts at or before the
/// run's end, so touching intervals merge. Output is ordered by canonical
/// chromosome, then start, and does not depend on input order.
///
pub fn consolidate(intervals: Vec<Interval>) -> Vec<ConsolidatedLine> {
    let mut placed = place(intervals);
    if placed.is_empty() {
        return Vec::new();
    }

    sort_composite(&mut placed);

    let mut lines: Vec<ConsolidatedLine> = Vec::new();
    let mut run: Vec<&PlacedInterval> = vec![&placed[0]];
    let mut run_end = placed[0].end;

    for interval in &placed[1..] {
        if interval.chr == run[0].chr && interval.start <= run_end {
            run_end = run_end.max(interval.end);
            run.push(interval);
        } else {
            lines.push(close_run(&run, run_end));
            run = vec![interval];
            run_end = interval.end;
        }
    }
    lines.push(close_run(&run, run_end));

    lines
}

fn close_run(run: &[&PlacedInterval], end: u32) -> ConsolidatedLine {
    ConsolidatedLine {
        chr: run[0].chr,
        start: run[0].start,
        end,
        annotation: join_annotations(run.iter().map(|i| i.annotation.as_str())),
    }
}
