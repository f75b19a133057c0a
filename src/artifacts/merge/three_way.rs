//! Three-way text merge
//!
//! Both sides are diffed against the base into change regions (a run of base lines
//! replaced by new lines). Regions from both sides are sorted by base position and
//! clustered when they overlap or touch. A cluster touched by one side applies as is;
//! a cluster where both sides produce the same text applies once; anything else is a
//! conflict, rendered with markers unless a side is preferred.

use crate::artifacts::diff::diff_algorithm::{Edit, MyersDiff};
use crate::artifacts::diff::split_lines;

const OURS_MARKER: &str = "<<<<<<<";
const SEPARATOR_MARKER: &str = "=======";
const THEIRS_MARKER: &str = ">>>>>>>";

/// Side automatically taken for conflicting regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MergePreference {
    /// The checked-out branch
    Ours,
    /// The branch being merged in
    Theirs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeResult {
    Clean(String),
    Conflicted { content: String, regions: usize },
}

impl MergeResult {
    pub fn content(&self) -> &str {
        match self {
            MergeResult::Clean(content) => content,
            MergeResult::Conflicted { content, .. } => content,
        }
    }

    pub fn is_conflicted(&self) -> bool {
        matches!(self, MergeResult::Conflicted { .. })
    }
}

/// What to do with one path of a three-way merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Write(MergeResult),
    Delete,
}

/// A path settled without looking at its lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Untouched<'b> {
    /// The result equals the base
    Base,
    Take(&'b [u8]),
    Delete,
}

/// Settle a path when at most one side changed it, or both changed it the same way.
///
/// Works on raw bytes so content that is not valid UTF-8 is carried over verbatim.
/// `None` means both sides diverged and the lines have to be merged.
pub fn resolve_untouched<'b>(
    base: Option<&'b [u8]>,
    ours: Option<&'b [u8]>,
    theirs: Option<&'b [u8]>,
) -> Option<Untouched<'b>> {
    let result = if ours == theirs || theirs == base {
        ours
    } else if ours == base {
        theirs
    } else {
        return None;
    };

    Some(match result {
        _ if result == base => Untouched::Base,
        Some(bytes) => Untouched::Take(bytes),
        None => Untouched::Delete,
    })
}

/// Branch names written after the conflict markers.
#[derive(Debug, Clone, Copy)]
pub struct MergeLabels<'l> {
    pub ours: &'l str,
    pub theirs: &'l str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Ours,
    Theirs,
}

#[derive(Debug, Clone)]
struct Region<'t> {
    side: Side,
    start: usize,
    end: usize,
    lines: Vec<&'t str>,
}

#[derive(Debug)]
struct Cluster<'t> {
    start: usize,
    end: usize,
    regions: Vec<Region<'t>>,
}

/// Merge a path that may be missing from any of the three versions.
pub fn merge_file(
    base: Option<&str>,
    ours: Option<&str>,
    theirs: Option<&str>,
    labels: MergeLabels<'_>,
    preference: Option<MergePreference>,
) -> FileOutcome {
    match (base, ours, theirs) {
        (_, None, None) => FileOutcome::Delete,
        (None, Some(ours), None) => FileOutcome::Write(MergeResult::Clean(ours.to_string())),
        (Some(base), Some(ours), None) if base == ours => FileOutcome::Delete,
        (base, None, Some(theirs)) if base == Some(theirs) => FileOutcome::Delete,
        (base, ours, theirs) => FileOutcome::Write(merge_text(
            base.unwrap_or_default(),
            ours.unwrap_or_default(),
            theirs.unwrap_or_default(),
            labels,
            preference,
        )),
    }
}

pub fn merge_text(
    base: &str,
    ours: &str,
    theirs: &str,
    labels: MergeLabels<'_>,
    preference: Option<MergePreference>,
) -> MergeResult {
    let base_lines = split_lines(base);
    let ours_lines = split_lines(ours);
    let theirs_lines = split_lines(theirs);

    let mut regions = change_regions(&base_lines, &ours_lines, Side::Ours);
    regions.extend(change_regions(&base_lines, &theirs_lines, Side::Theirs));
    regions.sort_by_key(|region| (region.start, region.end));

    let clusters = cluster(regions);
    debug_log!("{} change clusters", clusters.len());

    let mut content = String::new();
    let mut conflicts = 0;
    let mut position = 0;

    for cluster in clusters {
        content.extend(base_lines[position..cluster.start].iter().copied());

        let has_ours = cluster.regions.iter().any(|r| r.side == Side::Ours);
        let has_theirs = cluster.regions.iter().any(|r| r.side == Side::Theirs);
        let ours_text = apply_side(&base_lines, &cluster, Side::Ours);
        let theirs_text = apply_side(&base_lines, &cluster, Side::Theirs);

        match (has_ours, has_theirs, preference) {
            (true, false, _) => content.extend(ours_text),
            (false, _, _) => content.extend(theirs_text),
            _ if ours_text == theirs_text => content.extend(ours_text),
            (_, _, Some(MergePreference::Ours)) => content.extend(ours_text),
            (_, _, Some(MergePreference::Theirs)) => content.extend(theirs_text),
            (_, _, None) => {
                debug_log!(
                    "conflict over base lines {}..{}",
                    cluster.start,
                    cluster.end
                );
                conflicts += 1;
                write_conflict(&mut content, &ours_text, &theirs_text, labels);
            }
        }

        position = cluster.end;
    }
    content.extend(base_lines[position..].iter().copied());

    if conflicts == 0 {
        MergeResult::Clean(content)
    } else {
        MergeResult::Conflicted {
            content,
            regions: conflicts,
        }
    }
}

fn change_regions<'t>(base: &[&'t str], side_lines: &[&'t str], side: Side) -> Vec<Region<'t>> {
    let mut regions = Vec::new();
    let mut current: Option<Region<'t>> = None;
    let mut position = 0;

    for edit in MyersDiff::new(base, side_lines).diff() {
        match edit {
            Edit::Equal { old, .. } => {
                regions.extend(current.take());
                position = old + 1;
            }
            Edit::Delete { old } => {
                let region = current.get_or_insert_with(|| Region {
                    side,
                    start: old,
                    end: old,
                    lines: Vec::new(),
                });
                region.end = old + 1;
                position = old + 1;
            }
            Edit::Insert { new } => {
                current
                    .get_or_insert_with(|| Region {
                        side,
                        start: position,
                        end: position,
                        lines: Vec::new(),
                    })
                    .lines
                    .push(side_lines[new]);
            }
        }
    }
    regions.extend(current);

    regions
}

fn cluster(regions: Vec<Region<'_>>) -> Vec<Cluster<'_>> {
    let mut clusters: Vec<Cluster<'_>> = Vec::new();

    for region in regions {
        match clusters.last_mut() {
            Some(cluster) if region.start <= cluster.end => {
                cluster.end = cluster.end.max(region.end);
                cluster.regions.push(region);
            }
            _ => clusters.push(Cluster {
                start: region.start,
                end: region.end,
                regions: vec![region],
            }),
        }
    }

    clusters
}

/// The cluster's base span with only `side`'s regions applied.
fn apply_side<'t>(base: &[&'t str], cluster: &Cluster<'t>, side: Side) -> Vec<&'t str> {
    let mut lines = Vec::new();
    let mut position = cluster.start;

    for region in cluster.regions.iter().filter(|r| r.side == side) {
        lines.extend(&base[position..region.start]);
        lines.extend(&region.lines);
        position = region.end;
    }
    lines.extend(&base[position..cluster.end]);

    lines
}

fn write_conflict(content: &mut String, ours: &[&str], theirs: &[&str], labels: MergeLabels<'_>) {
    content.push_str(&format!("{} {}\n", OURS_MARKER, labels.ours));
    push_block(content, ours);
    content.push_str(SEPARATOR_MARKER);
    content.push('\n');
    push_block(content, theirs);
    content.push_str(&format!("{} {}\n", THEIRS_MARKER, labels.theirs));
}

fn push_block(content: &mut String, lines: &[&str]) {
    content.extend(lines.iter().copied());
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
}
