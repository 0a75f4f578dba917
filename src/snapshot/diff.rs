//! Line diff between two serialized snapshots.
//!
//! Both inputs are canonical pretty-printed JSON, so each line holds at most
//! one key, value or bracket. Diffing line by line therefore follows the
//! document structure while keeping every byte of both texts: joining the
//! common and removed segments gives back the old text, joining the common
//! and added segments gives back the new one.

/// How a segment relates the old and new text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Present in both
    Common,
    /// Only in the new text
    Added,
    /// Only in the old text
    Removed,
}

/// A run of consecutive lines sharing one [`SegmentKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub value: String,
}

/// Compute the ordered segments turning `old` into `new`
pub fn diff_lines(old: &str, new: &str) -> Vec<Segment> {
    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();

    let prefix = old_lines
        .iter()
        .zip(&new_lines)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old_lines[prefix..]
        .iter()
        .rev()
        .zip(new_lines[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let a = &old_lines[prefix..old_lines.len() - suffix];
    let b = &new_lines[prefix..new_lines.len() - suffix];

    let mut segments = Vec::new();
    for line in &old_lines[..prefix] {
        push(&mut segments, SegmentKind::Common, line);
    }

    // lcs[i][j] = length of the longest common subsequence of a[i..] and b[j..]
    let width = b.len() + 1;
    let mut lcs = vec![0usize; (a.len() + 1) * width];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            lcs[i * width + j] = if a[i] == b[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            push(&mut segments, SegmentKind::Common, a[i]);
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            push(&mut segments, SegmentKind::Removed, a[i]);
            i += 1;
        } else {
            push(&mut segments, SegmentKind::Added, b[j]);
            j += 1;
        }
    }
    for line in &a[i..] {
        push(&mut segments, SegmentKind::Removed, line);
    }
    for line in &b[j..] {
        push(&mut segments, SegmentKind::Added, line);
    }

    for line in &old_lines[old_lines.len() - suffix..] {
        push(&mut segments, SegmentKind::Common, line);
    }

    segments
}

/// Reassemble the old text from a diff
pub fn old_text(segments: &[Segment]) -> String {
    collect(segments, SegmentKind::Removed)
}

/// Reassemble the new text from a diff
pub fn new_text(segments: &[Segment]) -> String {
    collect(segments, SegmentKind::Added)
}

fn collect(segments: &[Segment], side: SegmentKind) -> String {
    segments
        .iter()
        .filter(|s| s.kind == SegmentKind::Common || s.kind == side)
        .map(|s| s.value.as_str())
        .collect()
}

fn push(segments: &mut Vec<Segment>, kind: SegmentKind, line: &str) {
    match segments.last_mut() {
        Some(last) if last.kind == kind => last.value.push_str(line),
        _ => segments.push(Segment {
            kind,
            value: line.to_string(),
        }),
    }
}
