use std::ops::{Index, IndexMut, Range};

use crate::algorithm::{edit_distance, DiffAlgorithm, EditOp};
use crate::tokenizers::Token;

/// Myers O(ND) diff algorithm, linear space refinement
///
/// Strips the common prefix and suffix, then searches forward and backward at
/// once for the middle snake of an optimal path, splits both sequences there
/// and recurses into each half. Time is O((N+M)·D) and the two frontiers take
/// O(N+M) space, so fully rewritten documents diff without a trace.
///
/// Within a run of changes all deletions are emitted before the insertions.
pub struct MyersAlgorithm;

impl MyersAlgorithm {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MyersAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffAlgorithm for MyersAlgorithm {
    fn compute(&self, original: &[Token<'_>], modified: &[Token<'_>]) -> Vec<EditOp> {
        let max_d = max_d(original.len(), modified.len());
        let mut forward = Frontier::new(max_d);
        let mut backward = Frontier::new(max_d);
        let mut ops = Vec::with_capacity(original.len() + modified.len());

        conquer(
            original,
            0..original.len(),
            modified,
            0..modified.len(),
            &mut forward,
            &mut backward,
            &mut ops,
        );

        let ops = deletions_first(ops);
        tracing::trace!(
            original_tokens = original.len(),
            modified_tokens = modified.len(),
            edit_distance = edit_distance(&ops),
            "myers search finished"
        );
        ops
    }

    fn name(&self) -> &str {
        "myers"
    }
}

/// Furthest reaching x per diagonal `k = x - y`, for `k` in `-max_d..=max_d`
struct Frontier {
    offset: isize,
    ends: Vec<usize>,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            ends: vec![0; 2 * max_d + 1],
        }
    }
}

impl Index<isize> for Frontier {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.ends[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.ends[(k + self.offset) as usize]
    }
}

/// Upper bound on the number of d-steps either search direction takes
fn max_d(n: usize, m: usize) -> usize {
    (n + m + 1) / 2 + 1
}

fn common_prefix_len(original: &[Token<'_>], modified: &[Token<'_>]) -> usize {
    original
        .iter()
        .zip(modified)
        .take_while(|(a, b)| a.text == b.text)
        .count()
}

fn common_suffix_len(original: &[Token<'_>], modified: &[Token<'_>]) -> usize {
    original
        .iter()
        .rev()
        .zip(modified.iter().rev())
        .take_while(|(a, b)| a.text == b.text)
        .count()
}

/// Find the start of the middle snake of an optimal path through the edit
/// graph of `original[old]` and `modified[new]`, in absolute positions.
/// Both ranges must be non-empty.
fn find_middle_snake(
    original: &[Token<'_>],
    old: Range<usize>,
    modified: &[Token<'_>],
    new: Range<usize>,
    forward: &mut Frontier,
    backward: &mut Frontier,
) -> Option<(usize, usize)> {
    let n = old.len();
    let m = new.len();
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;

    forward[1] = 0;
    backward[1] = 0;

    for d in 0..max_d(n, m) as isize {
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && forward[k - 1] < forward[k + 1]) {
                forward[k + 1]
            } else {
                forward[k - 1] + 1
            };
            let y = (x as isize - k) as usize;
            let (x0, y0) = (x, y);

            if x < n && y < m {
                x += common_prefix_len(
                    &original[old.start + x..old.end],
                    &modified[new.start + y..new.end],
                );
            }
            forward[k] = x;

            // Paths overlap once the forward reach meets the backward one on the
            // mirrored diagonal
            if odd && (k - delta).abs() <= d - 1 && forward[k] + backward[delta - k] >= n {
                return Some((old.start + x0, new.start + y0));
            }
        }

        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && backward[k - 1] < backward[k + 1]) {
                backward[k + 1]
            } else {
                backward[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;

            if x < n && y < m {
                let advance = common_suffix_len(
                    &original[old.start..old.start + n - x],
                    &modified[new.start..new.start + m - y],
                );
                x += advance;
                y += advance;
            }
            backward[k] = x;

            if !odd && (k - delta).abs() <= d && backward[k] + forward[delta - k] >= n {
                return Some((old.start + n - x, new.start + m - y));
            }
        }
    }

    None
}

fn conquer(
    original: &[Token<'_>],
    mut old: Range<usize>,
    modified: &[Token<'_>],
    mut new: Range<usize>,
    forward: &mut Frontier,
    backward: &mut Frontier,
    ops: &mut Vec<EditOp>,
) {
    let prefix = common_prefix_len(&original[old.clone()], &modified[new.clone()]);
    for i in 0..prefix {
        ops.push(EditOp::Equal {
            original: old.start + i,
            modified: new.start + i,
        });
    }
    old.start += prefix;
    new.start += prefix;

    let suffix = common_suffix_len(&original[old.clone()], &modified[new.clone()]);
    old.end -= suffix;
    new.end -= suffix;

    if old.is_empty() {
        ops.extend(new.clone().map(|j| EditOp::Insert { modified: j }));
    } else if new.is_empty() {
        ops.extend(old.clone().map(|i| EditOp::Delete { original: i }));
    } else if let Some((x, y)) =
        find_middle_snake(original, old.clone(), modified, new.clone(), forward, backward)
    {
        conquer(original, old.start..x, modified, new.start..y, forward, backward, ops);
        conquer(original, x..old.end, modified, y..new.end, forward, backward, ops);
    } else {
        ops.extend(old.clone().map(|i| EditOp::Delete { original: i }));
        ops.extend(new.clone().map(|j| EditOp::Insert { modified: j }));
    }

    for i in 0..suffix {
        ops.push(EditOp::Equal {
            original: old.end + i,
            modified: new.end + i,
        });
    }
}

/// Reorder every run of changes so its deletions precede its insertions
fn deletions_first(ops: Vec<EditOp>) -> Vec<EditOp> {
    let mut ordered = Vec::with_capacity(ops.len());
    let mut insertions = Vec::new();

    for op in ops {
        match op {
            EditOp::Insert { .. } => insertions.push(op),
            EditOp::Delete { .. } => ordered.push(op),
            EditOp::Equal { .. } => {
                ordered.append(&mut insertions);
                ordered.push(op);
            }
        }
    }

    ordered.append(&mut insertions);
    ordered
}
