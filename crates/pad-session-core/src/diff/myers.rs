//! Greedy O(ND) Myers alignment producing a minimal keep / delete / insert script.
//!
//! Ties between equally short scripts resolve the same way on every run: snakes
//! are followed as far as they go, and at a fork the path that has advanced
//! further through the left input wins, with deletion preferred when both are
//! equal. Common leading and trailing items are kept before the search starts.

/// One step of an edit script transforming the left sequence into the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditOp {
    /// The next item of both sides matches.
    Keep,
    /// The next left item has no counterpart.
    Delete,
    /// The next right item has no counterpart.
    Insert,
}

/// Computes a minimal edit script, or `None` when it needs more than `max_edits` edits.
pub(crate) fn edit_script<T: PartialEq>(a: &[T], b: &[T], max_edits: usize) -> Option<Vec<EditOp>> {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let (a_rest, b_rest) = (&a[prefix..], &b[prefix..]);
    let suffix = a_rest
        .iter()
        .rev()
        .zip(b_rest.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let core_a = &a_rest[..a_rest.len() - suffix];
    let core_b = &b_rest[..b_rest.len() - suffix];

    let mut ops = Vec::with_capacity(a.len() + b.len());
    ops.extend(std::iter::repeat_n(EditOp::Keep, prefix));
    ops.extend(shortest_path(core_a, core_b, max_edits)?);
    ops.extend(std::iter::repeat_n(EditOp::Keep, suffix));
    Some(ops)
}

fn shortest_path<T: PartialEq>(a: &[T], b: &[T], max_edits: usize) -> Option<Vec<EditOp>> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max = (n + m) as usize;
    let limit = max.min(max_edits);

    // v[k + offset] = furthest x reached on diagonal k = x - y
    let offset = max as isize + 1;
    let mut v = vec![0isize; 2 * max + 3];
    // Before round d: v on diagonals -(d+1), -(d-1), .., d+1, the only ones round d reads.
    let mut trace: Vec<Vec<u32>> = Vec::new();

    for d in 0..=limit as isize {
        let lo = (offset - d - 1) as usize;
        let hi = (offset + d + 1) as usize;
        trace.push(v[lo..=hi].iter().step_by(2).map(|&x| x as u32).collect());

        let mut k = -d;
        while k <= d {
            let idx = (k + offset) as usize;
            let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }
            v[idx] = x;

            if x >= n && y >= m {
                return Some(backtrack(&trace, d, n, m));
            }
            k += 2;
        }
    }
    None
}

fn backtrack(trace: &[Vec<u32>], final_d: isize, n: isize, m: isize) -> Vec<EditOp> {
    let mut ops = Vec::with_capacity((n + m) as usize);
    let (mut x, mut y) = (n, m);

    for d in (0..=final_d).rev() {
        if d == 0 {
            while x > 0 && y > 0 {
                ops.push(EditOp::Keep);
                x -= 1;
                y -= 1;
            }
            break;
        }

        let snapshot = &trace[d as usize];
        let at = |k: isize| snapshot[((k + d + 1) / 2) as usize] as isize;
        let k = x - y;
        let prev_k = if k == -d || (k != d && at(k - 1) < at(k + 1)) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = at(prev_k);
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            ops.push(EditOp::Keep);
            x -= 1;
            y -= 1;
        }
        ops.push(if x == prev_x {
            EditOp::Insert
        } else {
            EditOp::Delete
        });
        x = prev_x;
        y = prev_y;
    }

    ops.reverse();
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use EditOp::{Delete, Insert, Keep};

    fn script(a: &str, b: &str) -> Vec<EditOp> {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        edit_script(&a, &b, usize::MAX).unwrap()
    }

    fn cost(ops: &[EditOp]) -> usize {
        ops.iter().filter(|op| **op != Keep).count()
    }

    /// Replays a script and checks it really turns `a` into `b`.
    fn apply(a: &str, b: &str, ops: &[EditOp]) -> String {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let (mut i, mut j) = (0, 0);
        let mut out = String::new();
        for op in ops {
            match op {
                Keep => {
                    assert_eq!(a[i], b[j]);
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
                Delete => i += 1,
                Insert => {
                    out.push(b[j]);
                    j += 1;
                }
            }
        }
        assert_eq!((i, j), (a.len(), b.len()));
        out
    }

    #[test]
    fn test_identical_is_all_keeps() {
        assert_eq!(script("abc", "abc"), vec![Keep, Keep, Keep]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(script("", "").is_empty());
        assert_eq!(script("", "ab"), vec![Insert, Insert]);
        assert_eq!(script("ab", ""), vec![Delete, Delete]);
    }

    #[test]
    fn test_single_substitution_deletes_before_inserting() {
        assert_eq!(script("abc", "axc"), vec![Keep, Delete, Insert, Keep]);
    }

    #[test]
    fn test_classic_myers_example_is_minimal() {
        let ops = script("ABCABBA", "CBABAC");
        assert_eq!(cost(&ops), 5);
        assert_eq!(apply("ABCABBA", "CBABAC", &ops), "CBABAC");
    }

    #[test]
    fn test_scripts_are_valid_for_assorted_pairs() {
        let pairs = [
            ("kitten", "sitting"),
            ("abcdef", "azced"),
            ("xxxx", "x"),
            ("a", "bbbb"),
            ("abab", "baba"),
            ("the quick brown fox", "the quack brown box"),
        ];
        for (a, b) in pairs {
            let ops = script(a, b);
            assert_eq!(apply(a, b, &ops), b, "{a} -> {b}");
        }
    }

    #[test]
    fn test_known_edit_distances() {
        assert_eq!(cost(&script("kitten", "sitting")), 5);
        assert_eq!(cost(&script("abab", "baba")), 2);
        assert_eq!(cost(&script("xxxx", "x")), 3);
    }

    #[test]
    fn test_ambiguous_alignment_is_deterministic() {
        let first = script("abab", "baba");
        for _ in 0..5 {
            assert_eq!(script("abab", "baba"), first);
        }
    }

    #[test]
    fn test_edit_limit_is_enforced() {
        let a: Vec<char> = "abcdef".chars().collect();
        let b: Vec<char> = "uvwxyz".chars().collect();
        assert!(edit_script(&a, &b, 11).is_none());
        assert!(edit_script(&a, &b, 12).is_some());
    }

    #[test]
    fn test_prefix_and_suffix_do_not_count_towards_limit() {
        let a: Vec<char> = "aaaaXbbbb".chars().collect();
        let b: Vec<char> = "aaaaYbbbb".chars().collect();
        let ops = edit_script(&a, &b, 2).unwrap();
        assert_eq!(cost(&ops), 2);
        assert_eq!(ops.len(), 10);
    }
}
