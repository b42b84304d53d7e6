//! A regular expression engine built on Brzozowski derivatives.
//!
//! Patterns are compiled into a hash-consed term algebra (`term`), matched
//! by taking derivatives one byte at a time (`derivative`) while growing an
//! on-the-fly DFA (`dfa`); capture groups ride along as zero-width `Marker`
//! events threaded through `group::GroupInfo`. `fullmatch`, `match_`, and
//! `search` in `matcher`/`search` are the three public entry points.

pub mod ast;
pub mod charset;
pub mod derivative;
pub mod dfa;
pub mod error;
pub mod event;
pub mod group;
pub mod highlight;
pub mod matcher;
pub mod parser;
pub mod pattern;
pub mod search;
pub mod term;

pub use error::{Error, Result};
pub use group::GroupMap;
pub use matcher::{fullmatch, match_, Match};
pub use pattern::{compile, Compilable, CompiledPattern};

/// Searches `text` for matches against `pattern`. Returns the first hit
/// unless `all` is set, in which case every non-overlapping match is
/// returned in order.
pub fn search(pattern: &CompiledPattern, text: &str, greedy: bool, all: bool) -> Vec<Match> {
    if all {
        search::search_all(pattern, text, greedy)
    } else {
        search::search_first(pattern, text, greedy).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullmatch_rejects_partial_consumption() {
        let pattern = compile("ab").unwrap();
        assert!(fullmatch(&pattern, "ab").is_some());
        assert!(fullmatch(&pattern, "abc").is_none());
        assert!(fullmatch(&pattern, "a").is_none());
    }

    #[test]
    fn capture_groups_round_trip_through_search() {
        let pattern = compile("(a)(b)").unwrap();
        let m = fullmatch(&pattern, "ab").unwrap();
        assert_eq!(m.groups.get(&0), Some(&vec![(0, 2)]));
        assert_eq!(m.groups.get(&1), Some(&vec![(0, 1)]));
        assert_eq!(m.groups.get(&2), Some(&vec![(1, 2)]));
    }

    #[test]
    fn repeated_group_keeps_only_last_iteration() {
        let pattern = compile("(ab)*").unwrap();
        let m = fullmatch(&pattern, "abab").unwrap();
        assert_eq!(m.groups.get(&1), Some(&vec![(2, 4)]));
    }

    #[test]
    fn greedy_vs_non_greedy_prefix_match() {
        let pattern = compile("a*").unwrap();
        let greedy = match_(&pattern, "aaab", true).unwrap();
        assert_eq!((greedy.start, greedy.end), (0, 3));
        let lazy = match_(&pattern, "aaab", false).unwrap();
        assert_eq!((lazy.start, lazy.end), (0, 0));
    }

    #[test]
    fn search_all_accumulates_group_spans_across_matches() {
        let pattern = compile("(a)").unwrap();
        let matches = search(&pattern, "aba", true, true);
        assert_eq!(matches.len(), 2);
    }
}
