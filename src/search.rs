//! Prefix matching and the `search` driver.

use crate::group::{merge_into, GroupMap};
use crate::matcher::{capture, Match};
use crate::pattern::CompiledPattern;

/// Finds the end offset of a matching prefix of `bytes` starting at `start`:
/// the longest one if `greedy`, the shortest otherwise. A zero-length match
/// (the empty prefix) is a candidate whenever the root itself is nullable.
pub fn prefix_match_from(pattern: &CompiledPattern, bytes: &[u8], start: usize, greedy: bool) -> Option<usize> {
    let mut store = pattern.store.borrow_mut();
    let mut dfa = pattern.dfa.borrow_mut();
    dfa.ensure_state(&mut store, pattern.root);

    let mut state = pattern.root;
    let mut best: Option<usize> = if dfa.is_nullable(state) { Some(start) } else { None };
    if best.is_some() && !greedy {
        return best;
    }

    for (offset, &b) in bytes[start..].iter().enumerate() {
        let goto = match dfa.goto(state, b) {
            Some(g) => g.clone(),
            None => break,
        };
        state = goto.next;
        dfa.ensure_state(&mut store, state);
        if dfa.is_nullable(state) {
            let end = start + offset + 1;
            if !greedy {
                return Some(end);
            }
            best = Some(end);
        }
    }
    best
}

/// Finds the first match at or after offset 0, or `None` if there is none.
pub fn search_first(pattern: &CompiledPattern, text: &str, greedy: bool) -> Option<Match> {
    let bytes = text.as_bytes();
    for start in 0..=bytes.len() {
        if let Some(end) = prefix_match_from(pattern, bytes, start, greedy) {
            let info = capture(pattern, bytes, start, end);
            let mut groups = GroupMap::new();
            merge_into(&mut groups, &info);
            return Some(Match { start, end, groups });
        }
    }
    None
}

/// Finds every non-overlapping match in `text`, advancing past the end of
/// each hit (or by one byte, for a zero-length hit, to guarantee progress).
pub fn search_all(pattern: &CompiledPattern, text: &str, greedy: bool) -> Vec<Match> {
    let bytes = text.as_bytes();
    let mut matches = Vec::new();
    let mut start = 0;
    while start <= bytes.len() {
        match prefix_match_from(pattern, bytes, start, greedy) {
            Some(end) => {
                let info = capture(pattern, bytes, start, end);
                let mut groups = GroupMap::new();
                merge_into(&mut groups, &info);
                matches.push(Match { start, end, groups });
                start = if end > start { end } else { start + 1 };
            }
            None => start += 1,
        }
    }
    matches
}
