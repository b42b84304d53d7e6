//! The public `Match` type and the `fullmatch`/`match_` entry points.

use crate::group::{merge_into, GroupInfo, GroupMap};
use crate::pattern::CompiledPattern;
use crate::search::prefix_match_from;
use crate::term::TermId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    pub groups: GroupMap,
}

/// Walks `bytes[start..end]` against the compiled pattern, applying every
/// event seen along the way, and finishes by applying the end state's own
/// prefix events, closing anything still open, and synthesizing group 0.
/// Shared by `fullmatch`, `match_`, and `search` so captures are always
/// resolved the same way regardless of how the match's bounds were found.
pub(crate) fn capture(pattern: &CompiledPattern, bytes: &[u8], start: usize, end: usize) -> GroupInfo {
    let mut store = pattern.store.borrow_mut();
    let mut dfa = pattern.dfa.borrow_mut();
    dfa.ensure_state(&mut store, pattern.root);

    let mut state = pattern.root;
    let mut info = GroupInfo::new();
    for (offset, &b) in bytes[start..end].iter().enumerate() {
        let goto = dfa.goto(state, b).expect("caller only replays a known-live prefix").clone();
        info.apply(start + offset, &goto.events);
        state = goto.next;
        dfa.ensure_state(&mut store, state);
    }

    let prefix_events = dfa.state(state).expect("state visited during replay").prefix_events.clone();
    info.apply(end, &prefix_events);
    info.close_all(end);
    info.set(0, (start, end));
    info
}

pub(crate) fn run_to(pattern: &CompiledPattern, bytes: &[u8], start: usize) -> Option<(usize, TermId)> {
    let mut store = pattern.store.borrow_mut();
    let mut dfa = pattern.dfa.borrow_mut();
    dfa.ensure_state(&mut store, pattern.root);
    let mut state = pattern.root;
    for (offset, &b) in bytes[start..].iter().enumerate() {
        match dfa.goto(state, b) {
            Some(goto) => {
                state = goto.next;
                dfa.ensure_state(&mut store, state);
            }
            None => return Some((start + offset, state)),
        }
    }
    Some((bytes.len(), state))
}

/// Matches the whole of `text` against `pattern`, or returns `None` if any
/// suffix remains unconsumed or the final state isn't nullable.
pub fn fullmatch(pattern: &CompiledPattern, text: &str) -> Option<Match> {
    let bytes = text.as_bytes();
    let (reached, state) = run_to(pattern, bytes, 0)?;
    if reached != bytes.len() {
        return None;
    }
    if !pattern.dfa.borrow().is_nullable(state) {
        return None;
    }
    let info = capture(pattern, bytes, 0, bytes.len());
    let mut groups = GroupMap::new();
    merge_into(&mut groups, &info);
    Some(Match { start: 0, end: bytes.len(), groups })
}

/// Matches a prefix of `text` starting at offset 0: the longest such prefix
/// if `greedy`, otherwise the shortest.
pub fn match_(pattern: &CompiledPattern, text: &str, greedy: bool) -> Option<Match> {
    let bytes = text.as_bytes();
    let end = prefix_match_from(pattern, bytes, 0, greedy)?;
    let info = capture(pattern, bytes, 0, end);
    let mut groups = GroupMap::new();
    merge_into(&mut groups, &info);
    Some(Match { start: 0, end, groups })
}
