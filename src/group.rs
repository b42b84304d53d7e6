//! Capture-group bookkeeping driven by the OPEN/CLOSE events a match replay emits.

use std::collections::HashMap;

use crate::event::{Event, EventKind};

/// Tracks capture-group spans for a single match in progress.
///
/// `active` holds the start index of a group that has been opened but not
/// yet closed; `finalized` holds the most recently closed `(start, end)` span
/// per group. Both maps use overwrite semantics: re-entering a group (e.g.
/// inside a `Star`) replaces the previous start/span rather than appending
/// to it, so a repeated group only ever remembers its last iteration.
#[derive(Default, Clone, Debug)]
pub struct GroupInfo {
    active: HashMap<u32, usize>,
    finalized: HashMap<u32, (usize, usize)>,
}

impl GroupInfo {
    pub fn new() -> GroupInfo {
        GroupInfo::default()
    }

    /// Apply the events observed at `index`, closes before opens.
    pub fn apply(&mut self, index: usize, events: &[Event]) {
        for ev in events {
            if ev.kind == EventKind::Close {
                if let Some(start) = self.active.remove(&ev.gid) {
                    self.finalized.insert(ev.gid, (start, index));
                }
            }
        }
        for ev in events {
            if ev.kind == EventKind::Open {
                self.active.insert(ev.gid, index);
            }
        }
    }

    /// Force-close every group still active at `end`, e.g. when a match
    /// terminates without a matching CLOSE event (malformed traversal aside,
    /// this also covers the synthetic group 0 span).
    pub fn close_all(&mut self, end: usize) {
        for (gid, start) in self.active.drain().collect::<Vec<_>>() {
            self.finalized.insert(gid, (start, end));
        }
    }

    pub fn finalized(&self) -> &HashMap<u32, (usize, usize)> {
        &self.finalized
    }

    pub fn set(&mut self, gid: u32, span: (usize, usize)) {
        self.finalized.insert(gid, span);
    }
}

/// The public capture result: each group id maps to the spans it matched,
/// in match order. `search(.., all=true)` extends each group's vector across
/// every non-overlapping match found; a single `fullmatch`/`match_`/`search`
/// hit produces a one-element vector per group that participated.
pub type GroupMap = HashMap<u32, Vec<(usize, usize)>>;

pub fn merge_into(target: &mut GroupMap, info: &GroupInfo) {
    for (&gid, &span) in info.finalized() {
        target.entry(gid).or_default().push(span);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_open_overwrites_active_start() {
        let mut g = GroupInfo::new();
        g.apply(0, &[Event::open(1)]);
        g.apply(2, &[Event::close(1)]);
        g.apply(2, &[Event::open(1)]);
        g.apply(4, &[Event::close(1)]);
        assert_eq!(g.finalized().get(&1), Some(&(2, 4)));
    }

    #[test]
    fn close_before_open_at_same_index() {
        let mut g = GroupInfo::new();
        g.apply(0, &[Event::open(1)]);
        g.apply(2, &[Event::close(1), Event::open(1)]);
        g.apply(3, &[Event::close(1)]);
        assert_eq!(g.finalized().get(&1), Some(&(2, 3)));
    }

    #[test]
    fn merge_into_accumulates_across_matches() {
        let mut map = GroupMap::new();
        let mut g1 = GroupInfo::new();
        g1.set(1, (0, 1));
        merge_into(&mut map, &g1);
        let mut g2 = GroupInfo::new();
        g2.set(1, (3, 4));
        merge_into(&mut map, &g2);
        assert_eq!(map.get(&1), Some(&vec![(0, 1), (3, 4)]));
    }
}
