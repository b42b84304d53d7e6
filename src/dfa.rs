//! On-the-fly DFA construction over the term algebra.
//!
//! States are term handles; transition metadata is kept in a side table
//! (`Dfa::states`) rather than mutating interned terms, so the same term
//! can appear in multiple compiled patterns' state graphs without carrying
//! DFA-specific baggage.

use std::collections::HashMap;

use crate::derivative::derive;
use crate::event::Event;
use crate::term::{TermId, TermStore};

/// One outgoing transition: the state reached and the events passed over.
#[derive(Clone, Debug)]
pub struct Goto {
    pub next: TermId,
    pub events: Vec<Event>,
}

/// Per-state metadata computed once, on first visit, during `build`.
pub struct StateMeta {
    pub nullable: bool,
    /// Events implied by this state's own nullable structure, applied when
    /// a match ends here without consuming another byte.
    pub prefix_events: Vec<Event>,
    /// 256-entry byte-indexed transition table; `None` means "dead" (∅).
    pub table: Vec<Option<Goto>>,
}

/// A compiled transition graph, built lazily from a root term and grown by
/// `step` as previously unseen states are reached.
pub struct Dfa {
    states: HashMap<TermId, StateMeta>,
}

impl Dfa {
    pub fn new() -> Dfa {
        Dfa { states: HashMap::new() }
    }

    pub fn state(&self, id: TermId) -> Option<&StateMeta> {
        self.states.get(&id)
    }

    pub fn is_nullable(&self, id: TermId) -> bool {
        self.states.get(&id).map(|m| m.nullable).unwrap_or(false)
    }

    /// Ensures `id`'s transition row is present, deriving it over every byte
    /// partition implied by its charset. Idempotent: already-visited states
    /// are returned from the side table without recomputation.
    pub fn ensure_state(&mut self, store: &mut TermStore, id: TermId) {
        if self.states.contains_key(&id) {
            return;
        }
        log::debug!("dfa: discovering state {id:?} (worklist depth so far: {})", self.states.len());
        let nullable = store.is_nullable(id);
        let prefix_events = {
            let markers = store.null_markers(id);
            let mut events = Vec::new();
            for m in markers.iter() {
                if let crate::term::TermKind::Marker(evs) = &store.get(*m).kind {
                    events.extend(evs.iter().copied());
                }
            }
            events
        };
        // Reserve the slot before recursing so cyclic state graphs (loops via
        // Star) don't re-enter ensure_state for the same id.
        self.states.insert(id, StateMeta { nullable, prefix_events, table: vec![None; 256] });

        let mut entries: Vec<(Vec<u8>, Option<Goto>)> = Vec::new();
        let charset_groups = store.get(id).charset.partition();
        for group in &charset_groups {
            if group.is_empty() {
                continue;
            }
            let (rep, _) = group[0];
            let (next, events) = derive(store, id, rep);
            let goto = if store.get(next).isempty { None } else { Some(Goto { next, events }) };
            let bytes: Vec<u8> = group.iter().flat_map(|&(lo, hi)| lo..=hi).collect();
            entries.push((bytes, goto));
            self.ensure_state(store, next);
        }

        let meta = self.states.get_mut(&id).expect("state just inserted");
        let mut populated = 0usize;
        for (bytes, goto) in entries {
            for b in bytes {
                meta.table[b as usize] = goto.clone();
                populated += 1;
            }
        }
        log::debug!("dfa: state {id:?} populated {populated}/256 table entries, total states {}", self.states.len());
    }

    pub fn goto(&self, id: TermId, byte: u8) -> Option<&Goto> {
        self.states.get(&id)?.table[byte as usize].as_ref()
    }
}

impl Default for Dfa {
    fn default() -> Self {
        Dfa::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::Mask256;

    #[test]
    fn literal_chain_has_exactly_the_expected_path() {
        let mut store = TermStore::new();
        let a = store.mk_sym(Mask256::singleton(b'a'));
        let b = store.mk_sym(Mask256::singleton(b'b'));
        let ab = store.mk_concat(a, b);
        let mut dfa = Dfa::new();
        dfa.ensure_state(&mut store, ab);
        assert!(!dfa.is_nullable(ab));
        let g1 = dfa.goto(ab, b'a').expect("a should be live");
        assert!(!dfa.is_nullable(g1.next));
        let g2 = dfa.goto(g1.next, b'b').expect("b should be live");
        assert!(dfa.is_nullable(g2.next));
        assert!(dfa.goto(ab, b'x').is_none());
    }

    #[test]
    fn star_loops_back_to_same_state() {
        let mut store = TermStore::new();
        let a = store.mk_sym(Mask256::singleton(b'a'));
        let star = store.mk_star(a);
        let mut dfa = Dfa::new();
        dfa.ensure_state(&mut store, star);
        assert!(dfa.is_nullable(star));
        let g = dfa.goto(star, b'a').expect("a should be live");
        assert_eq!(g.next, star);
    }
}
