//! Brzozowski derivatives with capture-event propagation.
//!
//! `derive` walks a term's structure one byte at a time. Alongside the
//! derivative term it returns the `Event`s (group OPEN/CLOSE) that this
//! transition passes over: markers consumed while a nullable prefix is
//! being skipped to reach the next live alternative. When more than one
//! internal alternative is simultaneously live for the same byte, their
//! event sets are unioned; `group::GroupInfo::apply` always closes before
//! it opens, so a union never yields a contradictory ordering.

use std::collections::BTreeSet;

use crate::event::Event;
use crate::term::{TermId, TermKind, TermStore};

fn events_of_markers(store: &TermStore, markers: &[TermId]) -> Vec<Event> {
    let mut out = BTreeSet::new();
    for &m in markers {
        if let TermKind::Marker(events) = &store.get(m).kind {
            out.extend(events.iter().copied());
        }
    }
    out.into_iter().collect()
}

fn union(mut a: Vec<Event>, b: Vec<Event>) -> Vec<Event> {
    let set: BTreeSet<Event> = a.drain(..).chain(b).collect();
    set.into_iter().collect()
}

/// Derive `id` with respect to byte `byte`, returning the derivative term
/// and the events this transition passes over.
pub fn derive(store: &mut TermStore, id: TermId, byte: u8) -> (TermId, Vec<Event>) {
    match store.get(id).kind.clone() {
        TermKind::Empty | TermKind::Epsilon => (store.empty, Vec::new()),
        TermKind::Dot => (store.epsilon, Vec::new()),
        TermKind::Sym(mask) => {
            if mask.contains(byte) { (store.epsilon, Vec::new()) } else { (store.empty, Vec::new()) }
        }
        TermKind::Marker(_) => (store.empty, Vec::new()),
        TermKind::Concat(l, r) => {
            let (dl, el) = derive(store, l, byte);
            let term1 = store.mk_concat(dl, r);
            let events1 = if store.get(dl).isempty { Vec::new() } else { el };

            if store.is_nullable(l) {
                let bypassed = events_of_markers(store, &store.null_markers(l));
                let (dr, er) = derive(store, r, byte);
                let events2 = if store.get(dr).isempty { Vec::new() } else { union(bypassed, er) };
                let result = store.mk_or(term1, dr);
                (result, union(events1, events2))
            } else {
                (term1, events1)
            }
        }
        TermKind::Or(l, r) => {
            // Both sides contribute unconditionally: a dead branch's markers
            // still fed into the shared event accumulator upstream (the
            // source's `regex.py::RegexOr.derive` never gates on emptiness
            // here, unlike Concat's two explicit guards).
            let (dl, el) = derive(store, l, byte);
            let (dr, er) = derive(store, r, byte);
            (store.mk_or(dl, dr), union(el, er))
        }
        TermKind::And(l, r) => {
            let (dl, el) = derive(store, l, byte);
            let (dr, er) = derive(store, r, byte);
            (store.mk_and(dl, dr), union(el, er))
        }
        TermKind::Xor(l, r) => {
            let (dl, el) = derive(store, l, byte);
            let (dr, er) = derive(store, r, byte);
            (store.mk_xor(dl, dr), union(el, er))
        }
        TermKind::Diff(l, r) => {
            // Unconditional, same as Or/And/Xor above: both sides write
            // into the shared accumulator regardless of which one "wins".
            let (dl, el) = derive(store, l, byte);
            let (dr, er) = derive(store, r, byte);
            (store.mk_diff(dl, dr), union(el, er))
        }
        TermKind::Not(e) => {
            let (de, ee) = derive(store, e, byte);
            (store.mk_not(de), ee)
        }
        TermKind::Star(e) => {
            let (de, ee) = derive(store, e, byte);
            (store.mk_concat(de, id), ee)
        }
        TermKind::Plus(e) => {
            let star = store.mk_star(e);
            let (de, ee) = derive(store, e, byte);
            (store.mk_concat(de, star), ee)
        }
        TermKind::Opt(e) => derive(store, e, byte),
        TermKind::Expr(e, gid) => {
            let (de, ee) = derive(store, e, byte);
            (store.mk_expr(de, gid), ee)
        }
    }
}
