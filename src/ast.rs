//! Parser output: a plain tree consumed to build interned terms.
//!
//! `Node` carries no hash-consing of its own; `into_term` walks it once and
//! feeds every subtree through `TermStore`'s smart constructors, so sharing
//! and simplification only ever happen in the arena.

use crate::charset::Mask256;
use crate::event::Event;
use crate::term::{TermId, TermStore};

#[derive(Clone, Debug)]
pub enum Node {
    Epsilon,
    Literal(u8),
    Dot,
    /// A character class: the union of `ranges` (inclusive), optionally complemented.
    Class { ranges: Vec<(u8, u8)>, negated: bool },
    Concat(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    And(Box<Node>, Box<Node>),
    Xor(Box<Node>, Box<Node>),
    Diff(Box<Node>, Box<Node>),
    Not(Box<Node>),
    Star(Box<Node>),
    Plus(Box<Node>),
    Opt(Box<Node>),
    /// `{min, max}`; `max = None` means unbounded (`{min,}`).
    Repeat(Box<Node>, usize, Option<usize>),
    /// A capturing group, numbered in source order starting at 1.
    Group(Box<Node>, u32),
}

impl Node {
    fn class_mask(ranges: &[(u8, u8)], negated: bool) -> Mask256 {
        let mut mask = Mask256::EMPTY;
        for &(lo, hi) in ranges {
            mask = mask.union(&Mask256::from_bytes(lo..=hi));
        }
        if negated { mask.negate() } else { mask }
    }

    pub fn into_term(self, store: &mut TermStore) -> TermId {
        match self {
            Node::Epsilon => store.epsilon,
            Node::Literal(b) => store.mk_sym(Mask256::singleton(b)),
            Node::Dot => store.mk_dot(),
            Node::Class { ranges, negated } => store.mk_sym(Self::class_mask(&ranges, negated)),
            Node::Concat(l, r) => {
                let l = l.into_term(store);
                let r = r.into_term(store);
                store.mk_concat(l, r)
            }
            Node::Or(l, r) => {
                let l = l.into_term(store);
                let r = r.into_term(store);
                store.mk_or(l, r)
            }
            Node::And(l, r) => {
                let l = l.into_term(store);
                let r = r.into_term(store);
                store.mk_and(l, r)
            }
            Node::Xor(l, r) => {
                let l = l.into_term(store);
                let r = r.into_term(store);
                store.mk_xor(l, r)
            }
            Node::Diff(l, r) => {
                let l = l.into_term(store);
                let r = r.into_term(store);
                store.mk_diff(l, r)
            }
            Node::Not(e) => {
                let e = e.into_term(store);
                store.mk_not(e)
            }
            Node::Star(e) => {
                let e = e.into_term(store);
                store.mk_star(e)
            }
            Node::Plus(e) => {
                let e = e.into_term(store);
                store.mk_plus(e)
            }
            Node::Opt(e) => {
                let e = e.into_term(store);
                store.mk_opt(e)
            }
            Node::Repeat(inner, min, max) => Self::desugar_repeat(*inner, min, max, store),
            Node::Group(inner, gid) => {
                let open = store.mk_marker(vec![Event::open(gid)]);
                let close = store.mk_marker(vec![Event::close(gid)]);
                let body = inner.into_term(store);
                let wrapped = store.mk_concat(store.mk_concat(open, body), close);
                store.mk_expr(wrapped, gid)
            }
        }
    }

    /// Desugars `{n}`, `{m,n}`, `{m,}` and `{,n}` into concatenation/union,
    /// mirroring the source grammar's `make_cat`-style expansion: an exact
    /// count becomes an n-fold concatenation, a bounded range becomes a union
    /// of concatenations of increasing length, and an unbounded range appends
    /// a trailing `Star`.
    fn desugar_repeat(inner: Node, min: usize, max: Option<usize>, store: &mut TermStore) -> TermId {
        let repeat_n = |n: usize, store: &mut TermStore| -> TermId {
            let mut acc = store.epsilon;
            for _ in 0..n {
                let next = inner.clone().into_term(store);
                acc = store.mk_concat(acc, next);
            }
            acc
        };

        match max {
            None => {
                // {min,}: min copies followed by a star of the remainder.
                let head = repeat_n(min, store);
                let tail_term = inner.into_term(store);
                let tail_star = store.mk_star(tail_term);
                store.mk_concat(head, tail_star)
            }
            Some(max) if max == min => repeat_n(min, store),
            Some(max) => {
                // Union of exact-length concatenations for min..=max.
                let mut prefix = repeat_n(min, store);
                let mut alt = prefix;
                for _ in min..max {
                    let next = inner.clone().into_term(store);
                    prefix = store.mk_concat(prefix, next);
                    alt = store.mk_or(alt, prefix);
                }
                alt
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_wraps_body_in_markers_and_expr() {
        let mut s = TermStore::new();
        let node = Node::Group(Box::new(Node::Literal(b'a')), 1);
        let id = node.into_term(&mut s);
        assert!(s.get(id).isexpr);
    }

    #[test]
    fn exact_repeat_desugars_to_n_fold_concat() {
        let mut s = TermStore::new();
        let node = Node::Repeat(Box::new(Node::Literal(b'a')), 3, Some(3));
        let id = node.into_term(&mut s);
        // a{3} should equal a . a . a built directly.
        let mut s2 = TermStore::new();
        let a1 = s2.mk_sym(Mask256::singleton(b'a'));
        let a2 = s2.mk_sym(Mask256::singleton(b'a'));
        let a3 = s2.mk_sym(Mask256::singleton(b'a'));
        let expect = s2.mk_concat(s2.mk_concat(a1, a2), a3);
        assert_eq!(s.get(id).charset, s2.get(expect).charset);
    }

    #[test]
    fn zero_exact_repeat_is_epsilon() {
        let mut s = TermStore::new();
        let node = Node::Repeat(Box::new(Node::Literal(b'a')), 0, Some(0));
        let id = node.into_term(&mut s);
        assert_eq!(id, s.epsilon);
    }
}
