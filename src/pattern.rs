//! The public compiled-pattern type and the `compile` entry point.

use std::cell::RefCell;

use crate::ast::Node;
use crate::dfa::Dfa;
use crate::error::Result;
use crate::parser::Parser;
use crate::term::{TermId, TermStore};

/// A pattern compiled down to a term and an (incrementally built) DFA.
///
/// `store` and `dfa` are wrapped in `RefCell` because matching grows the DFA
/// on demand (new states are discovered lazily as bytes are consumed); the
/// pattern itself is otherwise immutable and safe to match against from
/// multiple call sites once compiled, so long as those calls don't overlap.
pub struct CompiledPattern {
    pub(crate) store: RefCell<TermStore>,
    pub(crate) dfa: RefCell<Dfa>,
    pub(crate) root: TermId,
    pub(crate) group_count: u32,
}

impl CompiledPattern {
    pub fn group_count(&self) -> u32 {
        self.group_count
    }
}

/// Anything that can be turned into a `CompiledPattern`. Mirrors the
/// source's `compile()` dispatch: a raw pattern string is parsed, an AST
/// node is interned directly, and an already-compiled pattern passes
/// through unchanged.
pub trait Compilable {
    fn compile(self) -> Result<CompiledPattern>;
}

impl Compilable for &str {
    fn compile(self) -> Result<CompiledPattern> {
        let mut parser = Parser::new(self);
        let node = parser.parse()?;
        let group_count = parser.group_count();
        (node, group_count).compile()
    }
}

impl Compilable for (Node, u32) {
    fn compile(self) -> Result<CompiledPattern> {
        let (node, group_count) = self;
        let mut store = TermStore::new();
        let root = node.into_term(&mut store);
        Ok(CompiledPattern { store: RefCell::new(store), dfa: RefCell::new(Dfa::new()), root, group_count })
    }
}

impl Compilable for CompiledPattern {
    fn compile(self) -> Result<CompiledPattern> {
        Ok(self)
    }
}

/// Compiles `pattern` into a reusable matcher.
pub fn compile(pattern: impl Compilable) -> Result<CompiledPattern> {
    pattern.compile()
}
