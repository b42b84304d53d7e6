//! 256-bit mask algebra over the byte alphabet Σ = {0..255}.

use std::cmp::Ordering;

/// A 256-bit mask, stored as four `u64` words (bit `b` lives in word `b / 64`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Mask256([u64; 4]);

impl Mask256 {
    pub const EMPTY: Mask256 = Mask256([0; 4]);
    pub const FULL: Mask256 = Mask256([u64::MAX; 4]);

    pub fn singleton(byte: u8) -> Mask256 {
        let mut words = [0u64; 4];
        words[(byte / 64) as usize] = 1u64 << (byte % 64);
        Mask256(words)
    }

    pub fn from_bytes(bytes: impl IntoIterator<Item = u8>) -> Mask256 {
        let mut m = Mask256::EMPTY;
        for b in bytes {
            m = m.union(&Mask256::singleton(b));
        }
        m
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|w| *w == 0)
    }

    pub fn contains(&self, byte: u8) -> bool {
        let word = self.0[(byte / 64) as usize];
        word & (1u64 << (byte % 64)) != 0
    }

    pub fn union(&self, other: &Mask256) -> Mask256 {
        let mut out = [0u64; 4];
        for i in 0..4 {
            out[i] = self.0[i] | other.0[i];
        }
        Mask256(out)
    }

    pub fn intersect(&self, other: &Mask256) -> Mask256 {
        let mut out = [0u64; 4];
        for i in 0..4 {
            out[i] = self.0[i] & other.0[i];
        }
        Mask256(out)
    }

    pub fn negate(&self) -> Mask256 {
        let mut out = [0u64; 4];
        for i in 0..4 {
            out[i] = !self.0[i];
        }
        Mask256(out)
    }

    /// Maximal contiguous `(lo, hi)` byte intervals (inclusive) covered by this mask.
    pub fn intervals(&self) -> Vec<(u8, u8)> {
        let mut out = Vec::new();
        let mut start: Option<u16> = None;
        for b in 0..=255u16 {
            let set = self.contains(b as u8);
            match (set, start) {
                (true, None) => start = Some(b),
                (false, Some(s)) => {
                    out.push((s as u8, (b - 1) as u8));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            out.push((s as u8, 255));
        }
        out
    }
}

impl PartialOrd for Mask256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Mask256 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

/// A partitioning hint over Σ: a small set of masks whose pairwise intersections
/// are used to refine character classes across compound terms.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CharSet {
    masks: Vec<Mask256>,
}

impl CharSet {
    pub fn full() -> CharSet {
        CharSet { masks: vec![Mask256::FULL] }
    }

    pub fn from_mask(mask: Mask256) -> CharSet {
        let mut cs = CharSet { masks: Vec::new() };
        cs.push(mask);
        cs
    }

    /// A symbol's charset: the matched mask and its complement, skipping whichever is empty.
    pub fn for_symbol(match_mask: Mask256) -> CharSet {
        let mut cs = CharSet { masks: Vec::new() };
        cs.push(match_mask);
        cs.push(match_mask.negate());
        if cs.masks.is_empty() {
            cs.push(Mask256::FULL);
        }
        cs
    }

    fn push(&mut self, mask: Mask256) {
        if mask.is_empty() {
            return;
        }
        if !self.masks.contains(&mask) {
            self.masks.push(mask);
        }
    }

    /// Pairwise intersection: {a ∧ b | a ∈ self, b ∈ other, a ∧ b ≠ 0}.
    pub fn and(&self, other: &CharSet) -> CharSet {
        let mut out = CharSet { masks: Vec::new() };
        for a in &self.masks {
            for b in &other.masks {
                out.push(a.intersect(b));
            }
        }
        out
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.masks.iter().any(|m| m.contains(byte))
    }

    /// For each mask, its maximal contiguous intervals, used to build DFA transition tables.
    pub fn partition(&self) -> Vec<Vec<(u8, u8)>> {
        self.masks.iter().map(|m| m.intervals()).collect()
    }
}
