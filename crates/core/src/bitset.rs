//! fixed-capacity cell bit set - one bit per linear cell index (row * width + col)
//! all shifts are whole-set shifts across word boundaries

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};

pub const WORDS: usize = 10;
pub const MAX_CELLS: usize = WORDS * 64;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellSet {
    words: [u64; WORDS],
}

impl CellSet {
    pub const EMPTY: Self = Self { words: [0; WORDS] };

    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Set containing indices `0..len`.
    pub fn with_first(len: usize) -> Self {
        let len = len.min(MAX_CELLS);
        let mut set = Self::EMPTY;
        let full_words = len / 64;
        for word in set.words.iter_mut().take(full_words) {
            *word = !0;
        }
        let rem = len % 64;
        if rem != 0 {
            set.words[full_words] = (1u64 << rem) - 1;
        }
        set
    }

    #[inline(always)]
    pub fn contains(&self, index: usize) -> bool {
        index < MAX_CELLS && (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    #[inline(always)]
    pub fn insert(&mut self, index: usize) {
        debug_assert!(index < MAX_CELLS);
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    #[inline(always)]
    pub fn remove(&mut self, index: usize) {
        debug_assert!(index < MAX_CELLS);
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    #[inline]
    pub fn intersects(&self, other: &CellSet) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    #[inline]
    pub fn and_not(&self, other: &CellSet) -> CellSet {
        let mut out = *self;
        for (w, o) in out.words.iter_mut().zip(other.words.iter()) {
            *w &= !o;
        }
        out
    }

    /// Shift towards higher indices. Bits pushed past capacity are dropped.
    pub fn shl(&self, n: usize) -> CellSet {
        if n == 0 {
            return *self;
        }
        if n >= MAX_CELLS {
            return Self::EMPTY;
        }
        let word_shift = n / 64;
        let bit_shift = n % 64;
        let mut out = Self::EMPTY;
        for i in (word_shift..WORDS).rev() {
            let src = i - word_shift;
            let mut word = self.words[src] << bit_shift;
            if bit_shift != 0 && src > 0 {
                word |= self.words[src - 1] >> (64 - bit_shift);
            }
            out.words[i] = word;
        }
        out
    }

    /// Shift towards lower indices.
    pub fn shr(&self, n: usize) -> CellSet {
        if n == 0 {
            return *self;
        }
        if n >= MAX_CELLS {
            return Self::EMPTY;
        }
        let word_shift = n / 64;
        let bit_shift = n % 64;
        let mut out = Self::EMPTY;
        for i in 0..WORDS - word_shift {
            let src = i + word_shift;
            let mut word = self.words[src] >> bit_shift;
            if bit_shift != 0 && src + 1 < WORDS {
                word |= self.words[src + 1] << (64 - bit_shift);
            }
            out.words[i] = word;
        }
        out
    }

    /// Lowest set index, if any.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|&(_, &w)| w != 0)
            .map(|(i, w)| i * 64 + w.trailing_zeros() as usize)
    }

    /// Iterate set indices in ascending order.
    pub fn iter(&self) -> CellSetIter {
        CellSetIter {
            words: self.words,
            word: 0,
        }
    }

    #[inline(always)]
    pub fn words(&self) -> &[u64; WORDS] {
        &self.words
    }
}

impl BitAnd for CellSet {
    type Output = CellSet;

    #[inline]
    fn bitand(mut self, rhs: CellSet) -> CellSet {
        self &= rhs;
        self
    }
}

impl BitAndAssign for CellSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: CellSet) {
        for (w, o) in self.words.iter_mut().zip(rhs.words.iter()) {
            *w &= o;
        }
    }
}

impl BitOr for CellSet {
    type Output = CellSet;

    #[inline]
    fn bitor(mut self, rhs: CellSet) -> CellSet {
        self |= rhs;
        self
    }
}

impl BitOrAssign for CellSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: CellSet) {
        for (w, o) in self.words.iter_mut().zip(rhs.words.iter()) {
            *w |= o;
        }
    }
}

/// Complement over the full capacity - mask with board geometry afterwards.
impl Not for CellSet {
    type Output = CellSet;

    #[inline]
    fn not(mut self) -> CellSet {
        for w in self.words.iter_mut() {
            *w = !*w;
        }
        self
    }
}

impl FromIterator<usize> for CellSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = CellSet::EMPTY;
        for index in iter {
            set.insert(index);
        }
        set
    }
}

impl std::fmt::Debug for CellSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

pub struct CellSetIter {
    words: [u64; WORDS],
    word: usize,
}

impl Iterator for CellSetIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.word < WORDS {
            let bits = self.words[self.word];
            if bits != 0 {
                let bit = bits.trailing_zeros() as usize;
                // clear lowest set bit
                self.words[self.word] = bits & (bits - 1);
                return Some(self.word * 64 + bit);
            }
            self.word += 1;
        }
        None
    }
}
