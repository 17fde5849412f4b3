//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece, shuffled. Draws come from the bag
//! until it is empty, then a new bag is shuffled.
//!
//! The engine pulls pieces through [`PieceSource`], so hosts and tests can
//! swap in their own sequence. [`PieceQueue`] keeps the visible preview
//! topped up from whichever source is plugged in.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, MAX_PREVIEW, PIECE_KINDS};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Where the engine gets its pieces from
pub trait PieceSource {
    /// Produce the next piece kind
    fn draw(&mut self) -> PieceKind;

    /// Drop any partially consumed sequence; called on reset
    fn restart(&mut self) {}
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct SevenBag {
    /// Current bag of pieces
    bag: [PieceKind; PIECE_KINDS],
    /// Index into current bag; `PIECE_KINDS` means empty
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl SevenBag {
    /// Create a new bag with the given seed. Nothing is shuffled until the first draw.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: PIECE_KINDS,
            rng: SimpleRng::new(seed),
        }
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Pieces left before the next refill
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl PieceSource for SevenBag {
    fn draw(&mut self) -> PieceKind {
        if self.bag_index >= PIECE_KINDS {
            self.refill_bag();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Empty the bag; the RNG keeps its state, so a reset deals a fresh permutation.
    fn restart(&mut self) {
        self.bag_index = PIECE_KINDS;
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Upcoming pieces, oldest first
#[derive(Debug, Clone, Default)]
pub struct PieceQueue {
    pieces: ArrayVec<PieceKind, MAX_PREVIEW>,
}

impl PieceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw from `source` until the queue holds `len` pieces (capped at [`MAX_PREVIEW`])
    pub fn fill_from<S: PieceSource + ?Sized>(&mut self, source: &mut S, len: usize) {
        let target = len.min(MAX_PREVIEW);
        while self.pieces.len() < target {
            self.pieces.push(source.draw());
        }
    }

    /// Take the front piece and top the queue back up to `len`
    pub fn pop<S: PieceSource + ?Sized>(&mut self, source: &mut S, len: usize) -> PieceKind {
        self.fill_from(source, len.max(1));
        let piece = self.pieces.remove(0);
        self.fill_from(source, len);
        piece
    }

    /// Queued kinds, front first
    pub fn as_slice(&self) -> &[PieceKind] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}
