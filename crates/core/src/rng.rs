//! Small deterministic RNG for cosmetic choices.
//!
//! Paint strokes pick a random block tag per cell and the host picks a random
//! next piece when the engine gives no hint. Neither choice has any logical
//! meaning, so a seeded LCG keeps tests reproducible.

use crate::types::{BlockTag, PieceKind};

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

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in [0, max); the high bits of an LCG are the well-mixed ones
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u32() >> 16) % max
    }

    /// Uniformly pick one item; `None` for an empty slice
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(items.len() as u32) as usize).copied()
    }

    pub fn next_tag(&mut self) -> BlockTag {
        self.pick(&BlockTag::ALL).unwrap_or(BlockTag::Primary)
    }

    pub fn next_piece(&mut self) -> PieceKind {
        self.pick(&PieceKind::ALL).unwrap_or(PieceKind::T)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
