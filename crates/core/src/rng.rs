//! RNG module - deterministic generator and the upcoming-color queue
//!
//! `SimpleRng` is a small LCG so that a seed fully determines a game. It
//! implements [`rand::RngCore`], so the engine can take it or any other
//! generator from the `rand` ecosystem.
//!
//! `UpcomingColors` holds the pre-drawn colors of the next spawn step, which a
//! front-end can show as a preview.

use std::collections::VecDeque;

use rand::seq::IndexedRandom;
use rand::RngCore;

use crate::types::Color;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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

    /// Random value in `[0, max)`, taken from the high bits; `max == 0` gives 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current state, usable as a seed to replay from this point
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RngCore for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        SimpleRng::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand::rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand::rand_core::impls::fill_bytes_via_next(self, dst)
    }
}

/// Colors of the next spawn step, front first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingColors {
    queue: VecDeque<Color>,
    target: usize,
}

impl UpcomingColors {
    /// Empty queue that [`refill`](Self::refill) tops up to `target` colors
    pub fn new(target: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(target),
            target,
        }
    }

    /// Draw colors uniformly from `palette` until the queue holds `target`.
    pub fn refill<R: RngCore + ?Sized>(&mut self, rng: &mut R, palette: &[Color]) {
        while self.queue.len() < self.target {
            let Some(&color) = palette.choose(rng) else {
                return;
            };
            self.queue.push_back(color);
        }
    }

    /// Take the front color
    pub fn pop(&mut self) -> Option<Color> {
        self.queue.pop_front()
    }

    pub fn peek(&self) -> Option<Color> {
        self.queue.front().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.queue.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Color> {
        self.queue.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
