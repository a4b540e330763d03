//! Shared test helpers.

#![allow(dead_code)]

use std::collections::VecDeque;

use rand::{Error, RngCore};

/// Generator that replays a fixed list of `u64` words and panics when it
/// runs dry, so tests can assert exactly how many draws a call consumed.
pub struct ScriptedRng {
    words: VecDeque<u64>,
    consumed: usize,
}

impl ScriptedRng {
    pub fn new(words: &[u64]) -> Self {
        Self { words: words.iter().copied().collect(), consumed: 0 }
    }

    /// Words whose `gen::<f64>()` and `Uniform<f64>` unit fractions both
    /// equal `f`. `f` must be a multiple of 2^-52 in `[0, 1)`.
    pub fn from_fractions(fractions: &[f64]) -> Self {
        let words: Vec<u64> = fractions.iter().map(|&f| fraction(f)).collect();
        Self::new(&words)
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.words.len()
    }
}

/// Raw word mapping to the unit fraction `f`.
pub fn fraction(f: f64) -> u64 {
    assert!((0.0..1.0).contains(&f));
    ((f * (1u64 << 52) as f64) as u64) << 12
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.consumed += 1;
        self.words.pop_front().expect("scripted random stream exhausted")
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
