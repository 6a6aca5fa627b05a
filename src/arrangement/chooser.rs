// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Root selection for randomized songs.
//!
//! When random notes are enabled, every section after the first takes
//! its root from the harmonic suggestions of the section before it.
//! The pick goes through [`RootChooser`] so callers can swap the RNG
//! for a fixed choice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::music::Note;

/// Picks one root out of a set of candidates
pub trait RootChooser {
    /// Choose one of `candidates`; called with a non-empty slice
    fn choose(&mut self, candidates: &[Note]) -> Note;
}

/// Uniform random choice backed by a `StdRng`
#[derive(Debug, Clone)]
pub struct RandomRootChooser {
    rng: StdRng,
}

impl RandomRootChooser {
    /// Create a chooser seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible chooser
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, OS entropy otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for RandomRootChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl RootChooser for RandomRootChooser {
    fn choose(&mut self, candidates: &[Note]) -> Note {
        candidates[self.rng.gen_range(0..candidates.len())]
    }
}
