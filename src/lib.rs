// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Modal melody generator.
//!
//! Builds a song from a structure template such as "Intro-Verse-Chorus",
//! gives every section an ascending melody in its own root and mode, and
//! writes the result as a single-track Standard MIDI file.

pub mod arrangement;
pub mod config;
pub mod error;
pub mod generators;
pub mod music;
pub mod recording;

pub use error::{GenerationError, Result};
