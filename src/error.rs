// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for melody generation.

use std::io;

use thiserror::Error;

/// Errors raised while validating input or generating a song
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Note name is not one of the 12 chromatic names
    #[error("Invalid note: {0}")]
    InvalidNote(String),
    /// Mode name is not in the mode table
    #[error("Unknown mode: {0}")]
    UnknownMode(String),
    /// Section length outside 1-32 beats
    #[error("Section length must be between 1 and 32 beats.")]
    InvalidLength(u32),
    /// Tempo outside 20-300 BPM
    #[error("BPM must be between 20 and 300.")]
    InvalidBpm(u32),
    /// Per-section settings disagree with the structure template
    #[error("Structure has {expected} sections but {found} {field} were given")]
    SectionCountMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// A computed pitch does not fit in a MIDI note number
    #[error("Pitch {0} is outside the MIDI range 0-127")]
    PitchOutOfRange(u32),
    /// The MIDI file could not be encoded or written
    #[error("MIDI export failed: {0}")]
    Export(#[from] io::Error),
}

impl GenerationError {
    /// True for errors caused by user input rather than the file system
    pub fn is_validation(&self) -> bool {
        !matches!(self, GenerationError::Export(_))
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
