// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note generators.
//!
//! Generators turn a scale into a sequence of note events that the
//! arrangement layer lays out on the timeline.

pub mod melody;

pub use melody::synthesize;

use crate::music::MidiNote;

/// Ticks per quarter note (PPQN) used for every generated file
pub const TICKS_PER_QUARTER: u16 = 480;

/// Velocity given to every generated note
pub const DEFAULT_VELOCITY: u8 = 100;

/// Shortest section, in beats
pub const MIN_SECTION_BEATS: u32 = 1;

/// Longest section, in beats
pub const MAX_SECTION_BEATS: u32 = 32;

/// A single note produced by a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteEvent {
    /// MIDI note number (0-127)
    pub pitch: MidiNote,
    /// Duration in ticks
    pub duration_ticks: u32,
    /// Velocity (0-127)
    pub velocity: u8,
}

impl NoteEvent {
    /// Create a quarter note at the default velocity
    pub fn quarter(pitch: MidiNote) -> Self {
        Self {
            pitch,
            duration_ticks: TICKS_PER_QUARTER as u32,
            velocity: DEFAULT_VELOCITY,
        }
    }
}
