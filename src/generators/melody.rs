// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Ascending scale melody.
//!
//! Walks the scale one degree per beat and moves up an octave each time
//! the degrees run out. Every note is a quarter note at fixed velocity.

use tracing::trace;

use super::{NoteEvent, MAX_SECTION_BEATS, MIN_SECTION_BEATS};
use crate::error::{GenerationError, Result};
use crate::music::scale::{Scale, MAX_MIDI_NOTE};

/// Check a section length against the allowed beat range
pub fn validate_length(length_beats: u32) -> Result<()> {
    if (MIN_SECTION_BEATS..=MAX_SECTION_BEATS).contains(&length_beats) {
        Ok(())
    } else {
        Err(GenerationError::InvalidLength(length_beats))
    }
}

/// Produce `length_beats` note events cycling through `scale`
pub fn synthesize(scale: &Scale, length_beats: u32) -> Result<Vec<NoteEvent>> {
    validate_length(length_beats)?;

    let degrees = scale.len() as u32;
    let pitches = scale.pitches();
    let mut events = Vec::with_capacity(length_beats as usize);

    for beat in 0..length_beats {
        let degree = (beat % degrees) as usize;
        let octave_shift = 12 * (beat / degrees);
        let pitch = pitches[degree] as u32 + octave_shift;
        if pitch > MAX_MIDI_NOTE {
            return Err(GenerationError::PitchOutOfRange(pitch));
        }
        events.push(NoteEvent::quarter(pitch as u8));
    }

    trace!(scale = %scale, beats = length_beats, "synthesized melody");
    Ok(events)
}
