// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note, mode and scale tables.
//!
//! Provides the 12 chromatic note names, the seven diatonic modes with
//! their step patterns, the circle of fifths, and scale construction
//! from a root pitch and a mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// Highest valid MIDI note number
pub const MAX_MIDI_NOTE: u32 = 127;

/// MIDI note of middle C; section roots are anchored in this octave
pub const MIDDLE_C: MidiNote = 60;

/// Number of degrees in every mode
pub const SCALE_DEGREES: usize = 7;

/// Pitch classes ordered by ascending perfect fifths
pub const CIRCLE_OF_FIFTHS: [u8; 12] = [0, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10, 5];

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> u8 {
        self as u8
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: u8) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Canonical sharp spelling ("C", "C#", ...)
    pub fn name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        }
    }

    /// Parse note from string (e.g., "C", "C#", "Db", "f#")
    pub fn parse(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "C" | "B#" | "BS" => Ok(Note::C),
            "C#" | "CS" | "DB" => Ok(Note::Cs),
            "D" => Ok(Note::D),
            "D#" | "DS" | "EB" => Ok(Note::Ds),
            "E" | "FB" => Ok(Note::E),
            "F" | "E#" | "ES" => Ok(Note::F),
            "F#" | "FS" | "GB" => Ok(Note::Fs),
            "G" => Ok(Note::G),
            "G#" | "GS" | "AB" => Ok(Note::Gs),
            "A" => Ok(Note::A),
            "A#" | "AS" | "BB" => Ok(Note::As),
            "B" | "CB" => Ok(Note::B),
            _ => Err(GenerationError::InvalidNote(s.to_string())),
        }
    }

    /// Position of this note on the circle of fifths
    pub fn circle_index(self) -> usize {
        let pc = self.pitch_class();
        CIRCLE_OF_FIFTHS
            .iter()
            .position(|&c| c == pc)
            .unwrap_or_default()
    }

    /// Note found `offset` steps away on the circle of fifths
    pub fn fifths_neighbor(self, offset: i32) -> Self {
        let idx = (self.circle_index() as i32 + offset).rem_euclid(12) as usize;
        Note::from_pitch_class(CIRCLE_OF_FIFTHS[idx])
    }

    /// MIDI pitch of this note in the middle-C octave (C = 60 ... B = 71)
    pub fn middle_octave_pitch(self) -> MidiNote {
        MIDDLE_C + self.pitch_class()
    }
}

impl FromStr for Note {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        Note::parse(s)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The seven diatonic modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Major,      // Ionian
    Minor,      // Aeolian
    Dorian,     // Minor with raised 6th
    Phrygian,   // Minor with lowered 2nd
    Lydian,     // Major with raised 4th
    Mixolydian, // Major with lowered 7th
    Locrian,    // Diminished
}

impl Mode {
    /// All modes in presentation order
    pub const ALL: [Mode; 7] = [
        Mode::Major,
        Mode::Minor,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Locrian,
    ];

    /// Semitone steps between consecutive degrees, including the step
    /// that closes the octave
    pub fn steps(self) -> [u8; SCALE_DEGREES] {
        match self {
            Mode::Major => [2, 2, 1, 2, 2, 2, 1],
            Mode::Minor => [2, 1, 2, 2, 1, 2, 2],
            Mode::Dorian => [2, 1, 2, 2, 2, 1, 2],
            Mode::Phrygian => [1, 2, 2, 2, 1, 2, 2],
            Mode::Lydian => [2, 2, 2, 1, 2, 2, 1],
            Mode::Mixolydian => [2, 2, 1, 2, 2, 1, 2],
            Mode::Locrian => [1, 2, 2, 1, 2, 2, 2],
        }
    }

    /// Display name, as used in song files and output filenames
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "Major (Ionian)",
            Mode::Minor => "Minor (Aeolian)",
            Mode::Dorian => "Dorian",
            Mode::Phrygian => "Phrygian",
            Mode::Lydian => "Lydian",
            Mode::Mixolydian => "Mixolydian",
            Mode::Locrian => "Locrian",
        }
    }

    /// Parse a mode from its display name or a short alias
    /// ("Major (Ionian)", "major", "aeolian", "dorian", ...)
    pub fn parse(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '(' | ')'))
            .collect();
        match key.as_str() {
            "majorionian" | "major" | "ionian" => Ok(Mode::Major),
            "minoraeolian" | "minor" | "aeolian" | "naturalminor" => Ok(Mode::Minor),
            "dorian" => Ok(Mode::Dorian),
            "phrygian" => Ok(Mode::Phrygian),
            "lydian" => Ok(Mode::Lydian),
            "mixolydian" => Ok(Mode::Mixolydian),
            "locrian" => Ok(Mode::Locrian),
            _ => Err(GenerationError::UnknownMode(s.to_string())),
        }
    }
}

impl FromStr for Mode {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self> {
        Mode::parse(s)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Seven ascending pitches built from a root pitch and a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    mode: Mode,
    pitches: [MidiNote; SCALE_DEGREES],
}

impl Scale {
    /// Build a scale starting at `root`. The closing step back to the
    /// octave is never applied.
    pub fn new(root: MidiNote, mode: Mode) -> Result<Self> {
        let mut pitches = [root; SCALE_DEGREES];
        let mut current = root as u32;
        for (degree, &step) in mode.steps()[..SCALE_DEGREES - 1].iter().enumerate() {
            current += step as u32;
            if current > MAX_MIDI_NOTE {
                return Err(GenerationError::PitchOutOfRange(current));
            }
            pitches[degree + 1] = current as MidiNote;
        }
        Ok(Self { mode, pitches })
    }

    /// Get the root pitch
    pub fn root(&self) -> MidiNote {
        self.pitches[0]
    }

    /// Get the mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the pitches of all seven degrees
    pub fn pitches(&self) -> &[MidiNote; SCALE_DEGREES] {
        &self.pitches
    }

    /// Get the pitch at a zero-based degree
    pub fn degree(&self, index: usize) -> Option<MidiNote> {
        self.pitches.get(index).copied()
    }

    /// Number of degrees (always seven)
    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    /// Scales are never empty; provided for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = Note::from_pitch_class(self.root() % 12);
        write!(f, "{} {}", root, self.mode)
    }
}

/// Build a scale from a numeric root pitch and a mode name
pub fn build_scale(root_pitch: MidiNote, mode_name: &str) -> Result<Scale> {
    Scale::new(root_pitch, Mode::parse(mode_name)?)
}
