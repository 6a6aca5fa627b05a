// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song assembly.
//!
//! A song is an ordered list of sections taken from a structure template
//! such as "Intro-Verse-Chorus". Each section plays an ascending melody in
//! its own root and mode; the sections are laid end to end on a single
//! track after one tempo message.

use std::fmt;

use tracing::debug;

use crate::error::{GenerationError, Result};
use crate::generators::melody::{synthesize, validate_length};
use crate::generators::NoteEvent;
use crate::music::{Mode, Note, Scale};
use crate::recording::TimedMessage;

/// Slowest accepted tempo
pub const MIN_BPM: u32 = 20;

/// Fastest accepted tempo
pub const MAX_BPM: u32 = 300;

/// Tempo used when none is given
pub const DEFAULT_BPM: u32 = 120;

/// Section length used when none is given
pub const DEFAULT_SECTION_BEATS: u32 = 8;

/// Structure templates offered to the user
pub const STRUCTURE_PRESETS: [&str; 3] = [
    "Intro-Verse-Chorus-Verse-Chorus-Bridge-Chorus-Outro",
    "Verse-Chorus-Verse-Chorus-Bridge-Chorus",
    "Intro-Verse-Chorus-Outro",
];

/// Split a structure template into its section labels
pub fn split_structure(template: &str) -> Vec<String> {
    template.split('-').map(str::to_string).collect()
}

/// Check a tempo against the accepted range
pub fn validate_bpm(bpm: u32) -> Result<()> {
    if (MIN_BPM..=MAX_BPM).contains(&bpm) {
        Ok(())
    } else {
        Err(GenerationError::InvalidBpm(bpm))
    }
}

/// Check that a per-section list has one entry per label
pub fn check_count(field: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(GenerationError::SectionCountMismatch {
            field,
            expected,
            found,
        })
    }
}

/// Output filename for a song, e.g. `song_Csharp_Dorian_120bpm.mid`
pub fn output_filename(note_name: &str, mode_name: &str, bpm: u32) -> String {
    format!("song_{}_{}_{}bpm.mid", note_name, mode_name, bpm)
        .replace(' ', "_")
        .replace('#', "sharp")
}

/// One section of the song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    label: String,
    root: Note,
    mode: Mode,
    length_beats: u32,
}

impl Section {
    /// Create a section, checking its length
    pub fn new(label: impl Into<String>, root: Note, mode: Mode, length_beats: u32) -> Result<Self> {
        validate_length(length_beats)?;
        Ok(Self {
            label: label.into(),
            root,
            mode,
            length_beats,
        })
    }

    /// Get the label from the structure template
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the root note
    pub fn root(&self) -> Note {
        self.root
    }

    /// Get the mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the length in beats
    pub fn length_beats(&self) -> u32 {
        self.length_beats
    }

    /// Scale rooted in the middle-C octave
    pub fn scale(&self) -> Result<Scale> {
        Scale::new(self.root.middle_octave_pitch(), self.mode)
    }

    /// The section's melody
    pub fn melody(&self) -> Result<Vec<NoteEvent>> {
        synthesize(&self.scale()?, self.length_beats)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} ({} beats)",
            self.label, self.root, self.mode, self.length_beats
        )
    }
}

/// A validated song ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    bpm: u32,
    sections: Vec<Section>,
}

impl Song {
    /// Build a song from a tempo and its sections
    pub fn new(bpm: u32, sections: Vec<Section>) -> Result<Self> {
        validate_bpm(bpm)?;
        if sections.is_empty() {
            return Err(GenerationError::SectionCountMismatch {
                field: "sections",
                expected: 1,
                found: 0,
            });
        }
        Ok(Self { bpm, sections })
    }

    /// Build a song from parallel per-section lists.
    ///
    /// Tempo, counts and lengths are all checked before any note or mode
    /// is parsed.
    pub fn from_parts<N, M>(
        bpm: u32,
        notes: &[N],
        modes: &[M],
        lengths: &[u32],
        structure: &str,
    ) -> Result<Self>
    where
        N: AsRef<str>,
        M: AsRef<str>,
    {
        let labels = split_structure(structure);
        validate_bpm(bpm)?;
        check_count("notes", labels.len(), notes.len())?;
        check_count("modes", labels.len(), modes.len())?;
        check_count("lengths", labels.len(), lengths.len())?;
        for &length in lengths {
            validate_length(length)?;
        }

        let sections = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let root = Note::parse(notes[i].as_ref())?;
                let mode = Mode::parse(modes[i].as_ref())?;
                Section::new(label, root, mode, lengths[i])
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(bpm, sections)
    }

    /// Get the tempo
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Get the sections in play order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section labels in play order
    pub fn structure(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.label()).collect()
    }

    /// Total length in beats
    pub fn total_beats(&self) -> u32 {
        self.sections.iter().map(|s| s.length_beats).sum()
    }

    /// Render the track: one tempo message, then an on/off pair per note
    pub fn events(&self) -> Result<Vec<TimedMessage>> {
        let mut events = Vec::with_capacity(1 + 2 * self.total_beats() as usize);
        events.push(TimedMessage::tempo(self.bpm));

        for section in &self.sections {
            let melody = section.melody()?;
            debug!(section = %section, notes = melody.len(), "rendering section");
            for note in &melody {
                events.extend(TimedMessage::pair(note));
            }
        }

        Ok(events)
    }

    /// Output filename derived from the first section and the tempo
    pub fn filename(&self) -> String {
        let first = &self.sections[0];
        output_filename(first.root.name(), first.mode.name(), self.bpm)
    }
}

/// Rendered song: the ordered message list and its output filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub events: Vec<TimedMessage>,
    pub filename: String,
}

/// Assemble a song from parallel per-section lists
pub fn assemble<N, M>(
    bpm: u32,
    section_notes: &[N],
    section_modes: &[M],
    section_lengths: &[u32],
    structure: &str,
) -> Result<Assembly>
where
    N: AsRef<str>,
    M: AsRef<str>,
{
    let song = Song::from_parts(bpm, section_notes, section_modes, section_lengths, structure)?;
    Ok(Assembly {
        events: song.events()?,
        filename: song.filename(),
    })
}
