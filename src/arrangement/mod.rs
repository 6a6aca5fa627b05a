// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song arrangement.
//!
//! This module provides:
//! - Song: Sections laid end to end from a structure template
//! - Chooser: Root selection for randomized sections
//! - Session: One generation run from song file to MIDI file

pub mod chooser;
pub mod session;
pub mod song;

pub use chooser::{RandomRootChooser, RootChooser};
pub use session::{generate, status_line, suggestion_text, GeneratedSong};
pub use song::{assemble, Assembly, Section, Song, STRUCTURE_PRESETS};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{Mode, Note};

    #[test]
    fn test_section_creation() {
        let section = Section::new("Verse", Note::D, Mode::Dorian, 4).unwrap();
        assert_eq!(section.label(), "Verse");
        assert_eq!(section.to_string(), "Verse: D Dorian (4 beats)");
    }

    #[test]
    fn test_song_creation() {
        let section = Section::new("Intro", Note::C, Mode::Major, 8).unwrap();
        let song = Song::new(120, vec![section]).unwrap();
        assert_eq!(song.structure(), vec!["Intro"]);
        assert_eq!(song.total_beats(), 8);
    }
}
