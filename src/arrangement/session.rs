// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! One generation run, from song file to MIDI file.
//!
//! Resolves section roots (picking random ones when asked), assembles the
//! song, and hands the finished message list to the exporter. Front ends
//! call [`generate`] and show [`status_line`] to the user.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::chooser::RootChooser;
use super::song::{check_count, validate_bpm, Song};
use crate::config::SongFile;
use crate::error::{GenerationError, Result};
use crate::generators::melody::validate_length;
use crate::music::harmony::{format_suggestions, suggest};
use crate::recording::{MidiExporter, TimedMessage};

/// Status shown when a run fails outside of input validation
pub const GENERIC_FAILURE: &str = "Error generating MIDI file";

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSong {
    /// Where the file was written
    pub path: PathBuf,
    /// File name without directory
    pub filename: String,
    /// Root note actually used by each section
    pub notes: Vec<String>,
    /// Messages in the track, excluding End of Track
    pub message_count: usize,
}

/// Check tempo, section counts and lengths before any generation work
pub fn validate(file: &SongFile) -> Result<()> {
    validate_bpm(file.song.bpm)?;
    check_count("sections", file.labels().len(), file.sections.len())?;
    for section in &file.sections {
        validate_length(section.length)?;
    }
    Ok(())
}

/// Root note name for every section.
///
/// Without random notes this is the configured list. With random notes the
/// first section keeps its configured root and each later one picks among
/// the suggestions for the previous section's resolved root and mode.
pub fn resolve_notes(file: &SongFile, chooser: &mut dyn RootChooser) -> Result<Vec<String>> {
    if !file.song.random_notes {
        return Ok(file.notes());
    }

    let mut notes: Vec<String> = Vec::with_capacity(file.sections.len());
    for (i, section) in file.sections.iter().enumerate() {
        if i == 0 {
            notes.push(section.note.clone());
            continue;
        }
        let candidates = suggest(&notes[i - 1], &file.sections[i - 1].mode)?.map(|s| s.note);
        let chosen = chooser.choose(&candidates);
        debug!(section = i, root = %chosen, "picked random root");
        notes.push(chosen.name().to_string());
    }
    Ok(notes)
}

/// Build the song a file describes, resolving random roots first
pub fn build_song(file: &SongFile, chooser: &mut dyn RootChooser) -> Result<(Song, Vec<String>)> {
    validate(file)?;
    let notes = resolve_notes(file, chooser)?;
    let song = Song::from_parts(
        file.song.bpm,
        &notes,
        &file.modes(),
        &file.lengths(),
        &file.song.structure,
    )?;
    Ok((song, notes))
}

/// Generate the song and write it into `output_dir`
pub fn generate(
    file: &SongFile,
    chooser: &mut dyn RootChooser,
    output_dir: &Path,
) -> Result<GeneratedSong> {
    let (song, notes) = build_song(file, chooser)?;
    let events: Vec<TimedMessage> = song.events()?;
    let filename = song.filename();
    let path = output_dir.join(&filename);

    MidiExporter::new().export(&path, &events)?;
    info!(file = %filename, sections = song.sections().len(), "generated song");

    Ok(GeneratedSong {
        path,
        filename,
        notes,
        message_count: events.len(),
    })
}

/// User-facing status for a finished run
pub fn status_line(result: &Result<GeneratedSong>) -> String {
    match result {
        Ok(song) => format!("MIDI file generated: {}", song.filename),
        Err(err) if err.is_validation() => err.to_string(),
        Err(err) => {
            warn!(error = %err, "generation failed");
            GENERIC_FAILURE.to_string()
        }
    }
}

/// Advisory text for section `index`, based on the section before it
pub fn suggestion_text(file: &SongFile, index: usize) -> Result<String> {
    if index == 0 {
        return Ok("First section: No previous section to base suggestions on.".to_string());
    }

    let labels = file.labels();
    let (Some(label), Some(prev)) = (labels.get(index), file.sections.get(index - 1)) else {
        return Err(GenerationError::SectionCountMismatch {
            field: "sections",
            expected: index + 1,
            found: file.sections.len().min(labels.len()),
        });
    };

    let suggestions = suggest(&prev.note, &prev.mode)?;
    Ok(format!(
        "Suggestions for {} (based on {} {}):\n{}",
        label,
        prev.note,
        prev.mode,
        format_suggestions(&suggestions)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SectionConfig;
    use crate::music::Note;

    /// Always picks the candidate at a fixed index
    struct IndexChooser(usize);

    impl RootChooser for IndexChooser {
        fn choose(&mut self, candidates: &[Note]) -> Note {
            candidates[self.0 % candidates.len()]
        }
    }

    fn two_sections() -> SongFile {
        let mut file = SongFile::for_structure("Intro-Verse");
        file.sections = vec![
            SectionConfig::new("C", "Major (Ionian)", 4),
            SectionConfig::new("G", "Minor (Aeolian)", 4),
        ];
        file
    }

    #[test]
    fn test_resolve_notes_fixed() {
        let notes = resolve_notes(&two_sections(), &mut IndexChooser(0)).unwrap();
        assert_eq!(notes, vec!["C", "G"]);
    }

    #[test]
    fn test_resolve_notes_random_chains() {
        let mut file = SongFile::for_structure("A-B-C");
        file.song.random_notes = true;
        file.sections = vec![
            SectionConfig::new("C", "Major (Ionian)", 4),
            SectionConfig::new("X", "Dorian", 4),
            SectionConfig::new("X", "Dorian", 4),
        ];

        // Offset +1 each time: C -> G -> D
        let notes = resolve_notes(&file, &mut IndexChooser(1)).unwrap();
        assert_eq!(notes, vec!["C", "G", "D"]);

        // Offset -1 each time: C -> F -> A#
        let notes = resolve_notes(&file, &mut IndexChooser(0)).unwrap();
        assert_eq!(notes, vec!["C", "F", "A#"]);
    }

    #[test]
    fn test_random_first_note_validated() {
        let mut file = two_sections();
        file.song.random_notes = true;
        file.sections[0].note = "H".to_string();
        assert!(matches!(
            resolve_notes(&file, &mut IndexChooser(0)),
            Err(GenerationError::InvalidNote(_))
        ));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let song = generate(&two_sections(), &mut IndexChooser(0), dir.path()).unwrap();

        assert_eq!(song.filename, "song_C_Major_(Ionian)_120bpm.mid");
        assert_eq!(song.message_count, 17);
        assert!(song.path.exists());
        assert_eq!(
            status_line(&Ok(song)),
            "MIDI file generated: song_C_Major_(Ionian)_120bpm.mid"
        );
    }

    #[test]
    fn test_validation_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = two_sections();
        file.song.bpm = 301;

        let result = generate(&file, &mut IndexChooser(0), dir.path());
        assert!(matches!(result, Err(GenerationError::InvalidBpm(301))));
        assert_eq!(status_line(&result), "BPM must be between 20 and 300.");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_section_count_mismatch() {
        let mut file = two_sections();
        file.sections.pop();
        assert!(matches!(
            validate(&file),
            Err(GenerationError::SectionCountMismatch { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_export_failure_status() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let result = generate(&two_sections(), &mut IndexChooser(0), &missing);
        assert!(matches!(result, Err(GenerationError::Export(_))));
        assert_eq!(status_line(&result), GENERIC_FAILURE);
    }

    #[test]
    fn test_suggestion_text() {
        let file = two_sections();
        assert_eq!(
            suggestion_text(&file, 0).unwrap(),
            "First section: No previous section to base suggestions on."
        );
        assert_eq!(
            suggestion_text(&file, 1).unwrap(),
            "Suggestions for Verse (based on C Major (Ionian)):\n\
             F (Major (Ionian)), G (Major (Ionian)), A# (Major (Ionian)), D (Major (Ionian))"
        );
        assert!(suggestion_text(&file, 5).is_err());
    }

    #[test]
    fn test_suggestion_text_mode_alias() {
        let mut lower = two_sections();
        lower.sections[0].mode = "lydian".to_string();
        let mut display = two_sections();
        display.sections[0].mode = "Lydian".to_string();

        let hint = suggestion_text(&lower, 1).unwrap();
        assert!(hint.ends_with(
            "F (Major (Ionian)), G (Major (Ionian)), A# (Major (Ionian)), D (Major (Ionian))"
        ));
        assert_eq!(
            hint.lines().nth(1),
            suggestion_text(&display, 1).unwrap().lines().nth(1)
        );
    }
}
