// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song file configuration.
//!
//! A song file carries every generation setting: tempo, structure, the
//! random-notes switch and one entry per section. YAML is the default
//! format; files ending in `.toml` are read and written as TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::arrangement::song::{split_structure, DEFAULT_BPM, DEFAULT_SECTION_BEATS, STRUCTURE_PRESETS};
use crate::music::Mode;

/// Root configuration for a song
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SongFile {
    /// Song-level settings
    #[serde(default)]
    pub song: SongConfig,
    /// One entry per section label, in order
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

impl SongFile {
    /// Default settings with one default section per label of `structure`
    pub fn for_structure(structure: &str) -> Self {
        let sections = split_structure(structure)
            .iter()
            .map(|_| SectionConfig::default())
            .collect();
        Self {
            song: SongConfig {
                structure: structure.to_string(),
                ..SongConfig::default()
            },
            sections,
        }
    }

    /// Load a song file; the extension picks the format
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read song file: {:?}", path))?;
        if is_toml(path) {
            Self::from_toml(&contents)
        } else {
            Self::from_yaml(&contents)
        }
    }

    /// Parse a song file from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML song file")
    }

    /// Parse a song file from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML song file")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize song file to YAML")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize song file to TOML")
    }

    /// Save the song file; the extension picks the format
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = if is_toml(path) {
            self.to_toml()?
        } else {
            self.to_yaml()?
        };
        fs::write(path, text).with_context(|| format!("Failed to write song file: {:?}", path))
    }

    /// Section labels from the structure template
    pub fn labels(&self) -> Vec<String> {
        split_structure(&self.song.structure)
    }

    /// Note names, one per section
    pub fn notes(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.note.clone()).collect()
    }

    /// Mode names, one per section
    pub fn modes(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.mode.clone()).collect()
    }

    /// Lengths in beats, one per section
    pub fn lengths(&self) -> Vec<u32> {
        self.sections.iter().map(|s| s.length).collect()
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// Song-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SongConfig {
    /// Tempo in BPM
    #[serde(default = "default_bpm")]
    pub bpm: u32,
    /// Structure template, section labels joined by '-'
    #[serde(default = "default_structure")]
    pub structure: String,
    /// Pick section roots from harmonic suggestions (all but the first)
    #[serde(default)]
    pub random_notes: bool,
    /// Seed for random roots (OS entropy when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_bpm() -> u32 {
    DEFAULT_BPM
}
fn default_structure() -> String {
    STRUCTURE_PRESETS[0].to_string()
}

impl Default for SongConfig {
    fn default() -> Self {
        Self {
            bpm: default_bpm(),
            structure: default_structure(),
            random_notes: false,
            seed: None,
        }
    }
}

/// Section configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionConfig {
    /// Root note name (ignored for random sections after the first)
    #[serde(default = "default_note")]
    pub note: String,
    /// Mode name
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Length in beats (1-32)
    #[serde(default = "default_length")]
    pub length: u32,
}

fn default_note() -> String {
    "C".to_string()
}
fn default_mode() -> String {
    Mode::Major.name().to_string()
}
fn default_length() -> u32 {
    DEFAULT_SECTION_BEATS
}

impl SectionConfig {
    /// Create a section entry
    pub fn new(note: impl Into<String>, mode: impl Into<String>, length: u32) -> Self {
        Self {
            note: note.into(),
            mode: mode.into(),
            length,
        }
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            note: default_note(),
            mode: default_mode(),
            length: default_length(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_song_file() {
        let yaml = r#"
song:
  bpm: 120
  structure: "Intro-Verse"

sections:
  - note: "C"
    mode: "Major (Ionian)"
    length: 4
  - note: "G"
    mode: "Minor (Aeolian)"
    length: 4
"#;

        let file = SongFile::from_yaml(yaml).unwrap();
        assert_eq!(file.song.bpm, 120);
        assert_eq!(file.labels(), vec!["Intro", "Verse"]);
        assert!(!file.song.random_notes);
        assert_eq!(file.notes(), vec!["C", "G"]);
        assert_eq!(file.modes(), vec!["Major (Ionian)", "Minor (Aeolian)"]);
        assert_eq!(file.lengths(), vec![4, 4]);
    }

    #[test]
    fn test_default_values() {
        let yaml = r#"
sections:
  - note: "D"
  - {}
"#;

        let file = SongFile::from_yaml(yaml).unwrap();
        assert_eq!(file.song.bpm, 120);
        assert_eq!(file.song.structure, STRUCTURE_PRESETS[0]);
        assert_eq!(file.song.seed, None);
        assert_eq!(file.sections[0].note, "D");
        assert_eq!(file.sections[0].mode, "Major (Ionian)");
        assert_eq!(file.sections[1], SectionConfig::default());
        assert_eq!(file.sections[1].length, 8);
    }

    #[test]
    fn test_random_settings() {
        let yaml = r#"
song:
  structure: "Verse-Chorus"
  random_notes: true
  seed: 99
sections:
  - { note: "A", mode: "Dorian", length: 6 }
  - { mode: "Lydian", length: 6 }
"#;

        let file = SongFile::from_yaml(yaml).unwrap();
        assert!(file.song.random_notes);
        assert_eq!(file.song.seed, Some(99));
        assert_eq!(file.sections[1].note, "C");
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
[song]
bpm = 96
structure = "Intro-Outro"

[[sections]]
note = "F#"
mode = "Mixolydian"
length = 12

[[sections]]
note = "B"
mode = "Locrian"
length = 3
"#;

        let file = SongFile::from_toml(text).unwrap();
        assert_eq!(file.song.bpm, 96);
        assert_eq!(file.notes(), vec!["F#", "B"]);
        assert_eq!(file.lengths(), vec![12, 3]);
    }

    #[test]
    fn test_for_structure() {
        let file = SongFile::for_structure(STRUCTURE_PRESETS[2]);
        assert_eq!(file.sections.len(), 4);
        assert_eq!(file.labels().len(), 4);
        assert!(file.sections.iter().all(|s| *s == SectionConfig::default()));
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut written = SongFile::for_structure("Verse-Chorus");
        written.song.bpm = 140;
        written.song.seed = Some(3);
        written.sections[1] = SectionConfig::new("A#", "Phrygian", 16);

        for name in ["song.yaml", "song.toml"] {
            let path = dir.path().join(name);
            written.save(&path).unwrap();
            let loaded = SongFile::load(&path).unwrap();
            assert_eq!(loaded, written, "{}", name);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SongFile::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read song file"));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(SongFile::from_yaml("song: [").is_err());
    }
}
