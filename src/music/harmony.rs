// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Harmonic suggestions from the circle of fifths.
//!
//! Given a section's root and mode, proposes nearby roots for the next
//! section along with the family of mode that usually pairs with them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::scale::{Mode, Note};
use crate::error::Result;

/// Circle-of-fifths offsets, in the order suggestions are reported
pub const SUGGESTION_OFFSETS: [i32; 4] = [-1, 1, -2, 2];

/// Broad mode family attached to a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeFamily {
    MajorFamily,
    MinorFamily,
}

impl ModeFamily {
    /// Classify a mode name by substring. Major, Lydian and Mixolydian
    /// names are major-family; anything else is minor-family.
    pub fn classify(mode_name: &str) -> Self {
        if ["Major", "Lydian", "Mixolydian"]
            .iter()
            .any(|token| mode_name.contains(token))
        {
            ModeFamily::MajorFamily
        } else {
            ModeFamily::MinorFamily
        }
    }

    /// Mode used to represent this family
    pub fn representative(self) -> Mode {
        match self {
            ModeFamily::MajorFamily => Mode::Major,
            ModeFamily::MinorFamily => Mode::Minor,
        }
    }
}

/// A suggested root for a following section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HarmonicSuggestion {
    pub note: Note,
    pub family: ModeFamily,
}

impl fmt::Display for HarmonicSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.note, self.family.representative())
    }
}

/// Suggestions for a typed note and mode
pub fn suggestions_for(note: Note, mode: Mode) -> [HarmonicSuggestion; 4] {
    neighbors(note, ModeFamily::classify(mode.name()))
}

/// Suggest four neighbors of `note_name` on the circle of fifths.
///
/// Only the note is validated. A recognized mode alias is classified by
/// its display name; any other mode name is classified as-is.
pub fn suggest(note_name: &str, mode_name: &str) -> Result<[HarmonicSuggestion; 4]> {
    let note = Note::parse(note_name)?;
    let mode_name = Mode::parse(mode_name).map(Mode::name).unwrap_or(mode_name);
    Ok(neighbors(note, ModeFamily::classify(mode_name)))
}

fn neighbors(note: Note, family: ModeFamily) -> [HarmonicSuggestion; 4] {
    SUGGESTION_OFFSETS.map(|offset| HarmonicSuggestion {
        note: note.fifths_neighbor(offset),
        family,
    })
}

/// Join suggestions for display ("F (Major (Ionian)), G (Major (Ionian)), ...")
pub fn format_suggestions(suggestions: &[HarmonicSuggestion]) -> String {
    suggestions
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
