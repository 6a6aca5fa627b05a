// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory module.
//!
//! This module provides note and mode tables, scale construction, and
//! circle-of-fifths harmonic suggestions.

pub mod harmony;
pub mod scale;

pub use harmony::{suggest, suggestions_for, HarmonicSuggestion, ModeFamily};
pub use scale::{build_scale, MidiNote, Mode, Note, Scale, CIRCLE_OF_FIFTHS, MIDDLE_C};
