// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Recording and export system.
//!
//! This module provides the timed message list and Standard MIDI file
//! export.

pub mod export;

pub use export::{tempo_micros, MessageKind, MidiExporter, TimedMessage};
