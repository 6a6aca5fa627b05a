// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Standard MIDI file export.
//!
//! Holds the timed message list produced by the arrangement and encodes
//! it as a single-track (Type 0) MIDI file through `midly`.

use std::fs;
use std::io;
use std::path::Path;

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};
use tracing::{debug, info};

use crate::generators::{NoteEvent, TICKS_PER_QUARTER};
use crate::music::MidiNote;

/// Microseconds per quarter note for a tempo in BPM
pub fn tempo_micros(bpm: u32) -> u32 {
    (60_000_000.0 / bpm.max(1) as f64).round() as u32
}

/// Payload of a timed message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Set-tempo meta event
    Tempo { micros_per_quarter: u32 },
    /// Note start
    NoteOn { key: MidiNote, velocity: u8 },
    /// Note stop (release velocity 0)
    NoteOff { key: MidiNote },
}

/// A message with its delta time from the previous message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimedMessage {
    /// Ticks since the previous message in the track
    pub delta: u32,
    pub kind: MessageKind,
}

impl TimedMessage {
    /// Tempo meta message at delta 0
    pub fn tempo(bpm: u32) -> Self {
        Self {
            delta: 0,
            kind: MessageKind::Tempo {
                micros_per_quarter: tempo_micros(bpm),
            },
        }
    }

    /// Note on at delta 0
    pub fn note_on(key: MidiNote, velocity: u8) -> Self {
        Self {
            delta: 0,
            kind: MessageKind::NoteOn { key, velocity },
        }
    }

    /// Note off after `delta` ticks
    pub fn note_off(key: MidiNote, delta: u32) -> Self {
        Self {
            delta,
            kind: MessageKind::NoteOff { key },
        }
    }

    /// The on/off pair for a note; the note ends before the next one starts
    pub fn pair(event: &NoteEvent) -> [Self; 2] {
        [
            Self::note_on(event.pitch, event.velocity),
            Self::note_off(event.pitch, event.duration_ticks),
        ]
    }

    fn to_track_event(self, channel: u4) -> TrackEvent<'static> {
        let kind = match self.kind {
            MessageKind::Tempo { micros_per_quarter } => {
                TrackEventKind::Meta(MetaMessage::Tempo(u24::new(micros_per_quarter.min(0xFF_FFFF))))
            }
            MessageKind::NoteOn { key, velocity } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key: u7::new(key.min(127)),
                    vel: u7::new(velocity.min(127)),
                },
            },
            MessageKind::NoteOff { key } => TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key: u7::new(key.min(127)),
                    vel: u7::new(0),
                },
            },
        };
        TrackEvent {
            delta: u28::new(self.delta.min(0x0FFF_FFFF)),
            kind,
        }
    }
}

/// MIDI file exporter
#[derive(Debug, Clone)]
pub struct MidiExporter {
    /// PPQN (ticks per quarter note)
    ppqn: u16,
    /// MIDI channel (0-15)
    channel: u8,
}

impl MidiExporter {
    /// Create a new exporter
    pub fn new() -> Self {
        Self {
            ppqn: TICKS_PER_QUARTER,
            channel: 0,
        }
    }

    /// Get PPQN
    pub fn ppqn(&self) -> u16 {
        self.ppqn
    }

    /// Get channel
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Build the in-memory file: one track, terminated by End of Track
    pub fn to_smf(&self, messages: &[TimedMessage]) -> Smf<'static> {
        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(self.ppqn)),
        ));

        let channel = u4::new(self.channel);
        let mut track: Track<'static> = Vec::with_capacity(messages.len() + 1);
        track.extend(messages.iter().map(|m| m.to_track_event(channel)));
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf.tracks.push(track);
        smf
    }

    /// Export to bytes
    pub fn export_to_bytes(&self, messages: &[TimedMessage]) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.to_smf(messages).write_std(&mut buffer)?;
        debug!(messages = messages.len(), bytes = buffer.len(), "encoded MIDI file");
        Ok(buffer)
    }

    /// Export to file. The file is encoded completely before anything is
    /// written, so encoding failures never leave a partial file.
    pub fn export<P: AsRef<Path>>(&self, path: P, messages: &[TimedMessage]) -> io::Result<()> {
        let bytes = self.export_to_bytes(messages)?;
        fs::write(path.as_ref(), &bytes)?;
        info!(path = %path.as_ref().display(), bytes = bytes.len(), "wrote MIDI file");
        Ok(())
    }
}

impl Default for MidiExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_messages() -> Vec<TimedMessage> {
        let mut messages = vec![TimedMessage::tempo(120)];
        messages.extend(TimedMessage::pair(&NoteEvent::quarter(60)));
        messages.extend(TimedMessage::pair(&NoteEvent::quarter(62)));
        messages
    }

    #[test]
    fn test_exporter_creation() {
        let exporter = MidiExporter::new();
        assert_eq!(exporter.ppqn(), 480);
        assert_eq!(exporter.channel(), 0);
    }

    #[test]
    fn test_tempo_micros() {
        assert_eq!(tempo_micros(120), 500_000);
        assert_eq!(tempo_micros(60), 1_000_000);
        // 60_000_000 / 7 = 8_571_428.57
        assert_eq!(tempo_micros(7), 8_571_429);
    }

    #[test]
    fn test_note_pair() {
        let [on, off] = TimedMessage::pair(&NoteEvent::quarter(64));
        assert_eq!(on.delta, 0);
        assert_eq!(on.kind, MessageKind::NoteOn { key: 64, velocity: 100 });
        assert_eq!(off.delta, 480);
        assert_eq!(off.kind, MessageKind::NoteOff { key: 64 });
    }

    #[test]
    fn test_export_header() {
        let bytes = MidiExporter::new().export_to_bytes(&sample_messages()).unwrap();

        assert_eq!(&bytes[0..4], b"MThd");
        assert_eq!(bytes[9], 0); // Format 0
        assert_eq!(&bytes[10..12], &1u16.to_be_bytes()); // 1 track
        assert_eq!(&bytes[12..14], &480u16.to_be_bytes()); // PPQN
        assert_eq!(&bytes[14..18], b"MTrk");
    }

    #[test]
    fn test_export_parses_back() {
        let bytes = MidiExporter::new().export_to_bytes(&sample_messages()).unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        assert_eq!(smf.tracks.len(), 1);
        let track = &smf.tracks[0];
        // tempo + 2 pairs + end of track
        assert_eq!(track.len(), 6);
        assert_eq!(
            track[0].kind,
            TrackEventKind::Meta(MetaMessage::Tempo(u24::new(500_000)))
        );
        assert_eq!(track[2].delta.as_int(), 480);
        assert_eq!(
            track[5].kind,
            TrackEventKind::Meta(MetaMessage::EndOfTrack)
        );
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mid");

        MidiExporter::new().export(&path, &sample_messages()).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"MThd");
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.mid");

        assert!(MidiExporter::new().export(&path, &sample_messages()).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_header_resolution_matches_note_length() {
        let smf = MidiExporter::new().to_smf(&sample_messages());
        assert_eq!(
            smf.header.timing,
            Timing::Metrical(u15::new(NoteEvent::quarter(60).duration_ticks as u16))
        );

        for event in &smf.tracks[0] {
            match event.kind {
                TrackEventKind::Midi { channel, message } => {
                    assert_eq!(channel.as_int(), 0);
                    if let MidiMessage::NoteOff { .. } = message {
                        assert_eq!(event.delta.as_int(), TICKS_PER_QUARTER as u32);
                    }
                }
                _ => assert_eq!(event.delta.as_int(), 0),
            }
        }
    }
}
