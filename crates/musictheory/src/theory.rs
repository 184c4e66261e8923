//! Conversions under a given [`TheoryConfig`].

use tracing::debug;

use crate::config::{Convention, TheoryConfig};
use crate::error::Result;
use crate::key::{self, KeySignature, Mode};
use crate::notation::{PitchClass, SEMITONES};
use crate::parser::{self, ResolvedNote};

/// MIDI number of A4.
pub const A4_MIDI: i32 = 69;

const OCTAVE: i32 = SEMITONES as i32;

/// Note conversions bound to a reference pitch, default octave and
/// octave convention. The default reproduces the legacy formulas with
/// A4 = 440 Hz.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoteTheory {
    config: TheoryConfig,
}

impl NoteTheory {
    pub fn new(config: TheoryConfig) -> Self {
        NoteTheory { config }
    }

    pub fn config(&self) -> &TheoryConfig {
        &self.config
    }

    /// Resolve a note name, using the configured default octave.
    pub fn resolve(&self, name: &str) -> Result<ResolvedNote> {
        parser::resolve(name, self.config.default_octave)
    }

    /// MIDI note number for `name`, unclamped. `None` if not recognized.
    pub fn to_midi(&self, name: &str) -> Option<i32> {
        self.resolve(name).ok().map(|note| self.midi_for(note))
    }

    /// Frequency in Hz for `name`, unrounded. `None` if not recognized.
    pub fn to_frequency(&self, name: &str) -> Option<f64> {
        self.resolve(name).ok().map(|note| self.frequency_for(note))
    }

    pub fn midi_for(&self, note: ResolvedNote) -> i32 {
        let index = note.pitch_class.index() as i32;
        let octave = note.octave as i32;
        match self.config.convention {
            Convention::Legacy => A4_MIDI + index + (octave - 5) * OCTAVE,
            Convention::Scientific => {
                OCTAVE * (octave + 1) + note.pitch_class.semitone_from_c() as i32
            }
        }
    }

    pub fn frequency_for(&self, note: ResolvedNote) -> f64 {
        let semitones = match self.config.convention {
            Convention::Legacy => {
                note.pitch_class.index() as i32 + (note.octave as i32 - 4) * OCTAVE
            }
            Convention::Scientific => self.midi_for(note) - A4_MIDI,
        };
        self.config.reference_hz * 2f64.powf(semitones as f64 / OCTAVE as f64)
    }

    /// Sharp-spelled name whose [`NoteTheory::to_midi`] is `midi`.
    ///
    /// `None` when the octave falls outside 0-9, since note names carry a
    /// single octave digit.
    pub fn name_for_midi(&self, midi: i32) -> Option<String> {
        let (pitch_class, octave) = match self.config.convention {
            Convention::Legacy => {
                let offset = midi - A4_MIDI;
                (
                    PitchClass::new(offset),
                    5 + offset.div_euclid(OCTAVE),
                )
            }
            Convention::Scientific => (
                PitchClass::from_semitone_from_c(midi.rem_euclid(OCTAVE)),
                midi.div_euclid(OCTAVE) - 1,
            ),
        };

        if !(0..=9).contains(&octave) {
            debug!(midi, octave, "MIDI number outside single-digit octaves");
            return None;
        }
        Some(format!("{}{}", pitch_class.sharp_name(), octave))
    }

    /// Seven notes of the key on `root`. The convention does not affect
    /// spelling or octave suffixes.
    pub fn notes_in_key_signature(
        &self,
        root: &str,
        major: bool,
        octave: Option<i32>,
    ) -> Result<Vec<String>> {
        key::notes_in_key(root, Mode::from_major(major), octave)
    }

    /// Parse a key field such as "F#m" and spell its notes.
    pub fn key_signature(&self, field: &str, octave: Option<i32>) -> Result<Vec<String>> {
        let key: KeySignature = parser::parse_key_field(field)?;
        key.notes(octave)
    }
}
