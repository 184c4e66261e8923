//! Note names, MIDI numbers, frequencies, and key signatures.
//!
//! Note names are a letter, an optional `#` or `b`, and an optional single
//! octave digit ("C#4", "Bb", "Eb3"). Enharmonic spellings that land on a
//! natural (B#, Cb, E#, Fb) are folded into C and F before lookup.
//!
//! # Example
//!
//! ```
//! use musictheory::{notes_in_key_signature, to_frequency, to_midi};
//!
//! assert_eq!(to_midi("C5"), Some(72));
//! assert_eq!(to_frequency("A4"), Some(440.0));
//! assert_eq!(to_midi("H4"), None);
//!
//! let c_major = notes_in_key_signature("C", true, None).unwrap();
//! assert_eq!(c_major, ["C", "D", "E", "F", "G", "A", "B"]);
//! ```
//!
//! The free functions use [`NoteTheory::default`]. Build a [`NoteTheory`]
//! from a [`TheoryConfig`] to change the reference pitch, the default
//! octave, or to switch to scientific pitch octave numbering.

pub mod config;
pub mod error;
pub mod key;
pub mod notation;
pub mod parser;
pub mod theory;

pub use config::{ConfigError, ConfigSources, Convention, TheoryConfig};
pub use error::{NoteError, Result};
pub use key::{KeySignature, Mode};
pub use notation::{PitchClass, Spelling};
pub use parser::{parse_key_field, ResolvedNote};
pub use theory::NoteTheory;

/// MIDI note number for a note name, or `None` if it is not recognized.
///
/// Computed as `69 + index + (octave - 5) * 12` over the A-anchored
/// table, so "C5" is 72 and "A4" is 57.
pub fn to_midi(name: &str) -> Option<i32> {
    NoteTheory::default().to_midi(name)
}

/// Frequency in Hz for a note name, or `None` if it is not recognized.
///
/// Computed as `440 * 2^((index + (octave - 4) * 12) / 12)`.
pub fn to_frequency(name: &str) -> Option<f64> {
    NoteTheory::default().to_frequency(name)
}

/// The seven notes of the major or natural minor key on `root`.
///
/// `root` is a bare spelling such as "F#" or "Bb". Fails with
/// [`NoteError::UnrecognizedNote`] if the root is in neither table.
pub fn notes_in_key_signature(root: &str, major: bool, octave: Option<i32>) -> Result<Vec<String>> {
    key::notes_in_key(root, Mode::from_major(major), octave)
}
