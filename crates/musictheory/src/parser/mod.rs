//! Note-name normalization.
//!
//! A note name is a letter, an optional `#` or `b`, and an optional single
//! trailing octave digit. Only the last character is checked for the
//! octave, so "C10" is read as "C1" with octave 0 and fails lookup.

pub mod key;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{NoteError, Result};
use crate::notation::{self, PitchClass};

pub use key::parse_key_field;

/// Octave assumed when a note name carries none.
pub const DEFAULT_OCTAVE: u8 = 4;

/// A note name reduced to its pitch class and octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedNote {
    pub pitch_class: PitchClass,
    pub octave: u8,
}

/// Split a trailing ASCII digit off `name`.
///
/// Returns the remaining spelling and the digit, if there was one.
pub fn split_octave(name: &str) -> (&str, Option<u8>) {
    match name.as_bytes().last() {
        Some(&b) if b.is_ascii_digit() => (&name[..name.len() - 1], Some(b - b'0')),
        _ => (name, None),
    }
}

/// Resolve a raw note name to a pitch class and octave.
///
/// Steps, in order: strip one trailing octave digit (falling back to
/// `default_octave`), map B#/Cb/E#/Fb to their naturals, then look the
/// spelling up in the sharp table followed by the flat table.
pub fn resolve(name: &str, default_octave: u8) -> Result<ResolvedNote> {
    let (spelling, octave) = split_octave(name);
    let octave = octave.unwrap_or(default_octave);
    let spelling = notation::correct_odd_notation(spelling);

    match notation::lookup(spelling) {
        Some((pitch_class, _)) => {
            trace!(note = name, pitch_class = pitch_class.index(), octave, "resolved note");
            Ok(ResolvedNote {
                pitch_class,
                octave,
            })
        }
        None => {
            debug!(note = name, "note name not recognized");
            Err(NoteError::UnrecognizedNote(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_octave() {
        assert_eq!(split_octave("C#4"), ("C#", Some(4)));
        assert_eq!(split_octave("Bb"), ("Bb", None));
        assert_eq!(split_octave("A0"), ("A", Some(0)));
        assert_eq!(split_octave(""), ("", None));
        assert_eq!(split_octave("7"), ("", Some(7)));
    }

    #[test]
    fn test_split_octave_only_one_digit() {
        assert_eq!(split_octave("C10"), ("C1", Some(0)));
    }

    #[test]
    fn test_split_octave_non_ascii_tail() {
        // Arabic-Indic three is a digit, but not an ASCII one.
        assert_eq!(split_octave("C\u{0663}"), ("C\u{0663}", None));
    }

    #[test]
    fn test_resolve_default_octave() {
        let note = resolve("C", DEFAULT_OCTAVE).unwrap();
        assert_eq!(note.pitch_class, PitchClass::C);
        assert_eq!(note.octave, 4);
    }

    #[test]
    fn test_resolve_flat_and_sharp_agree() {
        assert_eq!(resolve("Db3", 4).unwrap(), resolve("C#3", 4).unwrap());
    }

    #[test]
    fn test_resolve_odd_notation() {
        let note = resolve("B#4", 4).unwrap();
        assert_eq!(note.pitch_class, PitchClass::C);
        assert_eq!(note.octave, 4);

        let note = resolve("Fb", 4).unwrap();
        assert_eq!(note.pitch_class.sharp_name(), "F");
    }

    #[test]
    fn test_resolve_unrecognized() {
        assert_eq!(
            resolve("H4", 4),
            Err(NoteError::UnrecognizedNote("H4".to_string()))
        );
        assert!(resolve("Z", 4).is_err());
        assert!(resolve("c4", 4).is_err());
        assert!(resolve("C10", 4).is_err());
        assert!(resolve("", 4).is_err());
    }
}
