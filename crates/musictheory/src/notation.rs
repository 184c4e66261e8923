//! Static spelling tables and pitch classes.
//!
//! Pitch classes are anchored at A: index 0 is "A", index 3 is "C".
//! Both tables are indexed by the same pitch class, so a sharp spelling
//! and its flat twin always share an index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of equal-tempered semitones in an octave.
pub const SEMITONES: usize = 12;

/// Sharp spellings, starting at A.
pub const SHARP_NOTATIONS: [&str; SEMITONES] =
    ["A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#"];

/// Flat spellings for the same pitch classes.
pub const FLAT_NOTATIONS: [&str; SEMITONES] =
    ["A", "Bb", "B", "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab"];

/// Accidentals that land on a natural.
pub const ODD_NOTATIONS: [&str; 4] = ["B#", "Cb", "E#", "Fb"];

/// Natural spelling for each entry of [`ODD_NOTATIONS`], same order.
pub const CORRECTED_NOTATIONS: [&str; 4] = ["C", "C", "F", "F"];

/// Which spelling table a name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    Sharp,
    Flat,
}

impl Spelling {
    /// The 12-entry table for this spelling.
    pub fn table(self) -> &'static [&'static str; SEMITONES] {
        match self {
            Spelling::Sharp => &SHARP_NOTATIONS,
            Spelling::Flat => &FLAT_NOTATIONS,
        }
    }
}

/// One of the 12 semitone classes, A-anchored (0 = A, 11 = G#/Ab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const A: PitchClass = PitchClass(0);
    pub const C: PitchClass = PitchClass(3);

    /// Build from an index, wrapping into 0-11.
    pub fn new(index: i32) -> Self {
        PitchClass(index.rem_euclid(SEMITONES as i32) as u8)
    }

    /// Index into the spelling tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn sharp_name(self) -> &'static str {
        SHARP_NOTATIONS[self.index()]
    }

    pub fn flat_name(self) -> &'static str {
        FLAT_NOTATIONS[self.index()]
    }

    /// Semitone distance above C (C = 0, A = 9, B = 11).
    pub fn semitone_from_c(self) -> u8 {
        (self.0 + 9) % SEMITONES as u8
    }

    /// Inverse of [`PitchClass::semitone_from_c`].
    pub fn from_semitone_from_c(semitone: i32) -> Self {
        PitchClass::new(semitone + 3)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sharp_name())
    }
}

/// Replace B#, Cb, E# and Fb with the natural the tables use.
///
/// Anything else is returned untouched.
pub fn correct_odd_notation(name: &str) -> &str {
    ODD_NOTATIONS
        .iter()
        .position(|odd| *odd == name)
        .map(|i| CORRECTED_NOTATIONS[i])
        .unwrap_or(name)
}

/// Find `name` in the sharp table, then the flat table.
///
/// Exact, case-sensitive match; no odd-notation correction.
pub fn lookup(name: &str) -> Option<(PitchClass, Spelling)> {
    [Spelling::Sharp, Spelling::Flat]
        .into_iter()
        .find_map(|spelling| {
            spelling
                .table()
                .iter()
                .position(|n| *n == name)
                .map(|i| (PitchClass(i as u8), spelling))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrected_notations_exist_in_both_tables() {
        for corrected in CORRECTED_NOTATIONS {
            assert!(SHARP_NOTATIONS.contains(&corrected));
            assert!(FLAT_NOTATIONS.contains(&corrected));
        }
    }

    #[test]
    fn test_correct_odd_notation() {
        assert_eq!(correct_odd_notation("B#"), "C");
        assert_eq!(correct_odd_notation("Cb"), "C");
        assert_eq!(correct_odd_notation("E#"), "F");
        assert_eq!(correct_odd_notation("Fb"), "F");
        assert_eq!(correct_odd_notation("C#"), "C#");
        assert_eq!(correct_odd_notation("b#"), "b#");
    }

    #[test]
    fn test_lookup_prefers_sharp_table() {
        assert_eq!(lookup("A"), Some((PitchClass::A, Spelling::Sharp)));
        assert_eq!(lookup("C#"), Some((PitchClass(4), Spelling::Sharp)));
        assert_eq!(lookup("Db"), Some((PitchClass(4), Spelling::Flat)));
        assert_eq!(lookup("Ab"), Some((PitchClass(11), Spelling::Flat)));
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(lookup("c"), None);
        assert_eq!(lookup("B#"), None);
        assert_eq!(lookup("C4"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn test_pitch_class_semitones() {
        assert_eq!(PitchClass::C.semitone_from_c(), 0);
        assert_eq!(PitchClass::A.semitone_from_c(), 9);
        assert_eq!(PitchClass::new(2).semitone_from_c(), 11);
        assert_eq!(PitchClass::from_semitone_from_c(0), PitchClass::C);
        assert_eq!(PitchClass::from_semitone_from_c(9), PitchClass::A);
        assert_eq!(PitchClass::new(-1).index(), 11);
        assert_eq!(PitchClass::new(13).index(), 1);
    }

    #[test]
    fn test_pitch_class_names() {
        let cs = PitchClass::new(4);
        assert_eq!(cs.sharp_name(), "C#");
        assert_eq!(cs.flat_name(), "Db");
        assert_eq!(cs.to_string(), "C#");
    }
}
