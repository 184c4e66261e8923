//! Key signature spelling.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{NoteError, Result};
use crate::notation::{self, SEMITONES};

/// Scale degrees of a major key, in semitones above the root (W-W-H-W-W-W-H).
pub const MAJOR_OFFSETS: [usize; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Scale degrees of a natural minor key (W-H-W-W-H-W-W).
pub const MINOR_OFFSETS: [usize; 7] = [0, 2, 3, 5, 7, 8, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Major,
    Minor,
}

impl Mode {
    pub fn from_major(major: bool) -> Self {
        if major {
            Mode::Major
        } else {
            Mode::Minor
        }
    }

    /// Parse mode from string (case-insensitive, allows abbreviations)
    pub fn parse(s: &str) -> Option<Mode> {
        match s.to_lowercase().as_str() {
            "" | "maj" | "major" | "ion" | "ionian" => Some(Mode::Major),
            "m" | "min" | "minor" | "aeo" | "aeolian" => Some(Mode::Minor),
            _ => None,
        }
    }

    pub fn offsets(self) -> &'static [usize; 7] {
        match self {
            Mode::Major => &MAJOR_OFFSETS,
            Mode::Minor => &MINOR_OFFSETS,
        }
    }
}

/// A root spelling plus a mode, e.g. "F#" minor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeySignature {
    /// Root as written; odd notations are corrected when spelling the key.
    pub root: String,
    pub mode: Mode,
}

impl KeySignature {
    pub fn new(root: impl Into<String>, mode: Mode) -> Self {
        KeySignature {
            root: root.into(),
            mode,
        }
    }

    /// The seven notes of this key, see [`notes_in_key`].
    pub fn notes(&self, octave: Option<i32>) -> Result<Vec<String>> {
        notes_in_key(&self.root, self.mode, octave)
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Major => write!(f, "{}", self.root),
            Mode::Minor => write!(f, "{}m", self.root),
        }
    }
}

/// Spell the seven notes of the key built on `root`.
///
/// `root` must be a bare letter plus accidental; no octave digit is
/// stripped. The table that contains the root (sharp first) decides the
/// spelling of every degree, so "F" major yields "A#" rather than "Bb".
///
/// With `octave`, entries are suffixed with `octave` up to G#/Ab and with
/// `octave + 1` once the scale wraps past the end of the A-anchored table.
pub fn notes_in_key(root: &str, mode: Mode, octave: Option<i32>) -> Result<Vec<String>> {
    let corrected = notation::correct_odd_notation(root);
    let Some((pitch_class, spelling)) = notation::lookup(corrected) else {
        debug!(root, "key root not recognized");
        return Err(NoteError::UnrecognizedNote(root.to_string()));
    };

    let table = spelling.table();
    let octave = octave.map(i64::from);
    let mut working = Vec::with_capacity(SEMITONES * 2);
    working.extend(table.iter().map(|name| with_octave(name, octave)));
    working.extend(table.iter().map(|name| with_octave(name, octave.map(|o| o + 1))));

    let rotated = &working[pitch_class.index()..];
    let notes: Vec<String> = mode
        .offsets()
        .iter()
        .map(|&offset| rotated[offset].clone())
        .collect();

    trace!(root, ?mode, ?spelling, ?notes, "spelled key signature");
    Ok(notes)
}

fn with_octave(name: &str, octave: Option<i64>) -> String {
    match octave {
        Some(o) => format!("{name}{o}"),
        None => name.to_string(),
    }
}
