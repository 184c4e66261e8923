//! Key field parsing ("G", "F#m", "Bb minor") using winnow combinators.

use winnow::ascii::space0;
use winnow::combinator::opt;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::error::{NoteError, Result};
use crate::key::{KeySignature, Mode};

type PResult<T> = std::result::Result<T, ErrMode<ContextError>>;

/// Parse the root letter (A-G, either case) and return it uppercased.
fn parse_letter(input: &mut &str) -> PResult<char> {
    one_of(('A'..='G', 'a'..='g'))
        .map(|c: char| c.to_ascii_uppercase())
        .parse_next(input)
}

/// Parse an optional `#` or `b`. No mode word starts with "b", so a `b`
/// straight after the letter is always a flat.
fn parse_accidental(input: &mut &str) -> PResult<Option<char>> {
    opt(one_of(['#', 'b'])).parse_next(input)
}

fn parse_separator<'s>(input: &mut &'s str) -> PResult<&'s str> {
    space0.parse_next(input)
}

fn parse_mode_word<'s>(input: &mut &'s str) -> PResult<&'s str> {
    take_while(0.., |c: char| c.is_ascii_alphabetic()).parse_next(input)
}

/// Parse a key field into a root spelling and mode.
///
/// Surrounding whitespace is ignored; whitespace between root and mode is
/// optional. The root is not checked against the spelling tables here.
pub fn parse_key_field(value: &str) -> Result<KeySignature> {
    let invalid = |message: &str| NoteError::InvalidKey {
        input: value.to_string(),
        message: message.to_string(),
    };

    let mut input = value.trim();

    let letter = parse_letter(&mut input).map_err(|_| invalid("expected a root letter A-G"))?;
    let accidental = parse_accidental(&mut input).map_err(|_| invalid("bad accidental"))?;
    parse_separator(&mut input).map_err(|_| invalid("bad separator"))?;
    let mode_word = parse_mode_word(&mut input).map_err(|_| invalid("bad mode"))?;

    if !input.trim().is_empty() {
        return Err(invalid("unexpected trailing text"));
    }

    let mode = Mode::parse(mode_word)
        .ok_or_else(|| invalid(&format!("unknown mode '{mode_word}'")))?;

    let mut root = letter.to_string();
    if let Some(acc) = accidental {
        root.push(acc);
    }

    Ok(KeySignature { root, mode })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let key = parse_key_field("G").unwrap();
        assert_eq!(key.root, "G");
        assert_eq!(key.mode, Mode::Major);
    }

    #[test]
    fn test_parse_minor_key() {
        let key = parse_key_field("Am").unwrap();
        assert_eq!(key.root, "A");
        assert_eq!(key.mode, Mode::Minor);
    }

    #[test]
    fn test_parse_sharp_minor_key() {
        let key = parse_key_field("F#m").unwrap();
        assert_eq!(key.root, "F#");
        assert_eq!(key.mode, Mode::Minor);
    }

    #[test]
    fn test_parse_flat_minor_key() {
        let key = parse_key_field("Bbm").unwrap();
        assert_eq!(key.root, "Bb");
        assert_eq!(key.mode, Mode::Minor);
    }

    #[test]
    fn test_parse_spelled_out_mode() {
        let key = parse_key_field("  Eb minor ").unwrap();
        assert_eq!(key.root, "Eb");
        assert_eq!(key.mode, Mode::Minor);

        let key = parse_key_field("D major").unwrap();
        assert_eq!(key.mode, Mode::Major);
    }

    #[test]
    fn test_separator_is_optional_and_flexible() {
        assert_eq!(parse_key_field("C#minor").unwrap(), parse_key_field("C# minor").unwrap());
        let key = parse_key_field("Ab \t maj").unwrap();
        assert_eq!(key.root, "Ab");
        assert_eq!(key.mode, Mode::Major);
        assert!(parse_key_field("A m m").is_err());
    }

    #[test]
    fn test_lowercase_root() {
        let key = parse_key_field("g").unwrap();
        assert_eq!(key.root, "G");
    }

    #[test]
    fn test_odd_root_kept_verbatim() {
        let key = parse_key_field("Cb").unwrap();
        assert_eq!(key.root, "Cb");
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            parse_key_field(""),
            Err(NoteError::InvalidKey { .. })
        ));
        assert!(parse_key_field("H").is_err());
        assert!(parse_key_field("D dorian").is_err());
        assert!(parse_key_field("C4").is_err());
    }
}
