/// Errors from note and key resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteError {
    #[error("note name not recognized: {0:?}")]
    UnrecognizedNote(String),

    #[error("invalid key signature {input:?}: {message}")]
    InvalidKey { input: String, message: String },
}

pub type Result<T> = std::result::Result<T, NoteError>;
