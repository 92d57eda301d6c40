use nom::error::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MessageError {
    /// A field starting at (or running past) `offset` does not fit in the
    /// message.
    #[error("truncated message: read past the end at offset {offset}")]
    Truncated { offset: usize },

    #[error("circular reference - detected a pointer we have seen already: {0}")]
    CircularReference(u16),

    #[error("empty label in name: {0:?}")]
    EmptyLabel(String),

    #[error("label of length {0} exceeds 63 bytes: {1}")]
    LabelTooLong(usize, String),

    #[error("encoded name of length {0} exceeds 255 bytes")]
    NameTooLong(usize),

    #[error("parsing error: {0}")]
    Parsing(String),
}

impl MessageError {
    /// Converts a nom failure raised while parsing a suffix of `message` into
    /// a [`MessageError`] carrying the absolute offset of the failed read.
    pub(crate) fn from_nom(message: &[u8], err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => MessageError::Truncated {
                offset: message.len(),
            },
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                let offset = message.len() - e.input.len();
                match e.code {
                    ErrorKind::Eof => MessageError::Truncated { offset },
                    code => MessageError::Parsing(format!("{:?} at offset {}", code, offset)),
                }
            }
        }
    }
}
