use dns_wire::MessageError;
use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong with a single lookup. None of these end the
/// session.
#[derive(Error, Debug)]
pub(crate) enum ResolveError {
    #[error("invalid domain name: {0}")]
    InvalidName(MessageError),

    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("socket closed before a response arrived")]
    NoResponse,

    #[error("malformed response: {0}")]
    Malformed(#[from] MessageError),
}
