//! Domain names in their RFC1035 wire form.
//!
//! A name is a sequence of labels, where each label consists of a length octet
//! followed by that number of octets, terminated with the zero length octet for
//! the null label of the root. Anywhere a label may start, a two octet pointer
//! (top two bits set) may instead redirect the rest of the name to an earlier
//! offset in the message.

use crate::parser::{label, parse_at, Label};
use crate::{MessageError, Result};
use bytes::BufMut;
use nom::bytes::complete::take as take_bytes;
use std::collections::HashSet;
use tracing::{instrument, trace};

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;

/// Writes `name` into `buf` as length-prefixed labels and a terminating zero,
/// returning the number of bytes written.
///
/// No validation happens here: empty labels, over-long labels and non-ASCII
/// text are written as given, with each length octet holding the low 8 bits
/// of the label's byte length. Use [`validate_name`] first when the input is
/// untrusted.
#[instrument(skip(buf))]
pub fn encode_name(name: &str, buf: &mut Vec<u8>) -> usize {
    let mut byte_count = 0;
    for part in name.split('.') {
        buf.put_u8(part.len() as u8);
        buf.put_slice(part.as_bytes());
        byte_count += 1 + part.len();
    }
    buf.put_u8(0);
    byte_count += 1;

    trace!("Wrote {} bytes", byte_count);

    byte_count
}

/// Checks that `name` can be encoded as a well-formed wire name: no empty
/// labels, no label over 63 bytes and no more than 255 bytes once encoded.
#[instrument]
pub fn validate_name(name: &str) -> Result<()> {
    let mut encoded_len = 1;
    for part in name.split('.') {
        if part.is_empty() {
            return Err(MessageError::EmptyLabel(name.to_string()));
        }
        if part.len() > MAX_LABEL_LEN {
            return Err(MessageError::LabelTooLong(part.len(), part.to_string()));
        }
        encoded_len += 1 + part.len();
    }
    if encoded_len > MAX_NAME_LEN {
        return Err(MessageError::NameTooLong(encoded_len));
    }
    Ok(())
}

/// Walks over the name starting at `offset` without decoding it, returning
/// the offset of the first byte after it.
///
/// A compression pointer ends the name after its two bytes and is never
/// followed, so only the name's in-place size is accounted for.
#[instrument(skip(message))]
pub fn skip_name(message: &[u8], offset: usize) -> Result<usize> {
    let mut offset = offset;
    loop {
        let (l, next) = parse_at(message, offset, label)?;
        match l {
            Label::Length(0) | Label::Pointer(_) => return Ok(next),
            Label::Length(length) => {
                let (_, next) = parse_at(message, next, take_bytes(length))?;
                offset = next;
            }
        }
    }
}

/// Decodes the name starting at `offset` into its dotted text form, following
/// compression pointers wherever they appear.
///
/// Returns the name and the offset just after the name's in-place encoding
/// (the first pointer, or the terminating zero). A pointer seen twice is
/// rejected with [`MessageError::CircularReference`].
#[instrument(skip(message))]
pub fn read_name(message: &[u8], offset: usize) -> Result<(String, usize)> {
    let mut labels: Vec<String> = Vec::new();
    let mut seen_ptrs = HashSet::new();
    let mut end = None;
    let mut offset = offset;

    loop {
        let (l, next) = parse_at(message, offset, label)?;
        match l {
            Label::Length(0) => {
                let end = *end.get_or_insert(next);
                let name = labels.join(".");
                trace!("Read name {:?}, ends at {}", name, end);
                return Ok((name, end));
            }
            Label::Length(length) => {
                let (part, next) = parse_at(message, next, take_bytes(length))?;
                labels.push(String::from_utf8_lossy(part).into_owned());
                offset = next;
            }
            Label::Pointer(ptr) => {
                if !seen_ptrs.insert(ptr) {
                    return Err(MessageError::CircularReference(ptr));
                }
                end.get_or_insert(next);
                offset = ptr as usize;
            }
        }
    }
}
