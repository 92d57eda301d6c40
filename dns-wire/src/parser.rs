use crate::{MessageError, Result};
use nom::bits::complete::take as take_bits;
use nom::IResult;
use tracing::trace;

/// A length byte with both high bits set starts a compression pointer.
pub(crate) const POINTER_MASK: u8 = 0xC0;

/// Helper for pulling out either the length of a label, or the offset of the
/// name to continue from if using compression.
#[derive(Debug, PartialEq)]
pub(crate) enum Label {
    Pointer(u16),
    Length(u8),
}

/// Runs `parser` against `message` starting at `offset`, returning its output
/// and the absolute offset just after what it consumed.
///
/// Every field read in the crate goes through here, so a read past the end of
/// the message always comes back as [`MessageError::Truncated`].
pub(crate) fn parse_at<'a, O, F>(
    message: &'a [u8],
    offset: usize,
    mut parser: F,
) -> Result<(O, usize)>
where
    F: FnMut(&'a [u8]) -> IResult<&'a [u8], O>,
{
    let input = message
        .get(offset..)
        .ok_or(MessageError::Truncated { offset })?;
    let (rest, out) = parser(input).map_err(|e| MessageError::from_nom(message, e))?;
    Ok((out, message.len() - rest.len()))
}

/// Reads the length, or the offset if using compression.
pub(crate) fn label(input: &[u8]) -> IResult<&[u8], Label> {
    nom::bits::bits(label_bits)(input)
}

fn label_bits(i: (&[u8], usize)) -> IResult<(&[u8], usize), Label> {
    let (i, flags): (_, u8) = take_bits(2usize)(i)?;
    if flags == 0b11 {
        let (i, offset): (_, u16) = take_bits(14usize)(i)?;
        trace!("Name pointer at offset: {}", offset);
        Ok((i, Label::Pointer(offset)))
    } else {
        let (i, l): (_, u8) = take_bits(6usize)(i)?;
        let len = (flags << 6) | l;
        trace!("Label of length {} found", len);
        Ok((i, Label::Length(len)))
    }
}
