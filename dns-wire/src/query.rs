use crate::{Header, Question, Type};
use tracing::{instrument, trace};

/// Where the transaction ID of each new query comes from.
///
/// IDs only have to be unlikely to collide between in-flight queries; nothing
/// here is meant to resist an off-path attacker guessing them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum QueryId {
    /// A fresh random ID per query.
    #[default]
    Random,

    /// The low 16 bits of the current process id, the same for every query.
    ProcessId,

    /// Always the contained value.
    Fixed(u16),
}

impl QueryId {
    pub fn next_id(&self) -> u16 {
        match self {
            QueryId::Random => fastrand::u16(..),
            QueryId::ProcessId => std::process::id() as u16,
            QueryId::Fixed(id) => *id,
        }
    }
}

#[derive(Debug, PartialEq)]
/// A recursive query carrying a single [`Question`] of class IN.
pub struct Query {
    pub header: Header,
    pub question: Question,
}

impl Query {
    pub fn new(id: u16, domain: &str, q_type: Type) -> Self {
        Query {
            header: Header::query(id),
            question: Question::new(domain, q_type),
        }
    }

    /// Serializes the query into the provided buffer, returning the number of
    /// bytes written to the buffer.
    #[instrument(skip(buf))]
    pub fn to_bytes(&self, buf: &mut Vec<u8>) -> usize {
        let byte_count = self.header.to_bytes(buf) + self.question.to_bytes(buf);

        trace!("Wrote {} bytes", byte_count);

        byte_count
    }
}

/// Builds the wire form of a recursive query for `domain`.
///
/// The name is encoded as given (see [`crate::encode_name`]); callers wanting
/// to reject malformed names should run [`crate::validate_name`] first.
pub fn encode_query(domain: &str, q_type: Type, id: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(512);
    Query::new(id, domain, q_type).to_bytes(&mut buf);
    buf
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::setup;

    #[test]
    fn test_encode_query_example_com() {
        setup();
        let buf = encode_query("example.com", Type::A, 0xbeef);
        assert_eq!(
            buf,
            vec![
                0xbe, 0xef, // ID
                0x01, 0x00, // Flags - RD
                0, 1, // qdcount
                0, 0, // ancount
                0, 0, // nscount
                0, 0, // arcount
                7, 101, 120, 97, 109, 112, 108, 101, // example
                3, 99, 111, 109, // com
                0,   // terminator
                0, 1, // qtype - A
                0, 1, // qclass - IN
            ]
        );
    }

    #[test]
    fn test_encode_query_layout() {
        setup();
        for domain in ["a", "www.google.com", "x.y.z.w.v", "northeastern.edu"] {
            let buf = encode_query(domain, Type::A, 7);

            assert_eq!(&buf[0..2], &[0, 7]);
            assert_eq!(&buf[2..4], &[0x01, 0x00]);
            assert_eq!(&buf[4..12], &[0, 1, 0, 0, 0, 0, 0, 0]);

            let mut offset = 12;
            for label in domain.split('.') {
                assert_eq!(buf[offset] as usize, label.len());
                assert_eq!(&buf[offset + 1..offset + 1 + label.len()], label.as_bytes());
                offset += 1 + label.len();
            }
            assert_eq!(&buf[offset..], &[0, 0, 1, 0, 1]);
        }
    }

    #[test]
    fn test_encode_query_other_type() {
        setup();
        let buf = encode_query("ryant.org", Type::Unknown(65), 1);
        let len = buf.len();
        assert_eq!(&buf[len - 4..], &[0, 65, 0, 1]);
    }

    #[test]
    fn test_query_id() {
        assert_eq!(QueryId::Fixed(42).next_id(), 42);
        assert_eq!(
            QueryId::ProcessId.next_id(),
            QueryId::ProcessId.next_id()
        );
        assert_eq!(QueryId::default(), QueryId::Random);
    }
}
