use crate::parser::parse_at;
use crate::Result;
use bytes::BufMut;
use nom::number::complete::be_u16;
use nom::sequence::tuple;
use std::fmt;
use tracing::{instrument, trace};

/// Standard query with Recursion Desired set.
pub const QUERY_FLAGS: u16 = 0x0100;

/// Every header is exactly 12 bytes on the wire.
pub const HEADER_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// The DNS Message Header as per RFC1035: six big-endian 16 bit fields.
pub struct Header {
    /// RFC1035 - A 16 bit identifier assigned by the program that generates any
    /// kind of query. This identifier is copied the corresponding reply and
    /// can be used by the requester to match up replies to outstanding queries.
    pub id: u16,

    /// QR, Opcode, AA, TC, RD, RA, Z, AD, CD and RCODE packed as on the wire.
    /// See the accessors for the decoded values.
    pub flags: u16,

    /// RFC1035 - the number of entries in the question section.
    pub qd_count: u16,

    /// RFC1035 - the number of resource records in the answer section.
    pub an_count: u16,

    /// RFC1035 - the number of name server resource records in the authority
    /// records section.
    pub ns_count: u16,

    /// RFC1035 - the number of resource records in the additional records
    /// section.
    pub ar_count: u16,
}

impl Header {
    /// A header for a recursive query carrying a single question.
    pub fn query(id: u16) -> Self {
        Header {
            id,
            flags: QUERY_FLAGS,
            qd_count: 1,
            ..Default::default()
        }
    }

    #[instrument(skip(buf))]
    pub(crate) fn to_bytes(&self, buf: &mut Vec<u8>) -> usize {
        buf.put_u16(self.id);
        buf.put_u16(self.flags);
        buf.put_u16(self.qd_count);
        buf.put_u16(self.an_count);
        buf.put_u16(self.ns_count);
        buf.put_u16(self.ar_count);

        trace!("Wrote 12 bytes");

        HEADER_LEN
    }

    /// RFC1035 - whether this message is a query (false), or a response (true).
    pub fn qr(&self) -> bool {
        self.flags & 0x8000 != 0
    }

    /// RFC1035 - the kind of query in this message.
    pub fn opcode(&self) -> OpCode {
        OpCode::from(((self.flags >> 11) & 0xf) as u8)
    }

    /// RFC1035 - Authoritative Answer.
    pub fn aa(&self) -> bool {
        self.flags & 0x0400 != 0
    }

    /// RFC1035 - TrunCation - the message was truncated due to length greater
    /// than that permitted on the transmission channel.
    pub fn tc(&self) -> bool {
        self.flags & 0x0200 != 0
    }

    /// RFC1035 - Recursion Desired.
    pub fn rd(&self) -> bool {
        self.flags & 0x0100 != 0
    }

    /// RFC1035 - Recursion Available.
    pub fn ra(&self) -> bool {
        self.flags & 0x0080 != 0
    }

    /// RFC1035 - Response code.
    pub fn rcode(&self) -> RCode {
        RCode::from((self.flags & 0xf) as u8)
    }
}

/// Reads the 12 byte header at the start of `message`.
#[instrument(skip(message))]
pub fn parse_header(message: &[u8]) -> Result<Header> {
    trace!("reading header");
    let ((id, flags, qd_count, an_count, ns_count, ar_count), _) = parse_at(
        message,
        0,
        tuple((be_u16, be_u16, be_u16, be_u16, be_u16, be_u16)),
    )?;

    Ok(Header {
        id,
        flags,
        qd_count,
        an_count,
        ns_count,
        ar_count,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// A four bit field that specifies kind of query in this message.  This value
/// is set by the originator of a query and copied into the response.
pub enum OpCode {
    /// A standard query.
    Query,

    /// An inverse query.
    IQuery,

    /// A server status request.
    Status,

    /// An unknown OpCode (contained within).
    Unknown(u8),
}

impl From<u8> for OpCode {
    fn from(val: u8) -> Self {
        match val {
            0 => OpCode::Query,
            1 => OpCode::IQuery,
            2 => OpCode::Status,
            n => OpCode::Unknown(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Response code - this 4 bit field is set as part of responses.
pub enum RCode {
    /// No error condition.
    NoError,

    /// Format error - The name server was unable to interpret the query.
    FormatError,

    /// Server failure - The name server was unable to process this query due to
    /// a problem with the name server.
    ServerFailure,

    /// Name Error - Meaningful only for responses from an authoritative name
    /// server, this code signifies that the domain name referenced in the query
    /// does not exist.
    NameError,

    /// Not Implemented - The name server does not support the requested kind of
    /// query.
    NotImplemented,

    /// Refused - The name server refuses to perform the specified operation for
    /// policy reasons.
    Refused,

    /// The response code was unknown (contained within).
    Unknown(u8),
}

impl From<u8> for RCode {
    fn from(val: u8) -> Self {
        match val {
            0 => RCode::NoError,
            1 => RCode::FormatError,
            2 => RCode::ServerFailure,
            3 => RCode::NameError,
            4 => RCode::NotImplemented,
            5 => RCode::Refused,
            n => RCode::Unknown(n),
        }
    }
}

impl fmt::Display for RCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        match self {
            RCode::NoError => write!(f, "NOERROR"),
            RCode::FormatError => write!(f, "FORMERR"),
            RCode::ServerFailure => write!(f, "SERVFAIL"),
            RCode::NameError => write!(f, "NXDOMAIN"),
            RCode::NotImplemented => write!(f, "NOTIMP"),
            RCode::Refused => write!(f, "REFUSED"),
            RCode::Unknown(i) => write!(f, "RCODE{}", i),
        }
    }
}
