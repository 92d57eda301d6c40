use crate::name::{encode_name, skip_name};
use crate::parser::parse_at;
use crate::Result;
use bytes::BufMut;
use nom::bytes::complete::take as take_bytes;
use std::fmt;
use tracing::{instrument, trace};

#[derive(Debug, PartialEq)]
/// The question section is used to carry the "question" in most queries, i.e.,
/// the parameters that define what is being asked.
pub struct Question {
    /// RFC1035 - a domain name represented as a sequence of labels, where each
    /// label consists of a length octet followed by that number of octets.  The
    /// domain name terminates with the zero length octet for the null label of
    /// the root.  Note that this field may be an odd number of octets; no
    /// padding is used.
    pub q_name: String,

    /// RFC1035 - a two octet code which specifies the type of the query.
    pub q_type: Type,

    /// RFC1035 - a two octet code that specifies the [`Class`] of the query.
    pub q_class: Class,
}

impl Question {
    pub fn new(q_name: &str, q_type: Type) -> Self {
        Question {
            q_name: q_name.to_string(),
            q_type,
            q_class: Class::default(),
        }
    }

    #[instrument(skip(buf))]
    pub(crate) fn to_bytes(&self, buf: &mut Vec<u8>) -> usize {
        let byte_count = encode_name(&self.q_name, buf);
        buf.put_u16(self.q_type.into());
        buf.put_u16(self.q_class.into());

        trace!("Wrote {} bytes", byte_count + 4);

        byte_count + 4
    }
}

/// Advances past the question starting at `offset`: its name, then the two
/// octet type and class. Returns the offset just after the question.
#[instrument(skip(message))]
pub fn skip_question(message: &[u8], offset: usize) -> Result<usize> {
    trace!("skipping question");
    let offset = skip_name(message, offset)?;
    let (_, offset) = parse_at(message, offset, take_bytes(4usize))?;
    Ok(offset)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Record types, as carried in questions and resource records.
pub enum Type {
    /// RFC1035 - (1) a host address.
    #[default]
    A,

    /// RFC1035 - (2) an authoritative name server.
    NS,

    /// RFC1035 - (5) the canonical name for an alias.
    CNAME,

    /// RFC1035 - (6) marks the start of a zone of authority.
    SOA,

    /// RFC1035 - (12) a domain name pointer.
    PTR,

    /// RFC1035 - (15) mail exchange.
    MX,

    /// RFC1035 - (16) text strings.
    TXT,

    /// RFC3596 - (28) a single IPv6 address.
    AAAA,

    /// RFC1035 - (255) A request for all records.
    STAR,

    /// Any other [`Type`] - the value is contained within.
    Unknown(u16),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        let disp = match self {
            Self::A => "A",
            Self::NS => "NS",
            Self::CNAME => "CNAME",
            Self::SOA => "SOA",
            Self::PTR => "PTR",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::AAAA => "AAAA",
            Self::STAR => "*",
            Self::Unknown(i) => return write!(f, "TYPE{}", i),
        };
        write!(f, "{}", disp)
    }
}

impl From<Type> for u16 {
    fn from(t: Type) -> u16 {
        match t {
            Type::A => 1,
            Type::NS => 2,
            Type::CNAME => 5,
            Type::SOA => 6,
            Type::PTR => 12,
            Type::MX => 15,
            Type::TXT => 16,
            Type::AAAA => 28,
            Type::STAR => 255,
            Type::Unknown(i) => i,
        }
    }
}

impl From<u16> for Type {
    fn from(val: u16) -> Self {
        match val {
            1 => Type::A,
            2 => Type::NS,
            5 => Type::CNAME,
            6 => Type::SOA,
            12 => Type::PTR,
            15 => Type::MX,
            16 => Type::TXT,
            28 => Type::AAAA,
            255 => Type::STAR,
            _ => Type::Unknown(val),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// The class of the query - you will want [`Class::IN`] (the default) 99.99% of
/// the time.
pub enum Class {
    /// RFC1035 - 1 the Internet.
    #[default]
    IN,

    /// RFC1035 - 3 the CHAOS class.
    CH,

    /// RFC1035 - 4 Hesiod [Dyer 87].
    HS,

    /// RFC1035 - 255 any class.
    STAR,

    /// An unknown class - contained within.
    Unknown(u16),
}

impl From<Class> for u16 {
    fn from(c: Class) -> u16 {
        match c {
            Class::IN => 1,
            Class::CH => 3,
            Class::HS => 4,
            Class::STAR => 255,
            Class::Unknown(i) => i,
        }
    }
}

impl From<u16> for Class {
    fn from(val: u16) -> Self {
        match val {
            1 => Class::IN,
            3 => Class::CH,
            4 => Class::HS,
            255 => Class::STAR,
            _ => Class::Unknown(val),
        }
    }
}
