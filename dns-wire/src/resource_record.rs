use crate::name::{read_name, skip_name};
use crate::parser::parse_at;
use crate::{Class, Result, Type};
use nom::bytes::complete::take as take_bytes;
use nom::number::complete::{be_u16, be_u32};
use nom::sequence::tuple;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::{instrument, trace};

#[derive(Debug, PartialEq)]
/// The answer, authority and additional sections all share the same format,
/// that is a variable number of [`ResourceRecord`]s.
pub struct ResourceRecord {
    /// A domain name to which this resource record pertains, with any
    /// compression pointers resolved.
    pub name: String,

    /// The type and data of the resource record.
    pub data: RData,

    /// The class of the data in the `data` field.
    pub class: Class,

    /// RFC1035 - a 32 bit unsigned integer that specifies the time interval (in
    /// seconds) that the resource record may be cached before it should be
    /// discarded.
    pub ttl: u32,
}

#[derive(Debug, PartialEq)]
/// The [`ResourceRecord`] data.
pub enum RData {
    /// RFC1035 - (1) a host address.
    A(Ipv4Addr),

    /// RFC1035 - (5) the canonical name for an alias.
    CNAME(String),

    /// RFC3596 - a single IPv6 address.
    AAAA(Ipv6Addr),

    /// Any other record - the type and the raw rdata bytes.
    Raw(Type, Vec<u8>),
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        match self {
            Self::A(v4) => write!(f, "A({})", v4),
            Self::CNAME(s) => write!(f, "CNAME({})", s),
            Self::AAAA(v6) => write!(f, "AAAA({})", v6),
            Self::Raw(t, v) => write!(f, "{}({} bytes)", t, v.len()),
        }
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        write!(f, "{} (ttl {}) => {}", self.name, self.ttl, self.data)
    }
}

/// Reads one answer record at `offset`, returning its IPv4 address if it has a
/// four byte rdata, and the offset just after the record.
///
/// The owner name is only walked over, never decoded: a compression pointer
/// accounts for exactly its own two bytes. Records with any other rdata length
/// (AAAA, CNAME, ...) yield `None` but are still consumed whole, so the next
/// record can be read from the returned offset.
#[instrument(skip(message))]
pub fn parse_answer(message: &[u8], offset: usize) -> Result<(Option<Ipv4Addr>, usize)> {
    trace!("reading answer");
    let offset = skip_name(message, offset)?;

    // Type, class and TTL.
    let (_, offset) = parse_at(message, offset, take_bytes(8usize))?;
    let (rdlength, offset) = parse_at(message, offset, be_u16)?;

    trace!("Found rdata of length: {}", rdlength);

    let (rdata, next) = parse_at(message, offset, take_bytes(rdlength))?;
    let address = match rdata {
        [a, b, c, d] => Some(Ipv4Addr::new(*a, *b, *c, *d)),
        _ => None,
    };

    Ok((address, next))
}

/// Fully decodes the resource record at `offset`, resolving compression
/// pointers in the owner name (and in CNAME rdata).
#[instrument(skip(message))]
pub fn read_resource_record(message: &[u8], offset: usize) -> Result<(ResourceRecord, usize)> {
    trace!("reading resource record");
    let (name, offset) = read_name(message, offset)?;
    let ((r_type, class, ttl, rdlength), offset) =
        parse_at(message, offset, tuple((be_u16, be_u16, be_u32, be_u16)))?;
    let (rdata, next) = parse_at(message, offset, take_bytes(rdlength))?;

    let data = match (Type::from(r_type), rdata) {
        (Type::A, [a, b, c, d]) => RData::A(Ipv4Addr::new(*a, *b, *c, *d)),
        (Type::AAAA, rdata) if rdata.len() == 16 => {
            let mut v6: [u8; 16] = [0; 16];
            v6.copy_from_slice(rdata);
            RData::AAAA(Ipv6Addr::from(v6))
        }
        // The target may point anywhere in the message, so it is read from
        // the message rather than from the rdata slice.
        (Type::CNAME, _) => RData::CNAME(read_name(message, offset)?.0),
        (t, rdata) => RData::Raw(t, rdata.to_vec()),
    };

    trace!("Parsed rdata as {}", data);

    Ok((
        ResourceRecord {
            name,
            data,
            class: Class::from(class),
            ttl,
        },
        next,
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{test::setup, MessageError};

    #[test]
    fn test_parse_answer_compressed_a() {
        setup();
        let message: &[u8] = &[
            0xc0, 0x0c, // Name - Pointer @ 12, target not present
            0, 1, // type - A
            0, 1, // class - IN
            0, 0, 0x0e, 0x10, // ttl - 3600
            0, 4, // rdlength - 4
            93, 184, 216, 34, // rdata
        ];
        let (address, offset) = parse_answer(message, 0).unwrap();
        assert_eq!(address, Some(Ipv4Addr::new(93, 184, 216, 34)));
        assert_eq!(address.unwrap().to_string(), "93.184.216.34");
        assert_eq!(offset, 2 + 8 + 2 + 4);
    }

    #[test]
    fn test_parse_answer_pointer_is_two_bytes() {
        setup();
        // The pointer targets garbage; only its own size matters.
        let message: &[u8] = &[
            0xff, 0xff, 0xff, // garbage @ 0
            0xc0, 0x00, // Name - Pointer @ 0
            0, 1, 0, 1, 0, 0, 0, 5, // type, class, ttl
            0, 4, // rdlength
            1, 2, 3, 4, // rdata
        ];
        let (address, offset) = parse_answer(message, 3).unwrap();
        assert_eq!(address, Some(Ipv4Addr::new(1, 2, 3, 4)));
        assert_eq!(offset, message.len());
    }

    #[test]
    fn test_parse_answer_skips_aaaa() {
        setup();
        let message: &[u8] = &[
            // AAAA
            0xc0, 0x0c, // Name
            0, 28, // type - AAAA
            0, 1, // class - IN
            0, 0, 0, 60, // ttl
            0, 16, // rdlength - 16
            0x26, 0x06, 0x28, 0x00, 0x02, 0x20, 0x00, 0x01, 0x02, 0x48, 0x18, 0x93, 0x25, 0xc8,
            0x19, 0x46, // rdata
            // A
            0xc0, 0x0c, // Name
            0, 1, 0, 1, 0, 0, 0, 60, // type, class, ttl
            0, 4, // rdlength
            93, 184, 216, 34, // rdata
        ];
        let (address, offset) = parse_answer(message, 0).unwrap();
        assert_eq!(address, None);
        assert_eq!(offset, 28);

        let (address, offset) = parse_answer(message, offset).unwrap();
        assert_eq!(address, Some(Ipv4Addr::new(93, 184, 216, 34)));
        assert_eq!(offset, message.len());
    }

    #[test]
    fn test_parse_answer_uncompressed_name() {
        setup();
        let message: &[u8] = &[
            3, 99, 111, 109, 0, // com
            0, 1, 0, 1, 0, 0, 0, 5, // type, class, ttl
            0, 4, // rdlength
            10, 0, 0, 1, // rdata
        ];
        let (address, offset) = parse_answer(message, 0).unwrap();
        assert_eq!(address, Some(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(offset, 19);
    }

    #[test]
    fn test_parse_answer_truncated_rdata() {
        setup();
        let message: &[u8] = &[
            0xc0, 0x0c, // Name
            0, 1, 0, 1, 0, 0, 0, 5, // type, class, ttl
            0, 4, // rdlength
            93, 184, // half of the rdata
        ];
        assert_eq!(
            parse_answer(message, 0),
            Err(MessageError::Truncated { offset: 12 })
        );
    }

    #[test]
    fn test_parse_answer_truncated_rdlength() {
        setup();
        let message: &[u8] = &[
            0xc0, 0x0c, // Name
            0, 1, 0, 1, 0, 0, 0, 5, // type, class, ttl
            0, // half of rdlength
        ];
        assert_eq!(
            parse_answer(message, 0),
            Err(MessageError::Truncated { offset: 10 })
        );
    }

    #[test]
    fn test_read_resource_record_cname() {
        setup();
        let message: &[u8] = &[
            3, 119, 119, 119, 3, 99, 111, 109, 0, // 0: www.com
            0xc0, 0x00, // Name - Pointer @ 0
            0, 5, // type - CNAME
            0, 1, // class - IN
            0, 0, 5, 224, // ttl - 1504
            0, 6, // rdlength
            3, 99, 100, 110, 0xc0, 0x04, // rdata - cdn -> com
        ];
        let (record, offset) = read_resource_record(message, 9).unwrap();
        assert_eq!(record.name, "www.com");
        assert_eq!(record.data, RData::CNAME("cdn.com".to_string()));
        assert_eq!(record.class, Class::IN);
        assert_eq!(record.ttl, 1504);
        assert_eq!(offset, message.len());
        assert_eq!(record.to_string(), "www.com (ttl 1504) => CNAME(cdn.com)");
    }

    #[test]
    fn test_read_resource_record_raw() {
        setup();
        let message: &[u8] = &[
            0, // root
            0, 16, // type - TXT
            0, 1, // class - IN
            0, 0, 0, 0, // ttl
            0, 3, // rdlength
            2, 104, 105, // rdata
        ];
        let (record, _) = read_resource_record(message, 0).unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.data, RData::Raw(Type::TXT, vec![2, 104, 105]));
    }
}
