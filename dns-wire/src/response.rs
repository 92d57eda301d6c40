use crate::header::HEADER_LEN;
use crate::{parse_answer, parse_header, read_resource_record, skip_question};
use crate::{Header, ResourceRecord, Result};
use std::fmt;
use std::net::Ipv4Addr;
use tracing::{instrument, trace};

#[derive(Debug, PartialEq)]
/// What a stub resolver needs from a response: the header, and the IPv4
/// addresses of the A records in the answer section, in order.
pub struct Response {
    pub header: Header,
    pub addresses: Vec<Ipv4Addr>,
}

impl Response {
    /// Reads the u8 buffer and decodes the header and answer addresses from it.
    ///
    /// The question section is skipped and answer owner names are walked over
    /// without dereferencing compression pointers. Records that are not four
    /// byte addresses are consumed and dropped.
    #[instrument(skip(message))]
    pub fn from_bytes(message: &[u8]) -> Result<Response> {
        let header = parse_header(message)?;

        let mut offset = answers_start(message, &header)?;

        let mut addresses = Vec::new();
        for _ in 0..header.an_count {
            let (address, next) = parse_answer(message, offset)?;
            offset = next;
            addresses.extend(address);
        }

        let response = Response { header, addresses };

        trace!("Read input as: {}", response);

        Ok(response)
    }
}

/// Fully decodes every record in the answer section of `message`, following
/// compression pointers. Meant for diagnostics; [`Response::from_bytes`] is
/// all that is needed to resolve addresses.
#[instrument(skip(message))]
pub fn answer_records(message: &[u8]) -> Result<Vec<ResourceRecord>> {
    let header = parse_header(message)?;
    let mut offset = answers_start(message, &header)?;

    let mut answers = Vec::with_capacity(header.an_count as usize);
    for _ in 0..header.an_count {
        let (record, next) = read_resource_record(message, offset)?;
        offset = next;
        answers.push(record);
    }
    Ok(answers)
}

/// Skips the header and the question section.
fn answers_start(message: &[u8], header: &Header) -> Result<usize> {
    let mut offset = HEADER_LEN;
    for _ in 0..header.qd_count {
        offset = skip_question(message, offset)?;
    }
    Ok(offset)
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> std::result::Result<(), fmt::Error> {
        write!(
            f,
            "Response(id:{}, rcode:{}) - [",
            self.header.id,
            self.header.rcode()
        )?;
        for (i, a) in self.addresses.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", a)?;
        }
        write!(f, "]")
    }
}
