//! Encoding of DNS queries and decoding of DNS responses, as per RFC1035.
//!
//! Every read of the wire format is bounds checked: a message that ends
//! before a field it declares produces [`MessageError::Truncated`] rather than
//! a panic.

mod error;
mod header;
mod name;
mod parser;
mod query;
mod question;
mod resource_record;
mod response;

pub use error::MessageError;
pub use header::{parse_header, Header, OpCode, RCode, HEADER_LEN, QUERY_FLAGS};
pub use name::{encode_name, read_name, skip_name, validate_name};
pub use query::{encode_query, Query, QueryId};
pub use question::{skip_question, Class, Question, Type};
pub use resource_record::{parse_answer, read_resource_record, RData, ResourceRecord};
pub use response::{answer_records, Response};

pub type Result<T> = std::result::Result<T, MessageError>;
