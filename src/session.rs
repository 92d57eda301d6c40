use crate::error::ResolveError;
use crate::transport::Transport;
use dns_wire::{answer_records, encode_query, validate_name, QueryId, Response, Type};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info, instrument, warn, Level};

pub(crate) const PROMPT: &str = "Enter domain name (or 'exit' to quit): ";

/// One line of user input, trimmed.
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Exit,
    Empty,
    Domain(&'a str),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(line: &'a str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            Input::Exit
        } else if line.is_empty() {
            Input::Empty
        } else {
            Input::Domain(line)
        }
    }
}

/// The interactive loop: prompt for a domain, look up its A records and print
/// them, until the user types `exit` or input ends.
pub(crate) struct Session<T, R, W> {
    transport: T,
    input: R,
    output: W,
    query_id: QueryId,
}

impl<T, R, W> Session<T, R, W>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(transport: T, input: R, output: W, query_id: QueryId) -> Self {
        Self {
            transport,
            input,
            output,
            query_id,
        }
    }

    /// Runs until `exit` or end of input. Lookup failures are reported and the
    /// loop carries on; only failing to read or write the terminal is fatal.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut raw = Vec::new();
        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            raw.clear();
            if self.input.read_until(b'\n', &mut raw).await? == 0 {
                info!("End of input, closing");
                writeln!(self.output)?;
                writeln!(self.output, "Goodbye!")?;
                return Ok(());
            }

            let line = match std::str::from_utf8(&raw) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Discarding input line: {}", e);
                    writeln!(self.output, "Input is not valid UTF-8. Please try again.")?;
                    continue;
                }
            };

            match Input::from(line) {
                Input::Exit => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                Input::Empty => {
                    writeln!(self.output, "Domain name cannot be empty. Please try again.")?;
                }
                Input::Domain(domain) => match self.resolve(domain).await {
                    Ok(response) => self.print_response(domain, &response)?,
                    Err(e) => {
                        error!("Could not resolve {}: {}", domain, e);
                        writeln!(self.output, "Failed to resolve {}: {}", domain, e)?;
                    }
                },
            }
        }
    }

    #[instrument(skip(self))]
    async fn resolve(&self, domain: &str) -> Result<Response, ResolveError> {
        // Accept the fully qualified form, the root label is implied.
        let name = domain.strip_suffix('.').unwrap_or(domain);
        validate_name(name).map_err(ResolveError::InvalidName)?;

        let id = self.query_id.next_id();
        let query = encode_query(name, Type::A, id);
        info!("Sending query id {} for {}", id, name);

        let bytes = self.transport.exchange(&query).await?;
        let response = Response::from_bytes(&bytes)?;

        if tracing::enabled!(Level::DEBUG) {
            match answer_records(&bytes) {
                Ok(records) => {
                    for r in records.iter() {
                        debug!("Answer: {}", r);
                    }
                }
                Err(e) => debug!("Could not decode answer records: {}", e),
            }
        }

        info!("Got back: {}", response);
        Ok(response)
    }

    fn print_response(&mut self, domain: &str, response: &Response) -> std::io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "IP Addresses for {}:", domain)?;
        for address in response.addresses.iter() {
            writeln!(self.output, "- {}", address)?;
        }
        if response.addresses.is_empty() {
            writeln!(
                self.output,
                "- (no A records, rcode {})",
                response.header.rcode()
            )?;
        }
        writeln!(self.output)
    }
}
