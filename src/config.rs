use dns_wire::QueryId;
use std::net::SocketAddr;
use std::time::Duration;

/// Fixed settings for a resolver session. There is no file, environment or
/// flag source for these; `RUST_LOG` only controls logging.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    /// Upstream recursive resolver every query is sent to.
    pub resolver: SocketAddr,

    /// How long to wait for the response to a single query.
    pub timeout: Duration,

    /// Source of transaction IDs.
    pub query_id: QueryId,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resolver: SocketAddr::from(([8, 8, 8, 8], 53)),
            timeout: Duration::from_secs(5),
            query_id: QueryId::Random,
        }
    }
}
