mod config;
mod error;
mod session;
mod transport;

use config::Config;
use session::Session;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use transport::UdpTransport;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Logs go to stderr so they never interleave with the prompt.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::default();
    tracing::info!("Resolving against {}", config.resolver);

    let transport = UdpTransport::new(config.resolver, config.timeout);
    let input = BufReader::new(tokio::io::stdin());
    let mut session = Session::new(transport, input, std::io::stdout(), config.query_id);

    session.run().await
}
