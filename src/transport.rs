use crate::error::ResolveError;
use bytes::Bytes;
use futures::prelude::*;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio_util::codec::BytesCodec;
use tokio_util::udp::UdpFramed;
use tracing::{info, instrument, warn};

type Result<T> = std::result::Result<T, ResolveError>;

/// Sends one query datagram and waits for the matching response datagram.
pub(crate) trait Transport {
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>>;
}

/// A UDP exchange with a single upstream resolver. Each exchange uses its own
/// socket, which is closed when the exchange returns.
#[derive(Debug)]
pub(crate) struct UdpTransport {
    server: SocketAddr,
    timeout: Duration,
}

impl UdpTransport {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }
}

impl Transport for UdpTransport {
    #[instrument(skip(query))]
    async fn exchange(&self, query: &[u8]) -> Result<Vec<u8>> {
        let local_addr = match self.server {
            SocketAddr::V4(_) => SocketAddr::from(([0, 0, 0, 0], 0)),
            SocketAddr::V6(_) => SocketAddr::from(([0u16; 8], 0)),
        };
        let socket = UdpSocket::bind(local_addr).await?;
        let mut framed = UdpFramed::new(socket, BytesCodec::new());

        info!("Sending {} bytes to {}", query.len(), self.server);
        framed
            .send((Bytes::copy_from_slice(query), self.server))
            .await?;

        let server = self.server;
        let recv = async {
            loop {
                match framed.next().await {
                    Some(Ok((bytes, addr))) if addr == server => return Ok(bytes),
                    Some(Ok((_, addr))) => {
                        warn!("Ignoring datagram from unexpected address {}", addr);
                    }
                    Some(Err(e)) => return Err(ResolveError::Transport(e)),
                    None => return Err(ResolveError::NoResponse),
                }
            }
        };

        let bytes = tokio::time::timeout(self.timeout, recv)
            .await
            .map_err(|_| ResolveError::Timeout(self.timeout))??;

        info!("Got back {} bytes from {}", bytes.len(), server);
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::setup;

    #[tokio::test]
    async fn test_exchange_with_local_server() {
        setup();
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (len, peer) = server.recv_from(&mut buf).await.unwrap();
            let mut reply = buf[..len].to_vec();
            reply.reverse();
            server.send_to(&reply, peer).await.unwrap();
        });

        let transport = UdpTransport::new(server_addr, Duration::from_secs(5));
        let reply = transport.exchange(&[1, 2, 3]).await.unwrap();
        assert_eq!(reply, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_exchange_ignores_other_peers() {
        setup();
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();
        let stranger = UdpSocket::bind("127.0.0.1:0").await.unwrap();

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (_, peer) = server.recv_from(&mut buf).await.unwrap();
            // Junk from another address lands first.
            stranger.send_to(&[0xde, 0xad], peer).await.unwrap();
            tokio::time::sleep(Duration::from_millis(20)).await;
            server.send_to(&[4, 5, 6], peer).await.unwrap();
        });

        let transport = UdpTransport::new(server_addr, Duration::from_secs(5));
        let reply = transport.exchange(&[1, 2, 3]).await.unwrap();
        assert_eq!(reply, vec![4, 5, 6]);
    }

    #[tokio::test]
    async fn test_exchange_times_out() {
        setup();
        // Bound but never answers.
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();

        let transport = UdpTransport::new(server_addr, Duration::from_millis(50));
        match transport.exchange(&[1, 2, 3]).await {
            Err(ResolveError::Timeout(d)) => assert_eq!(d, Duration::from_millis(50)),
            other => panic!("expected a timeout, got {:?}", other),
        }
        drop(server);
    }
}
