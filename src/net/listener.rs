//!
//! Opening a listening TCP socket for a [`ServerConfig`]
//!
//! Only the socket setup is handled here. Accepting and serving connections is up to the caller, usually
//! from within the launch callback or on the returned listener.
//!

use std::convert::TryFrom;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket};

use crate::net::family::{AddressFamily, Protocol, SocketType};
use crate::server::{ConfigError, ServerConfig};

/// Errors that can occur while opening a server socket
#[derive(Debug, Error)]
pub enum ServerError {
    /// The config does not describe a valid endpoint
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The config is valid but not something a TCP listener can serve
    #[error("cannot open a tcp listener for domain {domain}, service {service}, protocol {protocol}")]
    Unsupported {
        /// the configured address family
        domain: i32,
        /// the configured socket type
        service: i32,
        /// the configured protocol
        protocol: i32,
    },

    /// A socket operation failed
    #[error("socket operation failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Check that the config describes an IPv4 stream socket carrying TCP on a port that fits into 16 bits
fn ensure_tcp(config: &ServerConfig) -> Result<(), ServerError> {
    match (
        AddressFamily::try_from(config.domain()),
        SocketType::try_from(config.service()),
        Protocol::try_from(config.protocol()),
    ) {
        (Ok(AddressFamily::Inet), Ok(SocketType::Stream), Ok(Protocol::Default | Protocol::Tcp)) => {}
        _ => {
            return Err(ServerError::Unsupported {
                domain: config.domain(),
                service: config.service(),
                protocol: config.protocol(),
            })
        }
    }

    // the address record only keeps the low 16 bits, binding it would pick an unrelated port
    if u16::try_from(config.port()).is_err() {
        return Err(ConfigError::PortOutOfRange(config.port()).into());
    }

    Ok(())
}

/// Open a TCP socket bound to the config's address record and start listening on it with the configured
/// backlog.
///
/// Must be called from within a tokio runtime.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    ensure_tcp(config)?;

    let address = SocketAddr::V4(config.address().to_socket_addr());
    let socket = TcpSocket::new_v4()?;
    socket.set_reuseaddr(true)?;
    socket.bind(address)?;

    // negative queue lengths are not representable, the kernel treats 0 as its minimum anyway
    let backlog = u32::try_from(config.backlog()).unwrap_or(0);
    let listener = socket.listen(backlog)?;
    debug!("Listening on {} with backlog {}", address, backlog);

    Ok(listener)
}

/// Open the listener for `config`, then run its launch callback.
///
/// The listener is handed back to the caller which owns the accept loop.
pub async fn serve(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    let listener = bind(config).await?;
    info!("Started tcp server on {}", listener.local_addr()?);

    config.launch();
    Ok(listener)
}
