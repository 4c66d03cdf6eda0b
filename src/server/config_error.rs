use crate::net::family::{AddressFamily, Protocol, SocketType};
use thiserror::Error;

/// Reasons why a set of server parameters does not describe a usable endpoint
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// The domain is not a known address family
    #[error("unknown address family {0}")]
    UnknownFamily(i32),

    /// The service is not a known socket type
    #[error("unknown socket type {0}")]
    UnknownSocketType(i32),

    /// The protocol number is not a known protocol
    #[error("unknown protocol {0}")]
    UnknownProtocol(i32),

    /// The protocol cannot be carried by the socket type
    #[error("protocol {protocol:?} cannot be used with socket type {socket_type:?}")]
    ProtocolMismatch {
        /// the requested protocol
        protocol: Protocol,
        /// the requested socket type
        socket_type: SocketType,
    },

    /// The address record only describes IPv4 endpoints
    #[error("address family {0:?} cannot be bound to an IPv4 socket address")]
    UnsupportedFamily(AddressFamily),

    /// The port does not fit into 16 bits
    #[error("port {0} is not within 0..=65535")]
    PortOutOfRange(i32),

    /// Listen queues cannot have a negative length
    #[error("backlog {0} must not be negative")]
    InvalidBacklog(i32),
}
