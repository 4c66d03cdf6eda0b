//!
//! The value object that holds everything needed to later open a listening socket
//!

use std::convert::TryFrom;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use super::{ConfigError, LaunchRef};
use crate::net::family::{AddressFamily, Protocol, SocketType};
use crate::net::SockAddrIn;

/// Parameters of a network server endpoint together with the derived network byte order address record.
///
/// A `ServerConfig` is immutable once constructed. The [`address`](ServerConfig::address) record is
/// computed from domain, port and interface exactly once inside the constructor and can not be set on
/// its own.
///
/// ## Equality
/// Two configs are equal when all of their parameters are equal and they refer to the very same launch
/// callback. Clones therefore compare equal to their original.
#[derive(Clone)]
pub struct ServerConfig {
    domain: i32,
    service: i32,
    protocol: i32,
    interface: u32,
    port: i32,
    backlog: i32,
    address: SockAddrIn,
    launch: LaunchRef,
}

impl ServerConfig {
    /// Create a new config from raw socket parameters.
    ///
    /// `interface` and `port` are expected in host byte order. No validation is done on any of the
    /// parameters, use [`try_new`](ServerConfig::try_new) for that.
    pub fn new(
        domain: i32,
        service: i32,
        protocol: i32,
        interface: u32,
        port: i32,
        backlog: i32,
        launch: LaunchRef,
    ) -> Self {
        Self {
            domain,
            service,
            protocol,
            interface,
            port,
            backlog,
            address: SockAddrIn::from_host_order(domain, port, interface),
            launch,
        }
    }

    /// Create a new config after checking that the parameters describe an IPv4 endpoint that a socket
    /// could actually be opened for
    pub fn try_new(
        domain: i32,
        service: i32,
        protocol: i32,
        interface: u32,
        port: i32,
        backlog: i32,
        launch: LaunchRef,
    ) -> Result<Self, ConfigError> {
        let family = AddressFamily::try_from(domain).map_err(|e| ConfigError::UnknownFamily(e.0))?;
        let socket_type = SocketType::try_from(service).map_err(|e| ConfigError::UnknownSocketType(e.0))?;
        let transport = Protocol::try_from(protocol).map_err(|e| ConfigError::UnknownProtocol(e.0))?;

        if !transport.supports(socket_type) {
            return Err(ConfigError::ProtocolMismatch {
                protocol: transport,
                socket_type,
            });
        }
        if family != AddressFamily::Inet {
            return Err(ConfigError::UnsupportedFamily(family));
        }
        if u16::try_from(port).is_err() {
            return Err(ConfigError::PortOutOfRange(port));
        }
        if backlog < 0 {
            return Err(ConfigError::InvalidBacklog(backlog));
        }

        Ok(Self::new(domain, service, protocol, interface, port, backlog, launch))
    }

    /// Address family selector
    pub fn domain(&self) -> i32 {
        self.domain
    }

    /// Socket type selector
    pub fn service(&self) -> i32 {
        self.service
    }

    /// Transport protocol selector
    pub fn protocol(&self) -> i32 {
        self.protocol
    }

    /// Bind address in host byte order
    pub fn interface(&self) -> u32 {
        self.interface
    }

    /// Bind port in host byte order
    pub fn port(&self) -> i32 {
        self.port
    }

    /// Maximum length of the pending connection queue
    pub fn backlog(&self) -> i32 {
        self.backlog
    }

    /// The derived network byte order address record
    pub fn address(&self) -> &SockAddrIn {
        &self.address
    }

    /// The stored launch callback
    pub fn launcher(&self) -> &LaunchRef {
        &self.launch
    }

    /// Invoke the stored launch callback
    pub fn launch(&self) {
        self.launch.launch()
    }
}

impl PartialEq for ServerConfig {
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain
            && self.service == other.service
            && self.protocol == other.protocol
            && self.interface == other.interface
            && self.port == other.port
            && self.backlog == other.backlog
            && self.address == other.address
            && Arc::ptr_eq(&self.launch, &other.launch)
    }
}

impl Eq for ServerConfig {}

impl Debug for ServerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("domain", &self.domain)
            .field("service", &self.service)
            .field("protocol", &self.protocol)
            .field("interface", &self.interface)
            .field("port", &self.port)
            .field("backlog", &self.backlog)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
