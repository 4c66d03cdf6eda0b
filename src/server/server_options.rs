use std::net::SocketAddrV4;

use super::{ConfigError, LaunchRef, ServerConfig};
use crate::net::family::{AF_INET, INADDR_LOOPBACK, IPPROTO_IP, SOCK_STREAM};

/// Configuration options which specify in detail on which endpoint a server should listen.
///
/// Options are plain data and can be freely modified, they only turn into an immutable [`ServerConfig`]
/// through [`build`](ServerOptions::build).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ServerOptions {
    /// Address family selector
    pub domain: i32,
    /// Socket type selector
    pub service: i32,
    /// Transport protocol selector
    pub protocol: i32,
    /// Bind address in host byte order
    pub interface: u32,
    /// Bind port in host byte order
    pub port: i32,
    /// Maximum length of the pending connection queue
    pub backlog: i32,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            domain: AF_INET,
            service: SOCK_STREAM,
            protocol: IPPROTO_IP,
            interface: INADDR_LOOPBACK,
            port: 1234,
            backlog: 128,
        }
    }
}

impl ServerOptions {
    /// Set the address family
    #[must_use]
    pub fn domain(mut self, domain: i32) -> Self {
        self.domain = domain;
        self
    }

    /// Set the socket type
    #[must_use]
    pub fn service(mut self, service: i32) -> Self {
        self.service = service;
        self
    }

    /// Set the transport protocol
    #[must_use]
    pub fn protocol(mut self, protocol: i32) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set the bind address (host byte order)
    #[must_use]
    pub fn interface(mut self, interface: u32) -> Self {
        self.interface = interface;
        self
    }

    /// Set the bind port (host byte order)
    #[must_use]
    pub fn port(mut self, port: i32) -> Self {
        self.port = port;
        self
    }

    /// Set the backlog
    #[must_use]
    pub fn backlog(mut self, backlog: i32) -> Self {
        self.backlog = backlog;
        self
    }

    /// Set interface and port from a std socket address
    #[must_use]
    pub fn listen_address(mut self, address: SocketAddrV4) -> Self {
        self.interface = u32::from(*address.ip());
        self.port = i32::from(address.port());
        self
    }

    /// Validate the options and turn them into a [`ServerConfig`] that runs `launch` when started
    pub fn build(&self, launch: LaunchRef) -> Result<ServerConfig, ConfigError> {
        ServerConfig::try_new(
            self.domain,
            self.service,
            self.protocol,
            self.interface,
            self.port,
            self.backlog,
            launch,
        )
    }
}

impl From<&ServerConfig> for ServerOptions {
    fn from(config: &ServerConfig) -> Self {
        Self {
            domain: config.domain(),
            service: config.service(),
            protocol: config.protocol(),
            interface: config.interface(),
            port: config.port(),
            backlog: config.backlog(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::net::family::{INADDR_ANY, IPPROTO_UDP, SOCK_DGRAM};
    use std::net::Ipv4Addr;
    use std::sync::Arc;

    #[test]
    fn test_defaults_build_a_loopback_config() {
        let config = ServerOptions::default().build(Arc::new(|| {})).unwrap();
        assert_eq!(config.address().to_socket_addr(), SocketAddrV4::new(Ipv4Addr::LOCALHOST, 1234));
        assert_eq!(config.backlog(), 128);
    }

    #[test]
    fn test_setters_are_applied() {
        let options = ServerOptions::default()
            .service(SOCK_DGRAM)
            .protocol(IPPROTO_UDP)
            .interface(INADDR_ANY)
            .port(5353)
            .backlog(0);
        let config = options.build(Arc::new(|| {})).unwrap();

        assert_eq!(config.service(), SOCK_DGRAM);
        assert_eq!(config.protocol(), IPPROTO_UDP);
        assert_eq!(config.address().addr_bytes(), [0, 0, 0, 0]);
        assert_eq!(config.address().port_bytes(), [0x14, 0xe9]);
        assert_eq!(ServerOptions::from(&config), options);
    }

    #[test]
    fn test_listen_address_sets_interface_and_port() {
        let address = SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 8080);
        let options = ServerOptions::default().listen_address(address);
        assert_eq!(options.interface, 0x0a00_0001);
        assert_eq!(options.port, 8080);
    }

    #[test]
    fn test_build_propagates_validation_errors() {
        let result = ServerOptions::default().domain(1).build(Arc::new(|| {}));
        assert!(matches!(result, Err(ConfigError::UnsupportedFamily(_))));

        let result = ServerOptions::default().port(70000).build(Arc::new(|| {}));
        assert_eq!(result.unwrap_err(), ConfigError::PortOutOfRange(70000));
    }
}
