//!
//! Raw socket selector constants and their typed counterparts
//!
//! The raw values are taken from the platform's C headers through `libc`, so they can be handed to the
//! platform socket primitives unchanged.
//!

use std::convert::TryFrom;
use thiserror::Error;

/// Unspecified address family
pub const AF_UNSPEC: i32 = libc::AF_UNSPEC;
/// Unix domain sockets
pub const AF_UNIX: i32 = libc::AF_UNIX;
/// IPv4
pub const AF_INET: i32 = libc::AF_INET;
/// IPv6
pub const AF_INET6: i32 = libc::AF_INET6;

/// Connection oriented byte stream
pub const SOCK_STREAM: i32 = libc::SOCK_STREAM;
/// Connectionless datagrams
pub const SOCK_DGRAM: i32 = libc::SOCK_DGRAM;
/// Raw protocol interface
pub const SOCK_RAW: i32 = libc::SOCK_RAW;
/// Sequenced, reliable, connection oriented datagrams
pub const SOCK_SEQPACKET: i32 = libc::SOCK_SEQPACKET;

/// Default protocol for the chosen socket type
pub const IPPROTO_IP: i32 = libc::IPPROTO_IP;
/// Transmission control protocol
pub const IPPROTO_TCP: i32 = libc::IPPROTO_TCP;
/// User datagram protocol
pub const IPPROTO_UDP: i32 = libc::IPPROTO_UDP;

/// Bind to all local interfaces
pub const INADDR_ANY: u32 = libc::INADDR_ANY;
/// Bind to the loopback interface (127.0.0.1)
pub const INADDR_LOOPBACK: u32 = libc::INADDR_LOOPBACK;

/// Address families understood by this crate
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AddressFamily {
    /// `AF_UNSPEC`
    Unspec,
    /// `AF_UNIX`
    Unix,
    /// `AF_INET`
    Inet,
    /// `AF_INET6`
    Inet6,
}

/// Socket types understood by this crate
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SocketType {
    /// `SOCK_STREAM`
    Stream,
    /// `SOCK_DGRAM`
    Datagram,
    /// `SOCK_RAW`
    Raw,
    /// `SOCK_SEQPACKET`
    SeqPacket,
}

/// Transport protocols understood by this crate
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Protocol {
    /// `IPPROTO_IP`, i.e. let the socket type pick its default protocol
    Default,
    /// `IPPROTO_TCP`
    Tcp,
    /// `IPPROTO_UDP`
    Udp,
}

/// A raw selector value that has no typed counterpart
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("unknown socket selector {0}")]
pub struct UnknownSelector(pub i32);

impl TryFrom<i32> for AddressFamily {
    type Error = UnknownSelector;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            AF_UNSPEC => Ok(AddressFamily::Unspec),
            AF_UNIX => Ok(AddressFamily::Unix),
            AF_INET => Ok(AddressFamily::Inet),
            AF_INET6 => Ok(AddressFamily::Inet6),
            _ => Err(UnknownSelector(value)),
        }
    }
}

impl From<AddressFamily> for i32 {
    fn from(family: AddressFamily) -> Self {
        match family {
            AddressFamily::Unspec => AF_UNSPEC,
            AddressFamily::Unix => AF_UNIX,
            AddressFamily::Inet => AF_INET,
            AddressFamily::Inet6 => AF_INET6,
        }
    }
}

impl TryFrom<i32> for SocketType {
    type Error = UnknownSelector;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            SOCK_STREAM => Ok(SocketType::Stream),
            SOCK_DGRAM => Ok(SocketType::Datagram),
            SOCK_RAW => Ok(SocketType::Raw),
            SOCK_SEQPACKET => Ok(SocketType::SeqPacket),
            _ => Err(UnknownSelector(value)),
        }
    }
}

impl From<SocketType> for i32 {
    fn from(socket_type: SocketType) -> Self {
        match socket_type {
            SocketType::Stream => SOCK_STREAM,
            SocketType::Datagram => SOCK_DGRAM,
            SocketType::Raw => SOCK_RAW,
            SocketType::SeqPacket => SOCK_SEQPACKET,
        }
    }
}

impl TryFrom<i32> for Protocol {
    type Error = UnknownSelector;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            IPPROTO_IP => Ok(Protocol::Default),
            IPPROTO_TCP => Ok(Protocol::Tcp),
            IPPROTO_UDP => Ok(Protocol::Udp),
            _ => Err(UnknownSelector(value)),
        }
    }
}

impl From<Protocol> for i32 {
    fn from(protocol: Protocol) -> Self {
        match protocol {
            Protocol::Default => IPPROTO_IP,
            Protocol::Tcp => IPPROTO_TCP,
            Protocol::Udp => IPPROTO_UDP,
        }
    }
}

impl Protocol {
    /// Whether this protocol can be carried by a socket of the given type
    pub fn supports(&self, socket_type: SocketType) -> bool {
        match (self, socket_type) {
            (Protocol::Default, _) => true,
            (Protocol::Tcp, SocketType::Stream) => true,
            (Protocol::Udp, SocketType::Datagram) => true,
            // raw sockets put the protocol number into the ip header verbatim
            (_, SocketType::Raw) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_known_selectors_convert_both_ways() {
        for raw in [AF_UNSPEC, AF_UNIX, AF_INET, AF_INET6] {
            assert_eq!(i32::from(AddressFamily::try_from(raw).unwrap()), raw);
        }
        for raw in [SOCK_STREAM, SOCK_DGRAM, SOCK_RAW, SOCK_SEQPACKET] {
            assert_eq!(i32::from(SocketType::try_from(raw).unwrap()), raw);
        }
        for raw in [IPPROTO_IP, IPPROTO_TCP, IPPROTO_UDP] {
            assert_eq!(i32::from(Protocol::try_from(raw).unwrap()), raw);
        }
    }

    #[test]
    fn test_interface_sentinels() {
        assert_eq!(std::net::Ipv4Addr::from(INADDR_ANY), std::net::Ipv4Addr::UNSPECIFIED);
        assert_eq!(std::net::Ipv4Addr::from(INADDR_LOOPBACK), std::net::Ipv4Addr::LOCALHOST);
    }

    #[test]
    fn test_unknown_selector_is_rejected() {
        assert_eq!(AddressFamily::try_from(9999), Err(UnknownSelector(9999)));
        assert_eq!(SocketType::try_from(0), Err(UnknownSelector(0)));
        assert_eq!(Protocol::try_from(-1), Err(UnknownSelector(-1)));
    }

    #[test]
    fn test_protocol_socket_type_compatibility() {
        assert!(Protocol::Default.supports(SocketType::Datagram));
        assert!(Protocol::Tcp.supports(SocketType::Stream));
        assert!(Protocol::Udp.supports(SocketType::Datagram));
        assert!(Protocol::Udp.supports(SocketType::Raw));
        assert!(!Protocol::Udp.supports(SocketType::Stream));
        assert!(!Protocol::Tcp.supports(SocketType::Datagram));
        assert!(!Protocol::Tcp.supports(SocketType::SeqPacket));
    }
}
