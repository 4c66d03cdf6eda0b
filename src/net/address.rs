//!
//! The IPv4 socket address record in the exact shape the platform socket primitives expect
//!
//! Port and address are kept in network byte order, so their in-memory bytes are big-endian no matter
//! which architecture the program runs on. The encoded form is the platform's own `libc::sockaddr_in`,
//! including the leading `sin_len` byte on the BSDs and macOS.
//!

use byteorder::{ByteOrder, NetworkEndian};
use bytes::Bytes;
use std::fmt::{Display, Formatter};
use std::mem;
use std::net::{Ipv4Addr, SocketAddrV4};

/// Size of an encoded `sockaddr_in` record
pub const SOCKADDR_IN_LEN: usize = mem::size_of::<libc::sockaddr_in>();

/// Network address record derived from an address family, a host order port and a host order interface
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SockAddrIn {
    family: i32,
    /// port in network byte order
    port: u16,
    /// interface address in network byte order
    addr: u32,
}

impl SockAddrIn {
    /// Build the record by converting `port` and `interface` from host to network byte order.
    ///
    /// The port is treated as a 16-bit quantity, higher bits are dropped.
    pub fn from_host_order(family: i32, port: i32, interface: u32) -> Self {
        Self {
            family,
            port: (port as u16).to_be(),
            addr: interface.to_be(),
        }
    }

    /// The address family the record is tagged with
    pub fn family(&self) -> i32 {
        self.family
    }

    /// The port as stored, i.e. in network byte order
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The interface address as stored, i.e. in network byte order
    pub fn addr(&self) -> u32 {
        self.addr
    }

    /// In-memory bytes of the stored port
    pub fn port_bytes(&self) -> [u8; 2] {
        self.port.to_ne_bytes()
    }

    /// In-memory bytes of the stored interface address
    pub fn addr_bytes(&self) -> [u8; 4] {
        self.addr.to_ne_bytes()
    }

    /// The port converted back into host byte order
    pub fn host_port(&self) -> u16 {
        NetworkEndian::read_u16(&self.port_bytes())
    }

    /// The interface address converted back into host byte order
    pub fn host_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.addr_bytes())
    }

    /// A std socket address pointing at the same interface and port
    pub fn to_socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.host_addr(), self.host_port())
    }

    /// The record as the platform's `sockaddr_in`.
    ///
    /// The family is narrowed to `sa_family_t`, which is 16 bits wide on Linux and 8 bits on the BSDs.
    pub fn to_sockaddr_in(&self) -> libc::sockaddr_in {
        // SAFETY: sockaddr_in is a plain C struct for which all zero bytes are a valid value
        let mut raw: libc::sockaddr_in = unsafe { mem::zeroed() };
        #[cfg(any(
            target_os = "macos",
            target_os = "ios",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly"
        ))]
        {
            raw.sin_len = SOCKADDR_IN_LEN as u8;
        }
        raw.sin_family = self.family as libc::sa_family_t;
        raw.sin_port = self.port;
        raw.sin_addr = libc::in_addr { s_addr: self.addr };
        raw
    }

    /// Encode the record into the platform's `sockaddr_in` memory layout
    pub fn to_bytes(&self) -> Bytes {
        let raw = self.to_sockaddr_in();
        // SAFETY: raw is a live, fully initialized sockaddr_in without interior padding
        let bytes = unsafe {
            std::slice::from_raw_parts((&raw as *const libc::sockaddr_in).cast::<u8>(), SOCKADDR_IN_LEN)
        };
        Bytes::copy_from_slice(bytes)
    }

    /// Decode a record from the platform's `sockaddr_in` memory layout.
    ///
    /// Returns `None` when fewer than [`SOCKADDR_IN_LEN`] bytes are given. The family comes back as the
    /// unsigned `sa_family_t` value, so a record built from a negative or oversized family does not
    /// decode to an equal one.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < SOCKADDR_IN_LEN {
            return None;
        }

        // SAFETY: the length was checked above and read_unaligned has no alignment requirement
        let raw: libc::sockaddr_in = unsafe { std::ptr::read_unaligned(data.as_ptr().cast()) };
        Some(Self {
            family: i32::from(raw.sin_family),
            port: raw.sin_port,
            addr: raw.sin_addr.s_addr,
        })
    }
}

impl Display for SockAddrIn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (family {})", self.to_socket_addr(), self.family)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::net::family::{AF_INET, INADDR_ANY, INADDR_LOOPBACK};

    #[test]
    fn test_port_8080_is_stored_big_endian() {
        let record = SockAddrIn::from_host_order(AF_INET, 8080, INADDR_ANY);
        assert_eq!(record.port_bytes(), [0x1f, 0x90]);
        assert_eq!(record.addr_bytes(), [0, 0, 0, 0]);
        assert_eq!(record.host_port(), 8080);
    }

    #[test]
    fn test_loopback_is_stored_big_endian() {
        let record = SockAddrIn::from_host_order(AF_INET, 1234, INADDR_LOOPBACK);
        assert_eq!(record.addr_bytes(), [127, 0, 0, 1]);
        assert_eq!(record.to_socket_addr(), "127.0.0.1:1234".parse().unwrap());
    }

    #[test]
    fn test_port_is_truncated_to_16_bits() {
        let record = SockAddrIn::from_host_order(AF_INET, 0x0001_0050, INADDR_ANY);
        assert_eq!(record.host_port(), 80);
    }

    #[test]
    fn test_sockaddr_in_fields() {
        let raw = SockAddrIn::from_host_order(AF_INET, 8080, INADDR_LOOPBACK).to_sockaddr_in();
        assert_eq!(raw.sin_family, AF_INET as libc::sa_family_t);
        assert_eq!(raw.sin_port, 8080u16.to_be());
        assert_eq!(raw.sin_addr.s_addr, INADDR_LOOPBACK.to_be());
        assert_eq!(raw.sin_zero, [0; 8]);
    }

    #[test]
    fn test_encoding_matches_libc_sockaddr_in() {
        let record = SockAddrIn::from_host_order(AF_INET, 8080, INADDR_LOOPBACK);
        let encoded = record.to_bytes();
        assert_eq!(encoded.len(), mem::size_of::<libc::sockaddr_in>());

        // read the bytes back as the platform struct and check every field
        let raw: libc::sockaddr_in = unsafe { std::ptr::read_unaligned(encoded.as_ptr().cast()) };
        assert_eq!(i32::from(raw.sin_family), AF_INET);
        assert_eq!(raw.sin_port.to_ne_bytes(), [0x1f, 0x90]);
        assert_eq!(raw.sin_addr.s_addr.to_ne_bytes(), [127, 0, 0, 1]);
        assert_eq!(raw.sin_zero, [0; 8]);

        assert_eq!(SockAddrIn::from_bytes(&encoded), Some(record));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_encoded_layout() {
        let encoded = SockAddrIn::from_host_order(AF_INET, 8080, INADDR_LOOPBACK).to_bytes();
        assert_eq!(&encoded[0..2], &(AF_INET as u16).to_ne_bytes());
        assert_eq!(&encoded[2..4], &[0x1f, 0x90]);
        assert_eq!(&encoded[4..8], &[127, 0, 0, 1]);
        assert!(encoded[8..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_decoding_short_buffer_fails() {
        assert_eq!(SockAddrIn::from_bytes(&[0u8; 8]), None);
    }

    quickcheck! {
        fn test_stored_values_are_network_order(family: i32, port: i32, interface: u32) -> bool {
            let record = SockAddrIn::from_host_order(family, port, interface);
            record.family() == family
                && record.port_bytes() == (port as u16).to_be_bytes()
                && record.addr_bytes() == interface.to_be_bytes()
        }
    }
}
