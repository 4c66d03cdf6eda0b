//!
//! Socket level building blocks: selector constants, the network byte order address record and opening
//! listeners
//!

mod address;
pub mod family;
pub mod listener;

pub use address::{SockAddrIn, SOCKADDR_IN_LEN};
pub use listener::ServerError;
