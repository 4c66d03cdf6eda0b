//!
//! Parameters for creating a network server endpoint, packed into a value object together with the
//! network byte order address record that is handed to the socket binding primitives
//!

#![warn(missing_docs)]

#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod net;
pub mod server;
