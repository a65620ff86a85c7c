//! minihttp - a small HTTP/1.1 client and static-file server
//!
//! This crate speaks HTTP/1.1 directly over TCP sockets: the wire protocol
//! is parsed and serialized by hand on both sides. The `http` module holds
//! the protocol engines shared by client and server (URL parsing, percent
//! encoding, message types, response parsing, the blocking client); the
//! `server` module holds the file server built on top of them.

pub mod http;
pub mod server;
