//! TCP server for PostgreSQL-compatible connections.
//!
//! This module provides the network layer that accepts client connections
//! and manages their lifecycle using the PostgreSQL wire protocol.
//!
//! ## Architecture
//!
//! ```text
//! +--------+
//! | Server |  <- Accepts TCP connections
//! +--------+
//!      |
//!      v
//! +-----------+     +------------+
//! | Handshake | --> | Connection |  <- Simple query loop
//! +-----------+     +------------+
//! ```
//!
//! ## Terminology
//!
//! - **Server**: TCP listener that spawns connections
//! - **Handshake**: SSL denial and startup exchange
//! - **Connection**: Per-client session answering simple queries

pub mod connection;
pub mod handshake;
pub mod listener;

pub use listener::Server;
