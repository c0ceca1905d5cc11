//! PostgreSQL wire protocol implementation.
//!
//! This module implements the subset of the PostgreSQL v3.0 wire protocol
//! needed to answer standard clients like `psql`: the startup handshake and
//! the Simple Query protocol.
//!
//! ## Architecture
//!
//! ```text
//! +----------+                           +----------+
//! |  Client  |  --- FrontendMessage -->  |  Server  |
//! |  (psql)  |  <-- BackendMessage  ---  | (orchard)|
//! +----------+                           +----------+
//!               ^                   ^
//!               |   PostgresCodec   |
//!               +-------------------+
//! ```
//!
//! ## Terminology
//!
//! - **StartupFrame**: An opaque startup-phase frame (SSLRequest, StartupMessage)
//! - **FrontendMessage**: Messages from client to server (Query, Terminate)
//! - **BackendMessage**: Messages from server to client (RowDescription, DataRow, etc.)
//! - **Codec**: Framing and serialization for the wire protocol

pub mod backend;
pub mod codec;
pub mod error;
pub mod frontend;
pub mod types;

pub use backend::{BackendMessage, FieldDescription, TransactionStatus};
pub use codec::{PostgresCodec, StartupCodec};
pub use error::ProtocolError;
pub use frontend::{FrontendMessage, StartupFrame};
pub use types::{FormatCode, type_oid};
