use bytes::{BufMut, BytesMut};

use crate::protocol::ProtocolError;

/// Maximum message size in bytes (16 MB).
/// PostgreSQL allows up to 1 GB, but nothing this server exchanges comes close.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Size of the length field itself. A frame's declared length counts its
/// contents plus these four bytes.
pub const LENGTH_FIELD_SIZE: usize = 4;

/// Write a null-terminated string to a BytesMut buffer.
pub fn put_cstring(dst: &mut BytesMut, s: &str) {
    dst.put_slice(s.as_bytes());
    dst.put_u8(0);
}

/// Extract query text from a simple-query frame's contents.
///
/// Everything from the first null byte onward is dropped; clients terminate
/// the SQL string with a null, but a missing terminator is tolerated.
pub fn take_query_text(contents: &[u8]) -> Result<String, ProtocolError> {
    let end = contents
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(contents.len());
    String::from_utf8(contents[..end].to_vec()).map_err(ProtocolError::InvalidUtf8)
}

/// Codec for the query phase of the PostgreSQL protocol.
/// Encodes BackendMessage (in backend.rs) and decodes FrontendMessage (in frontend.rs).
pub struct PostgresCodec {
    pub(crate) max_message_size: usize,
}

impl PostgresCodec {
    /// Creates a new PostgresCodec with the default maximum message size.
    pub fn new() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl Default for PostgresCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Codec for the startup phase of the PostgreSQL protocol.
/// Decodes raw StartupFrame only; the server discards startup contents
/// without interpreting them.
pub struct StartupCodec {
    pub(crate) max_message_size: usize,
}

impl StartupCodec {
    /// Creates a new StartupCodec with the default maximum message size.
    pub fn new() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }

    /// Transitions to the query phase codec after successful startup.
    pub fn ready(self) -> PostgresCodec {
        PostgresCodec {
            max_message_size: self.max_message_size,
        }
    }
}

impl Default for StartupCodec {
    fn default() -> Self {
        Self::new()
    }
}
