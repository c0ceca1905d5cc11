/// Protocol parsing errors
#[derive(Debug)]
pub enum ProtocolError {
    InvalidMessage,
    InvalidUtf8(std::string::FromUtf8Error),
    UnexpectedMessage(u8),
    UnexpectedEof,
    Io(std::io::Error),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::InvalidMessage => write!(f, "invalid message"),
            ProtocolError::InvalidUtf8(e) => write!(f, "invalid UTF-8: {}", e),
            ProtocolError::UnexpectedMessage(t) => {
                write!(f, "unexpected message type: 0x{:02x}", t)
            }
            ProtocolError::UnexpectedEof => write!(f, "unexpected end of stream"),
            ProtocolError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<std::io::Error> for ProtocolError {
    fn from(e: std::io::Error) -> Self {
        ProtocolError::Io(e)
    }
}
