use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::Decoder;

use crate::protocol::codec::{LENGTH_FIELD_SIZE, PostgresCodec, StartupCodec, take_query_text};
use crate::protocol::error::ProtocolError;

/// An opaque startup-phase frame (SSLRequest or StartupMessage).
///
/// The server denies SSL and skips authentication, so startup frames are
/// consumed whole and their contents never interpreted.
#[derive(Debug)]
pub struct StartupFrame {
    /// Frame contents, without the length field.
    pub contents: Bytes,
}

impl Decoder for StartupCodec {
    type Item = StartupFrame;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Need the length field first
        if src.len() < LENGTH_FIELD_SIZE {
            return Ok(None);
        }

        // Peek at the length (don't consume yet)
        let len = i32::from_be_bytes([src[0], src[1], src[2], src[3]]) as usize;
        if len < LENGTH_FIELD_SIZE || len > self.max_message_size {
            return Err(ProtocolError::InvalidMessage);
        }

        // Wait for the complete frame
        if src.len() < len {
            return Ok(None);
        }

        let mut frame = src.split_to(len);
        frame.advance(LENGTH_FIELD_SIZE);
        Ok(Some(StartupFrame {
            contents: frame.freeze(),
        }))
    }
}

/// Messages sent by the frontend (client) during the query phase.
#[derive(Debug)]
pub enum FrontendMessage {
    /// 'Q' - Simple query
    Query(String),
    /// 'X' - Termination
    Terminate,
}

impl FrontendMessage {
    /// Decodes a frontend message from the buffer.
    /// The buffer should contain a complete frame (length already validated).
    fn decode(src: &mut BytesMut) -> Result<Self, ProtocolError> {
        let msg_type = src.get_u8();
        let _length = src.get_i32();
        match msg_type {
            b'Q' => Ok(FrontendMessage::Query(take_query_text(src)?)),
            b'X' => Ok(FrontendMessage::Terminate),
            _ => Err(ProtocolError::UnexpectedMessage(msg_type)),
        }
    }
}

impl Decoder for PostgresCodec {
    type Item = FrontendMessage;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        // Anything other than Query or Terminate ends the session before the
        // rest of its frame is even read.
        let tag = src[0];
        if tag != b'Q' && tag != b'X' {
            return Err(ProtocolError::UnexpectedMessage(tag));
        }

        // Need type byte + length
        if src.len() < 1 + LENGTH_FIELD_SIZE {
            return Ok(None);
        }

        // Peek at the length (bytes 1-4, don't consume yet)
        let len = i32::from_be_bytes([src[1], src[2], src[3], src[4]]) as usize;
        if len < LENGTH_FIELD_SIZE || len > self.max_message_size {
            return Err(ProtocolError::InvalidMessage);
        }

        // Total frame size = 1 (type byte) + declared length
        let len = 1 + len;

        // Wait for the complete frame
        if src.len() < len {
            return Ok(None);
        }

        let mut msg_buf = src.split_to(len);
        let msg = FrontendMessage::decode(&mut msg_buf)?;
        Ok(Some(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;

    /// Helper to create a startup-phase frame with the given contents
    fn make_startup_frame(contents: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.put_i32((LENGTH_FIELD_SIZE + contents.len()) as i32);
        buf.extend_from_slice(contents);
        buf
    }

    /// Helper to create a frontend message with given type and body
    fn make_frontend_message(msg_type: u8, body: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(msg_type);
        buf.put_i32((LENGTH_FIELD_SIZE + body.len()) as i32);
        buf.extend_from_slice(body);
        buf
    }

    /// Helper to decode a StartupFrame from bytes
    fn decode_startup_frame(buf: &[u8]) -> Result<Option<StartupFrame>, ProtocolError> {
        let mut codec = StartupCodec::new();
        let mut bytes = BytesMut::from(buf);
        codec.decode(&mut bytes)
    }

    /// Helper to decode a FrontendMessage from bytes
    fn decode_frontend_message(buf: &[u8]) -> Result<Option<FrontendMessage>, ProtocolError> {
        let mut codec = PostgresCodec::new();
        let mut bytes = BytesMut::from(buf);
        codec.decode(&mut bytes)
    }

    #[test]
    fn test_read_ssl_request_as_opaque_frame() {
        // SSLRequest: length 8 + magic 80877103. Contents are not interpreted.
        let mut contents = Vec::new();
        contents.put_i32((1234 << 16) | 5679);

        let buf = make_startup_frame(&contents);
        let frame = decode_startup_frame(&buf).unwrap().unwrap();
        assert_eq!(frame.contents, contents);
    }

    #[test]
    fn test_read_empty_startup_frame() {
        // A declared length of 4 means no contents at all
        let buf = make_startup_frame(&[]);
        let frame = decode_startup_frame(&buf).unwrap().unwrap();
        assert!(frame.contents.is_empty());
    }

    #[test]
    fn test_read_startup_frame_incomplete() {
        let buf = make_startup_frame(b"user\0postgres\0\0");
        let msg = decode_startup_frame(&buf[..6]).unwrap();
        assert!(msg.is_none());
    }

    #[test]
    fn test_read_startup_frame_undersized_length() {
        let mut buf = Vec::new();
        buf.put_i32(3);
        let result = decode_startup_frame(&buf);
        assert!(matches!(result, Err(ProtocolError::InvalidMessage)));
    }

    #[test]
    fn test_read_startup_frame_oversized_length() {
        let mut buf = Vec::new();
        buf.put_i32(i32::MAX);
        let result = decode_startup_frame(&buf);
        assert!(matches!(result, Err(ProtocolError::InvalidMessage)));
    }

    #[test]
    fn test_read_eof() {
        let buf = Vec::new();
        let msg = decode_frontend_message(&buf).unwrap();
        assert!(msg.is_none());
    }

    #[test]
    fn test_read_query_message() {
        let buf = make_frontend_message(b'Q', b"SELECT 1\0");
        let msg = decode_frontend_message(&buf).unwrap().unwrap();

        let FrontendMessage::Query(q) = msg else {
            panic!("expected Query message, got {msg:?}")
        };

        assert_eq!(q, "SELECT 1");
    }

    #[test]
    fn test_read_query_message_without_terminator() {
        let buf = make_frontend_message(b'Q', b"SELECT 1");
        let msg = decode_frontend_message(&buf).unwrap().unwrap();

        let FrontendMessage::Query(q) = msg else {
            panic!("expected Query message, got {msg:?}")
        };

        assert_eq!(q, "SELECT 1");
    }

    #[test]
    fn test_read_query_message_incomplete() {
        let buf = make_frontend_message(b'Q', b"SELECT 1\0");
        let msg = decode_frontend_message(&buf[..7]).unwrap();
        assert!(msg.is_none());
    }

    #[test]
    fn test_read_terminate_message() {
        let buf = make_frontend_message(b'X', &[]);
        let msg = decode_frontend_message(&buf).unwrap().unwrap();
        assert!(matches!(msg, FrontendMessage::Terminate));
    }

    #[test]
    fn test_read_unknown_message_type() {
        // Extended-protocol Parse: rejected on the tag byte alone, without
        // waiting for the rest of the frame
        let result = decode_frontend_message(&[b'P']);
        assert!(matches!(
            result,
            Err(ProtocolError::UnexpectedMessage(b'P'))
        ));
    }

    #[test]
    fn test_read_query_message_invalid_length() {
        let mut buf = Vec::new();
        buf.push(b'Q');
        buf.put_i32(2);
        let result = decode_frontend_message(&buf);
        assert!(matches!(result, Err(ProtocolError::InvalidMessage)));
    }
}
