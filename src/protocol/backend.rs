use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;

use crate::protocol::codec::{LENGTH_FIELD_SIZE, PostgresCodec, put_cstring};
use crate::protocol::error::ProtocolError;
use crate::protocol::types::FormatCode;

/// Messages sent by the backend (server) to the client.
#[derive(Debug)]
pub enum BackendMessage {
    /// 'R' - Authentication response (AuthenticationOk)
    AuthenticationOk,
    /// 'Z' - Ready for query
    ReadyForQuery { status: TransactionStatus },
    /// 'C' - Command completion tag
    CommandComplete { tag: String },
    /// 'T' - Result set column metadata
    RowDescription { fields: Vec<FieldDescription> },
    /// 'D' - A single result row, every value in text form
    DataRow { values: Vec<String> },
}

/// Transaction status indicator for ReadyForQuery message.
#[derive(Debug, Clone, Copy)]
pub enum TransactionStatus {
    /// 'I' - Idle (not in a transaction block)
    Idle,
    /// 'T' - In a transaction block
    InTransaction,
    /// 'E' - In a failed transaction block
    Failed,
}

impl TransactionStatus {
    fn as_byte(self) -> u8 {
        match self {
            TransactionStatus::Idle => b'I',
            TransactionStatus::InTransaction => b'T',
            TransactionStatus::Failed => b'E',
        }
    }
}

/// Column metadata within a RowDescription message.
#[derive(Debug, Clone)]
pub struct FieldDescription {
    /// Column name.
    pub name: String,
    /// OID of the table the column belongs to, or 0 if none.
    pub table_oid: i32,
    /// 1-based attribute number of the column within its table.
    pub column_id: i16,
    /// OID of the column's data type (`pg_type.oid`).
    pub type_oid: i32,
    /// Data type size (`pg_type.typlen`); negative means variable-width.
    pub type_len: i16,
    /// Type modifier (`pg_attribute.atttypmod`); -1 means none.
    pub type_modifier: i32,
    /// Format of the column's values in DataRow messages.
    pub format: FormatCode,
}

impl FieldDescription {
    /// Encoded size of this field within a RowDescription body:
    /// name + NUL, then table OID (4), column id (2), type OID (4),
    /// type len (2), type modifier (4), format code (2).
    fn encoded_len(&self) -> usize {
        self.name.len() + 1 + 4 + 2 + 4 + 2 + 4 + 2
    }
}

impl Encoder<BackendMessage> for PostgresCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: BackendMessage, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        match msg {
            BackendMessage::AuthenticationOk => {
                dst.put_u8(b'R');
                dst.put_i32(8); // length
                dst.put_i32(0); // auth type 0 = Ok
            }
            BackendMessage::ReadyForQuery { status } => {
                dst.put_u8(b'Z');
                dst.put_i32(5); // length
                dst.put_u8(status.as_byte());
            }
            BackendMessage::CommandComplete { tag } => {
                dst.put_u8(b'C');
                let len = LENGTH_FIELD_SIZE + tag.len() + 1;
                dst.put_i32(len as i32);
                put_cstring(dst, &tag);
            }
            BackendMessage::RowDescription { fields } => {
                dst.put_u8(b'T');
                let body: usize = fields.iter().map(FieldDescription::encoded_len).sum();
                dst.put_i32((LENGTH_FIELD_SIZE + 2 + body) as i32);
                dst.put_i16(fields.len() as i16);
                for field in &fields {
                    put_cstring(dst, &field.name);
                    dst.put_i32(field.table_oid);
                    dst.put_i16(field.column_id);
                    dst.put_i32(field.type_oid);
                    dst.put_i16(field.type_len);
                    dst.put_i32(field.type_modifier);
                    dst.put_i16(field.format.as_i16());
                }
            }
            BackendMessage::DataRow { values } => {
                dst.put_u8(b'D');
                let body: usize = values.iter().map(|v| 4 + v.len()).sum();
                dst.put_i32((LENGTH_FIELD_SIZE + 2 + body) as i32);
                dst.put_i16(values.len() as i16);
                for value in &values {
                    dst.put_i32(value.len() as i32);
                    dst.put_slice(value.as_bytes());
                }
            }
        }
        Ok(())
    }
}
