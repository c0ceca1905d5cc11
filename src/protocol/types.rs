/// Format code for result values in the PostgreSQL protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i16)]
pub enum FormatCode {
    /// Text format (0)
    #[default]
    Text = 0,
    /// Binary format (1)
    Binary = 1,
}

impl FormatCode {
    /// Converts the FormatCode to an i16 value.
    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

/// Well-known `pg_type` OIDs used in RowDescription messages.
/// See: https://www.postgresql.org/docs/current/catalog-pg-type.html
pub mod type_oid {
    /// `int4`, a 4-byte signed integer.
    pub const INT4: i32 = 23;
    /// `varchar`, a variable-length character string.
    pub const VARCHAR: i32 = 1043;
}
