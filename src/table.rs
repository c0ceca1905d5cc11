//! The fixed `apples` dataset served to every SELECT.
//!
//! There is no storage engine behind this server; the table schema and its
//! two rows are compile-time constants. The OIDs are placeholders and are
//! never resolved against a real catalog.

use crate::protocol::{FieldDescription, FormatCode, type_oid};

/// Placeholder OID for the `apples` table.
pub const TABLE_OID: i32 = 16385;

/// The two rows every SELECT returns, regardless of its predicate.
pub const ROWS: [(i32, &str); 2] = [(1, "shinano_gold"), (2, "fuji")];

/// Column metadata for the result set: `id int4, name varchar(255)`.
pub fn columns() -> Vec<FieldDescription> {
    vec![
        FieldDescription {
            name: "id".to_string(),
            table_oid: TABLE_OID,
            column_id: 1,
            type_oid: type_oid::INT4,
            type_len: 4,
            type_modifier: -1,
            format: FormatCode::Text,
        },
        FieldDescription {
            name: "name".to_string(),
            table_oid: TABLE_OID,
            column_id: 2,
            type_oid: type_oid::VARCHAR,
            type_len: -1,           // variable-width
            type_modifier: 255 + 4, // varchar(255): declared max length plus 4
            format: FormatCode::Text,
        },
    ]
}

/// Rows serialized the way DataRow carries them: every value in text form.
pub fn data_rows() -> Vec<Vec<String>> {
    ROWS.iter()
        .map(|(id, name)| vec![id.to_string(), name.to_string()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_match_declared_schema() {
        let columns = columns();
        assert_eq!(columns.len(), 2);

        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].type_oid, type_oid::INT4);
        assert_eq!(columns[0].type_len, 4);
        assert_eq!(columns[0].type_modifier, -1);

        assert_eq!(columns[1].name, "name");
        assert_eq!(columns[1].type_oid, type_oid::VARCHAR);
        assert_eq!(columns[1].type_len, -1);
        assert_eq!(columns[1].type_modifier, 259);

        for (i, column) in columns.iter().enumerate() {
            assert_eq!(column.table_oid, TABLE_OID);
            assert_eq!(column.column_id, (i + 1) as i16);
            assert_eq!(column.format, FormatCode::Text);
        }
    }

    #[test]
    fn test_data_rows_are_text_serialized() {
        let rows = data_rows();
        assert_eq!(rows, vec![vec!["1", "shinano_gold"], vec!["2", "fuji"]]);
    }
}
