//! PostgreSQL statement builders and COPY text encoding

use crate::core::transform::{CellValue, TableSchema};
use pg_escape::quote_identifier;
use std::io::Write;

/// Table holding one checkpoint row per source
pub const CHECKPOINT_TABLE: &str = "sync_checkpoints";

/// `"schema"."table"`
pub fn qualified_name(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_identifier(schema), quote_identifier(table))
}

/// `CREATE TABLE IF NOT EXISTS` for a destination table
pub fn create_table_sql(schema: &str, table: &TableSchema) -> String {
    let columns = table
        .columns
        .iter()
        .map(|c| format!("{} {}", quote_identifier(c.name), c.kind.sql_type()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        qualified_name(schema, &table.name),
        columns
    )
}

/// `COPY ... FROM STDIN` for a destination table
pub fn copy_in_sql(schema: &str, table: &TableSchema) -> String {
    let columns = table
        .columns
        .iter()
        .map(|c| quote_identifier(c.name).into_owned())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "COPY {} ({}) FROM STDIN WITH (FORMAT text)",
        qualified_name(schema, &table.name),
        columns
    )
}

/// `CREATE TABLE IF NOT EXISTS` for the checkpoint table
pub fn create_checkpoint_table_sql(schema: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\
         source TEXT PRIMARY KEY, \
         sequence_number BIGINT NOT NULL, \
         updated_at TIMESTAMPTZ NOT NULL DEFAULT now())",
        qualified_name(schema, CHECKPOINT_TABLE)
    )
}

/// Upsert of one checkpoint row (`$1` source, `$2` sequence number)
pub fn upsert_checkpoint_sql(schema: &str) -> String {
    format!(
        "INSERT INTO {} (source, sequence_number, updated_at) VALUES ($1, $2, now()) \
         ON CONFLICT (source) DO UPDATE SET \
         sequence_number = EXCLUDED.sequence_number, updated_at = EXCLUDED.updated_at",
        qualified_name(schema, CHECKPOINT_TABLE)
    )
}

/// Select of one checkpoint row (`$1` source)
pub fn select_checkpoint_sql(schema: &str) -> String {
    format!(
        "SELECT sequence_number FROM {} WHERE source = $1",
        qualified_name(schema, CHECKPOINT_TABLE)
    )
}

/// Append one row in COPY text format, newline terminated
pub fn encode_copy_row(buf: &mut Vec<u8>, row: &[CellValue]) {
    for (pos, cell) in row.iter().enumerate() {
        if pos > 0 {
            buf.push(b'\t');
        }
        encode_copy_value(buf, cell);
    }
    buf.push(b'\n');
}

fn encode_copy_value(buf: &mut Vec<u8>, cell: &CellValue) {
    match cell {
        CellValue::Null => buf.extend_from_slice(b"\\N"),
        CellValue::Timestamp(ts) => {
            let _ = write!(buf, "{}", ts.format("%Y-%m-%d %H:%M:%S%.f+00"));
        }
        CellValue::Date(date) => {
            let _ = write!(buf, "{}", date.format("%Y-%m-%d"));
        }
        CellValue::Integer(v) => {
            let _ = write!(buf, "{v}");
        }
        CellValue::Float(v) => {
            let _ = write!(buf, "{v}");
        }
        CellValue::Text(text) => {
            // escape backslash, tab, newline, CR; strip null bytes
            for byte in text.bytes() {
                match byte {
                    b'\\' => buf.extend_from_slice(b"\\\\"),
                    b'\t' => buf.extend_from_slice(b"\\t"),
                    b'\n' => buf.extend_from_slice(b"\\n"),
                    b'\r' => buf.extend_from_slice(b"\\r"),
                    0 => {}
                    _ => buf.push(byte),
                }
            }
        }
    }
}
