//! Synchronous MySQL client wrapper.
//!
//! Thin seam around the `mysql` crate: connect, prepare, execute. Result
//! rows are buffered up front (store-result semantics) so the row count
//! is known before materialization begins, and the buffered cursor feeds
//! the materializer through the `ResultCursor` trait.

use mysql::consts::ColumnType;
use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder, Params, Row, Value};

use crate::binder::{BoundParameters, BoundValue};
use crate::config::BatchConfig;
use crate::error::Result;
use crate::materialize::{ColumnMeta, RawValue, ResultCursor};
use crate::types::{FieldKind, TemporalValue};

/// An open connection to the database server
pub struct Client {
    conn: Conn,
}

/// A server-side prepared statement handle
pub struct PreparedStatement {
    inner: mysql::Statement,
}

impl PreparedStatement {
    /// Number of `?` placeholders the server counted at prepare time
    pub fn placeholder_count(&self) -> usize {
        self.inner.num_params() as usize
    }
}

/// One execution's outcome: the affected-row count, plus a result
/// cursor when the statement produced column-shaped output.
pub struct ExecOutcome {
    pub affected: u64,
    pub cursor: Option<BufferedCursor>,
}

/// A fully buffered result set implementing `ResultCursor`
pub struct BufferedCursor {
    columns: Vec<ColumnMeta>,
    declared: u64,
    rows: std::vec::IntoIter<Vec<RawValue>>,
}

impl ResultCursor for BufferedCursor {
    fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    fn row_count(&self) -> u64 {
        self.declared
    }

    fn next_row(&mut self) -> Result<Option<Vec<RawValue>>> {
        Ok(self.rows.next())
    }
}

impl Client {
    /// Connect using the batch file's connection descriptor
    pub fn connect(config: &BatchConfig) -> Result<Client> {
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(config.host.clone()))
            .tcp_port(config.port)
            .user(Some(config.user.clone()))
            .pass(Some(config.password.clone()))
            .db_name(Some(config.database.clone()));
        let conn = Conn::new(opts)?;
        tracing::info!(host = %config.host, port = config.port, "connected to database");
        Ok(Client { conn })
    }

    pub fn prepare(&mut self, sql: &str) -> Result<PreparedStatement> {
        let inner = self.conn.prep(sql)?;
        tracing::debug!(placeholders = inner.num_params(), "statement prepared");
        Ok(PreparedStatement { inner })
    }

    /// Execute a prepared statement against one bound parameter set
    pub fn execute(
        &mut self,
        stmt: &PreparedStatement,
        bound: &BoundParameters,
    ) -> Result<ExecOutcome> {
        let rows: Vec<Row> = self.conn.exec(&stmt.inner, to_params(bound))?;
        let affected = self.conn.affected_rows();

        if stmt.inner.num_columns() == 0 {
            return Ok(ExecOutcome {
                affected,
                cursor: None,
            });
        }

        let columns: Vec<ColumnMeta> = match rows.first() {
            Some(row) => row.columns_ref().iter().map(column_meta).collect(),
            // Empty set: headers are never rendered, only the message
            None => Vec::new(),
        };

        let mut raw_rows = Vec::with_capacity(rows.len());
        for mut row in rows {
            let mut raw = Vec::with_capacity(columns.len());
            for index in 0..columns.len() {
                let value: Value = row.take(index).unwrap_or(Value::NULL);
                raw.push(raw_value(value));
            }
            raw_rows.push(raw);
        }

        let declared = raw_rows.len() as u64;
        Ok(ExecOutcome {
            affected,
            cursor: Some(BufferedCursor {
                columns,
                declared,
                rows: raw_rows.into_iter(),
            }),
        })
    }
}

fn to_params(bound: &BoundParameters) -> Params {
    if bound.is_empty() {
        return Params::Empty;
    }
    Params::Positional(bound.values().iter().map(wire_value).collect())
}

fn wire_value(value: &BoundValue) -> Value {
    match value {
        BoundValue::Tiny(v) => Value::Int(i64::from(*v)),
        BoundValue::Small(v) => Value::Int(i64::from(*v)),
        BoundValue::Int(v) => Value::Int(i64::from(*v)),
        BoundValue::Big(v) => Value::Int(*v),
        BoundValue::UnsignedTiny(v) => Value::UInt(u64::from(*v)),
        BoundValue::UnsignedSmall(v) => Value::UInt(u64::from(*v)),
        BoundValue::UnsignedInt(v) => Value::UInt(u64::from(*v)),
        BoundValue::UnsignedBig(v) => Value::UInt(*v),
        BoundValue::Float(v) => Value::Float(*v),
        BoundValue::Double(v) => Value::Double(*v),
        BoundValue::Temporal(FieldKind::Time, t) => {
            Value::Time(false, 0, t.hour as u8, t.minute as u8, t.second as u8, 0)
        }
        BoundValue::Temporal(_, t) => Value::Date(
            t.year as u16,
            t.month as u8,
            t.day as u8,
            t.hour as u8,
            t.minute as u8,
            t.second as u8,
            0,
        ),
        BoundValue::Text(bytes) => Value::Bytes(bytes.clone()),
        BoundValue::Null => Value::NULL,
    }
}

fn column_meta(column: &mysql::Column) -> ColumnMeta {
    let column_type = column.column_type();
    ColumnMeta {
        name: column.name_str().into_owned(),
        kind: field_kind_of(column_type),
        code: column_type as u8,
    }
}

/// Map a protocol column type to the abstract field kind. Year columns
/// print like short integers and the decimal/text/binary family all
/// share the trimmed-string rendering; anything unmapped keeps its raw
/// code for the placeholder text.
fn field_kind_of(column_type: ColumnType) -> FieldKind {
    match column_type {
        ColumnType::MYSQL_TYPE_TINY => FieldKind::TinyInt,
        ColumnType::MYSQL_TYPE_SHORT | ColumnType::MYSQL_TYPE_YEAR => FieldKind::SmallInt,
        ColumnType::MYSQL_TYPE_LONG | ColumnType::MYSQL_TYPE_INT24 => FieldKind::Int,
        ColumnType::MYSQL_TYPE_LONGLONG => FieldKind::BigInt,
        ColumnType::MYSQL_TYPE_FLOAT => FieldKind::Float,
        ColumnType::MYSQL_TYPE_DOUBLE => FieldKind::Double,
        ColumnType::MYSQL_TYPE_TIME => FieldKind::Time,
        ColumnType::MYSQL_TYPE_DATE => FieldKind::Date,
        ColumnType::MYSQL_TYPE_DATETIME => FieldKind::DateTime,
        ColumnType::MYSQL_TYPE_TIMESTAMP => FieldKind::Timestamp,
        ColumnType::MYSQL_TYPE_STRING
        | ColumnType::MYSQL_TYPE_VAR_STRING
        | ColumnType::MYSQL_TYPE_VARCHAR
        | ColumnType::MYSQL_TYPE_DECIMAL
        | ColumnType::MYSQL_TYPE_NEWDECIMAL
        | ColumnType::MYSQL_TYPE_TINY_BLOB
        | ColumnType::MYSQL_TYPE_BLOB
        | ColumnType::MYSQL_TYPE_MEDIUM_BLOB
        | ColumnType::MYSQL_TYPE_LONG_BLOB
        | ColumnType::MYSQL_TYPE_BIT
        | ColumnType::MYSQL_TYPE_ENUM
        | ColumnType::MYSQL_TYPE_SET
        | ColumnType::MYSQL_TYPE_JSON => FieldKind::StringOrBlob,
        _ => FieldKind::Null,
    }
}

fn raw_value(value: Value) -> RawValue {
    match value {
        Value::NULL => RawValue::Null,
        Value::Int(v) => RawValue::Int(v),
        Value::UInt(v) => RawValue::UInt(v),
        Value::Float(v) => RawValue::Float(v),
        Value::Double(v) => RawValue::Double(v),
        Value::Bytes(bytes) => RawValue::Bytes(bytes),
        Value::Date(year, month, day, hour, minute, second, _micros) => {
            RawValue::Temporal(TemporalValue {
                year: u32::from(year),
                month: u32::from(month),
                day: u32::from(day),
                hour: u32::from(hour),
                minute: u32::from(minute),
                second: u32::from(second),
            })
        }
        Value::Time(_negative, days, hours, minutes, seconds, _micros) => {
            RawValue::Temporal(TemporalValue {
                year: 0,
                month: 0,
                day: 0,
                hour: days * 24 + u32::from(hours),
                minute: u32::from(minutes),
                second: u32::from(seconds),
            })
        }
    }
}
