//! Result materialization.
//!
//! Turns a protocol result cursor into a fully stringified grid. The
//! grid tracks a running maximum display width per column — header
//! included from the start — which later drives the boxed table layout.
//!
//! The cursor is a trait so the engine can be driven by the live client
//! or by an in-memory fake in tests.

use crate::error::{Error, Result};
use crate::types::{FieldKind, TemporalValue};

/// Column metadata as reported by the protocol
#[derive(Debug, Clone)]
pub struct ColumnMeta {
    pub name: String,
    pub kind: FieldKind,
    /// Raw protocol type code, kept for the unknown-kind placeholder
    pub code: u8,
}

/// A raw column value as decoded from the wire
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Int(i64),
    UInt(u64),
    Float(f32),
    Double(f64),
    Temporal(TemporalValue),
    Bytes(Vec<u8>),
    Null,
}

/// A column-shaped result source: metadata, the row count the server
/// reported up front, and row-by-row fetch.
pub trait ResultCursor {
    fn columns(&self) -> &[ColumnMeta];
    fn row_count(&self) -> u64;
    fn next_row(&mut self) -> Result<Option<Vec<RawValue>>>;
}

/// Result column with its running display width
#[derive(Debug, Clone)]
pub struct ResultColumn {
    pub name: String,
    pub kind: FieldKind,
    pub code: u8,
    /// Max of the header length and every rendered value length seen
    pub display_width: usize,
}

/// The fully stringified form of one executed statement's result.
/// Rebuilt from scratch per execution; owned by the caller and dropped
/// once rendered.
#[derive(Debug, Clone)]
pub struct ResultGrid {
    pub columns: Vec<ResultColumn>,
    pub rows: Vec<Vec<String>>,
}

impl ResultGrid {
    /// Drain a cursor into a grid. Fails with `RowCountMismatch` when
    /// the cursor yields more rows than it declared, and propagates
    /// protocol fetch errors.
    pub fn materialize<C: ResultCursor>(cursor: &mut C) -> Result<ResultGrid> {
        let mut columns: Vec<ResultColumn> = cursor
            .columns()
            .iter()
            .map(|meta| ResultColumn {
                name: meta.name.clone(),
                kind: meta.kind,
                code: meta.code,
                display_width: meta.name.len(),
            })
            .collect();

        let expected = cursor.row_count();
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(expected as usize);
        while let Some(raw) = cursor.next_row()? {
            let fetched = rows.len() as u64 + 1;
            if fetched > expected {
                return Err(Error::RowCountMismatch { expected, fetched });
            }
            let mut row = Vec::with_capacity(columns.len());
            for (column, value) in columns.iter_mut().zip(raw) {
                let cell = render_cell(column, &value);
                if cell.len() > column.display_width {
                    column.display_width = cell.len();
                }
                row.push(cell);
            }
            rows.push(row);
        }

        Ok(ResultGrid { columns, rows })
    }

    pub fn row_count(&self) -> u64 {
        self.rows.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Convert one raw value to its display string according to the
/// column's field kind.
fn render_cell(column: &ResultColumn, value: &RawValue) -> String {
    match column.kind {
        // Tiny integers carry their byte as a character code
        FieldKind::TinyInt => match value {
            RawValue::Null => String::new(),
            other => ((as_i64(other) as u8) as char).to_string(),
        },
        FieldKind::SmallInt | FieldKind::Int | FieldKind::BigInt => match value {
            RawValue::UInt(v) => v.to_string(),
            other => as_i64(other).to_string(),
        },
        FieldKind::Float | FieldKind::Double => format!("{:.2}", as_f64(value)),
        FieldKind::Time => as_temporal(value).format_time(),
        FieldKind::Date => as_temporal(value).format_date(),
        FieldKind::DateTime | FieldKind::Timestamp => as_temporal(value).format_datetime(),
        FieldKind::StringOrBlob => match value {
            RawValue::Null => String::new(),
            RawValue::Bytes(bytes) => String::from_utf8_lossy(bytes)
                .trim_end_matches(' ')
                .to_string(),
            other => as_i64(other).to_string(),
        },
        FieldKind::Null => format!("(Unknown type: {})", column.code),
    }
}

fn as_i64(value: &RawValue) -> i64 {
    match value {
        RawValue::Int(v) => *v,
        RawValue::UInt(v) => *v as i64,
        RawValue::Float(v) => *v as i64,
        RawValue::Double(v) => *v as i64,
        RawValue::Temporal(_) | RawValue::Bytes(_) | RawValue::Null => 0,
    }
}

fn as_f64(value: &RawValue) -> f64 {
    match value {
        RawValue::Int(v) => *v as f64,
        RawValue::UInt(v) => *v as f64,
        RawValue::Float(v) => *v as f64,
        RawValue::Double(v) => *v,
        RawValue::Temporal(_) | RawValue::Bytes(_) | RawValue::Null => 0.0,
    }
}

fn as_temporal(value: &RawValue) -> TemporalValue {
    match value {
        RawValue::Temporal(t) => *t,
        _ => TemporalValue::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) struct FakeCursor {
        columns: Vec<ColumnMeta>,
        declared: u64,
        rows: std::vec::IntoIter<Vec<RawValue>>,
    }

    impl FakeCursor {
        pub(crate) fn new(columns: Vec<ColumnMeta>, rows: Vec<Vec<RawValue>>) -> FakeCursor {
            FakeCursor {
                columns,
                declared: rows.len() as u64,
                rows: rows.into_iter(),
            }
        }

        fn declaring(mut self, declared: u64) -> FakeCursor {
            self.declared = declared;
            self
        }
    }

    impl ResultCursor for FakeCursor {
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

    fn column(name: &str, kind: FieldKind) -> ColumnMeta {
        ColumnMeta {
            name: name.to_string(),
            kind,
            code: 0,
        }
    }

    fn text(s: &str) -> RawValue {
        RawValue::Bytes(s.as_bytes().to_vec())
    }

    #[test]
    fn test_display_width_grows_over_header_and_rows() {
        let mut cursor = FakeCursor::new(
            vec![column("Name", FieldKind::StringOrBlob)],
            vec![vec![text("Alice")], vec![text("Bob")]],
        );
        let grid = ResultGrid::materialize(&mut cursor).unwrap();
        assert_eq!(grid.columns[0].display_width, 5);
        assert_eq!(grid.rows, vec![vec!["Alice".to_string()], vec!["Bob".to_string()]]);
    }

    #[test]
    fn test_header_sets_the_initial_width() {
        let mut cursor = FakeCursor::new(
            vec![column("a_rather_long_header", FieldKind::Int)],
            vec![vec![RawValue::Int(7)]],
        );
        let grid = ResultGrid::materialize(&mut cursor).unwrap();
        assert_eq!(grid.columns[0].display_width, "a_rather_long_header".len());
    }

    #[test]
    fn test_integer_and_float_rendering() {
        let mut cursor = FakeCursor::new(
            vec![
                column("i", FieldKind::Int),
                column("f", FieldKind::Float),
                column("d", FieldKind::Double),
            ],
            vec![vec![
                RawValue::Int(-12),
                RawValue::Float(3.5),
                RawValue::Double(2.0),
            ]],
        );
        let grid = ResultGrid::materialize(&mut cursor).unwrap();
        assert_eq!(grid.rows[0], vec!["-12", "3.50", "2.00"]);
    }

    #[test]
    fn test_tiny_int_renders_as_character_code() {
        let mut cursor = FakeCursor::new(
            vec![column("t", FieldKind::TinyInt)],
            vec![vec![RawValue::Int(65)]],
        );
        let grid = ResultGrid::materialize(&mut cursor).unwrap();
        assert_eq!(grid.rows[0][0], "A");
    }

    #[test]
    fn test_temporal_rendering() {
        let t = TemporalValue {
            year: 2024,
            month: 1,
            day: 2,
            hour: 3,
            minute: 4,
            second: 5,
        };
        let mut cursor = FakeCursor::new(
            vec![
                column("tm", FieldKind::Time),
                column("dt", FieldKind::Date),
                column("ts", FieldKind::Timestamp),
            ],
            vec![vec![
                RawValue::Temporal(t),
                RawValue::Temporal(t),
                RawValue::Temporal(t),
            ]],
        );
        let grid = ResultGrid::materialize(&mut cursor).unwrap();
        assert_eq!(
            grid.rows[0],
            vec!["03:04:05", "2024-01-02", "2024-01-02 03:04:05"]
        );
    }

    #[test]
    fn test_text_trims_trailing_spaces() {
        let mut cursor = FakeCursor::new(
            vec![column("s", FieldKind::StringOrBlob)],
            vec![vec![text("padded   ")]],
        );
        let grid = ResultGrid::materialize(&mut cursor).unwrap();
        assert_eq!(grid.rows[0][0], "padded");
    }

    #[test]
    fn test_unknown_kind_renders_placeholder() {
        let mut cursor = FakeCursor::new(
            vec![ColumnMeta {
                name: "g".into(),
                kind: FieldKind::Null,
                code: 255,
            }],
            vec![vec![RawValue::Bytes(vec![1, 2, 3])]],
        );
        let grid = ResultGrid::materialize(&mut cursor).unwrap();
        assert_eq!(grid.rows[0][0], "(Unknown type: 255)");
    }

    #[test]
    fn test_null_cells_render_as_zero_values() {
        let mut cursor = FakeCursor::new(
            vec![
                column("i", FieldKind::Int),
                column("f", FieldKind::Double),
                column("d", FieldKind::Date),
                column("s", FieldKind::StringOrBlob),
            ],
            vec![vec![
                RawValue::Null,
                RawValue::Null,
                RawValue::Null,
                RawValue::Null,
            ]],
        );
        let grid = ResultGrid::materialize(&mut cursor).unwrap();
        assert_eq!(grid.rows[0], vec!["0", "0.00", "0000-00-00", ""]);
    }

    #[test]
    fn test_overrun_is_a_row_count_mismatch() {
        let rows = vec![vec![RawValue::Int(1)], vec![RawValue::Int(2)]];
        let mut cursor = FakeCursor::new(vec![column("i", FieldKind::Int)], rows).declaring(1);
        let err = ResultGrid::materialize(&mut cursor).unwrap_err();
        match err {
            Error::RowCountMismatch { expected, fetched } => {
                assert_eq!(expected, 1);
                assert_eq!(fetched, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_cursor_yields_empty_grid() {
        let mut cursor = FakeCursor::new(vec![column("i", FieldKind::Int)], vec![]);
        let grid = ResultGrid::materialize(&mut cursor).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.row_count(), 0);
    }
}
