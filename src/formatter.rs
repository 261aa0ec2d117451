//! Report rendering.
//!
//! Picks a report shape from the statement's syntax category and turns
//! the execution outcome into the final text: a single count message, an
//! empty-set message, or a boxed table followed by a row count.
//!
//! The box format is fixed:
//!
//! ```text
//! +---------------------+---------+----------+----------+
//! | Table               | Op      | Msg_type | Msg_text |
//! +---------------------+---------+----------+----------+
//! | employees.employees | analyze | status   | OK       |
//! +---------------------+---------+----------+----------+
//! ```

use std::fmt::Write;

use crate::binder::ParameterValue;
use crate::error::{Error, Result};
use crate::materialize::{ResultColumn, ResultGrid};
use crate::parser::SyntaxCategory;
use crate::types::FieldKind;

/// The two report shapes every known category collapses to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportShape {
    /// A single affected-row count message
    Count,
    /// A boxed table or an empty-set message
    ResultSet,
}

/// Map a syntax category to its report shape. `Unknown` has none and
/// makes the reporting step fail for that statement.
pub fn report_shape(category: SyntaxCategory) -> Option<ReportShape> {
    use SyntaxCategory::*;
    match category {
        AnalyzeTable | CacheIndex | CheckSum | LoadIndexIntoCache | OptimizeTable
        | RepairTable | Select | Show | ShowCreate => Some(ReportShape::ResultSet),
        Unknown => None,
        _ => Some(ReportShape::Count),
    }
}

/// Render the report for one execution. `grid` must be present for
/// result-set categories and is ignored for count categories.
pub fn render_report(
    category: SyntaxCategory,
    affected: u64,
    grid: Option<&ResultGrid>,
) -> Result<String> {
    match report_shape(category) {
        None => Err(Error::Report(format!(
            "no report strategy for {category:?} statement"
        ))),
        Some(ReportShape::Count) => Ok(rows_affected_message(affected)),
        Some(ReportShape::ResultSet) => {
            let grid = grid.ok_or_else(|| {
                Error::Report(format!(
                    "{category:?} statement produced no result set metadata"
                ))
            })?;
            if grid.is_empty() {
                Ok(empty_set_message())
            } else {
                let mut out = render_table(grid);
                out.push_str(&rows_in_set_message(grid.row_count()));
                Ok(out)
            }
        }
    }
}

/// `Query OK, N row(s) affected` — the affected/duplicate/warnings/
/// changed variants all collapse to this one template.
pub fn rows_affected_message(rows: u64) -> String {
    format!("Query OK, {} {} affected\n\n", rows, row_word(rows))
}

pub fn rows_in_set_message(rows: u64) -> String {
    format!("{} {} in set\n\n", rows, row_word(rows))
}

pub fn empty_set_message() -> String {
    "Empty set\n\n".to_string()
}

fn row_word(rows: u64) -> &'static str {
    if rows == 1 {
        "row"
    } else {
        "rows"
    }
}

/// Render the boxed table from the grid's display widths
pub fn render_table(grid: &ResultGrid) -> String {
    let rule = rule_line(&grid.columns);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('|');
    for column in &grid.columns {
        let _ = write!(out, " {:<1$} |", column.name, column.display_width);
    }
    out.push('\n');
    out.push_str(&rule);
    for row in &grid.rows {
        out.push('|');
        for (column, cell) in grid.columns.iter().zip(row) {
            let _ = write!(out, " {:<1$} |", cell, column.display_width);
        }
        out.push('\n');
    }
    out.push_str(&rule);
    out
}

fn rule_line(columns: &[ResultColumn]) -> String {
    let mut line = String::from("+");
    for column in columns {
        line.push_str(&"-".repeat(column.display_width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

/// Echo line body for one parameter set: `(0)v (1)v …`. Numeric kinds
/// show the narrowed value, temporal and text kinds the raw string,
/// null parameters nothing at all.
pub fn parameter_echo(params: &[ParameterValue]) -> String {
    let mut out = String::new();
    for (index, param) in params.iter().enumerate() {
        let number = param.number.unwrap_or(0.0);
        match param.kind {
            FieldKind::TinyInt => {
                let _ = write!(out, "({}){} ", index, (number as i8 as u8) as char);
            }
            FieldKind::SmallInt => {
                let _ = write!(out, "({}){} ", index, number as i16);
            }
            FieldKind::Int => {
                let _ = write!(out, "({}){} ", index, number as i32);
            }
            FieldKind::BigInt => {
                let _ = write!(out, "({}){} ", index, number as i64);
            }
            FieldKind::Float => {
                let _ = write!(out, "({}){:.6} ", index, number as f32);
            }
            FieldKind::Double => {
                let _ = write!(out, "({}){:.6} ", index, number);
            }
            FieldKind::Time
            | FieldKind::Date
            | FieldKind::DateTime
            | FieldKind::Timestamp
            | FieldKind::StringOrBlob => {
                let _ = write!(out, "({}){} ", index, param.text.as_deref().unwrap_or(""));
            }
            FieldKind::Null => {}
        }
    }
    out
}
