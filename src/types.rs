//! Field kinds and temporal values.
//!
//! `FieldKind` classifies a column or parameter by its wire representation.
//! Resolution from a type name is case-insensitive and total: unknown names
//! fall back to `Null` so a caller can proceed with untyped markers.

/// Abstract classification of a column/parameter's wire representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Time,
    Date,
    DateTime,
    Timestamp,
    StringOrBlob,
    Null,
}

impl FieldKind {
    /// Resolve a type name to a field kind. Never fails; unrecognized
    /// names map to `Null`.
    pub fn resolve(type_name: &str) -> FieldKind {
        match type_name.to_ascii_uppercase().as_str() {
            "TINYINT" => FieldKind::TinyInt,
            "SMALLINT" => FieldKind::SmallInt,
            "INT" => FieldKind::Int,
            "BIGINT" => FieldKind::BigInt,
            "FLOAT" => FieldKind::Float,
            "DOUBLE" => FieldKind::Double,
            "TIME" => FieldKind::Time,
            "DATE" => FieldKind::Date,
            "DATETIME" => FieldKind::DateTime,
            "TIMESTAMP" => FieldKind::Timestamp,
            "TEXT" | "CHAR" | "VARCHAR" => FieldKind::StringOrBlob,
            "BLOB" | "BINARY" | "VARBINARY" => FieldKind::StringOrBlob,
            "NULL" => FieldKind::Null,
            _ => FieldKind::Null,
        }
    }

    /// True for the four temporal kinds
    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            FieldKind::Time | FieldKind::Date | FieldKind::DateTime | FieldKind::Timestamp
        )
    }
}

/// A structured temporal value, zero-initialized like the protocol's
/// time structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemporalValue {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TemporalValue {
    /// Parse a temporal string. The layout is chosen by string length
    /// alone: exactly 10 characters runs the three-field date scan, any
    /// other length (19 included) runs the six-field date-time scan.
    /// Fields are filled left to right until the first separator
    /// mismatch; the rest stay zero.
    pub fn parse(s: &str) -> TemporalValue {
        let mut value = TemporalValue::default();
        match s.len() {
            10 => {
                // YYYY-MM-DD
                let mut fields = [0u32; 3];
                scan_fields(s, &[4, 2, 2], &['-', '-'], &mut fields);
                value.year = fields[0];
                value.month = fields[1];
                value.day = fields[2];
            }
            19 => scan_datetime(s, &mut value),
            _ => scan_datetime(s, &mut value),
        }
        value
    }

    /// `HH:MM:SS`
    pub fn format_time(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }

    /// `YYYY-MM-DD`
    pub fn format_date(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn format_datetime(&self) -> String {
        format!("{} {}", self.format_date(), self.format_time())
    }
}

fn scan_datetime(s: &str, value: &mut TemporalValue) {
    // YYYY-MM-DD HH:MM:SS
    let mut fields = [0u32; 6];
    scan_fields(s, &[4, 2, 2, 2, 2, 2], &['-', '-', ' ', ':', ':'], &mut fields);
    value.year = fields[0];
    value.month = fields[1];
    value.day = fields[2];
    value.hour = fields[3];
    value.minute = fields[4];
    value.second = fields[5];
}

/// Read up to `widths[i]` digits into `out[i]`, expecting `seps[i]`
/// between fields. Stops at the first mismatch, leaving later fields
/// untouched.
fn scan_fields(s: &str, widths: &[usize], seps: &[char], out: &mut [u32]) {
    let mut chars = s.chars().peekable();
    for (i, slot) in out.iter_mut().enumerate() {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let mut digits = 0;
        let mut field = 0u32;
        while digits < widths[i] {
            match chars.peek() {
                Some(c) if c.is_ascii_digit() => {
                    field = field * 10 + (*c as u32 - '0' as u32);
                    digits += 1;
                    chars.next();
                }
                _ => break,
            }
        }
        if digits == 0 {
            return;
        }
        *slot = field;
        if i < seps.len() {
            match chars.next() {
                Some(c) if c == seps[i] => {}
                _ => return,
            }
        }
    }
}
