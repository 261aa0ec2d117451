//! Parameter binding.
//!
//! Converts loosely-typed parameter values from the batch description
//! into protocol-ready bound values. A `BoundParameters` value is owned
//! by the caller and lives for exactly one execute call; binding a new
//! set simply constructs a new value, so at most one set is ever alive
//! per statement.

use crate::error::{Error, Result};
use crate::types::{FieldKind, TemporalValue};

/// One placeholder's input before conversion. Temporal and text/blob
/// kinds read `text`; numeric kinds read `number`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterValue {
    pub kind: FieldKind,
    pub is_unsigned: bool,
    pub text: Option<String>,
    pub number: Option<f64>,
}

/// A protocol-ready bound value. Numeric values are already narrowed to
/// their native width; the unsigned variants only change how the driver
/// labels the raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Tiny(i8),
    UnsignedTiny(u8),
    Small(i16),
    UnsignedSmall(u16),
    Int(i32),
    UnsignedInt(u32),
    Big(i64),
    UnsignedBig(u64),
    Float(f32),
    Double(f64),
    Temporal(FieldKind, TemporalValue),
    Text(Vec<u8>),
    Null,
}

/// The materialized form of one parameter set, valid for one execution
#[derive(Debug, Clone, Default)]
pub struct BoundParameters {
    values: Vec<BoundValue>,
}

impl BoundParameters {
    /// An empty binding, for statements executed without parameters
    pub fn empty() -> BoundParameters {
        BoundParameters::default()
    }

    /// Convert an ordered parameter set. Fails with
    /// `ParameterCountMismatch` when the set's length does not match
    /// the statement's placeholder count.
    pub fn bind(params: &[ParameterValue], expected_count: usize) -> Result<BoundParameters> {
        if params.len() != expected_count {
            return Err(Error::ParameterCountMismatch {
                expected: expected_count,
                actual: params.len(),
            });
        }
        let mut values = Vec::with_capacity(params.len());
        for (index, param) in params.iter().enumerate() {
            values.push(convert(index, param)?);
        }
        Ok(BoundParameters { values })
    }

    pub fn values(&self) -> &[BoundValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn convert(index: usize, param: &ParameterValue) -> Result<BoundValue> {
    // An absent numeric value binds as zero, matching a zero-initialized
    // input slot.
    let number = param.number.unwrap_or(0.0);
    let value = match param.kind {
        FieldKind::TinyInt => {
            if param.is_unsigned {
                BoundValue::UnsignedTiny(number as u8)
            } else {
                BoundValue::Tiny(number as i8)
            }
        }
        FieldKind::SmallInt => {
            if param.is_unsigned {
                BoundValue::UnsignedSmall(number as u16)
            } else {
                BoundValue::Small(number as i16)
            }
        }
        FieldKind::Int => {
            if param.is_unsigned {
                BoundValue::UnsignedInt(number as u32)
            } else {
                BoundValue::Int(number as i32)
            }
        }
        FieldKind::BigInt => {
            if param.is_unsigned {
                BoundValue::UnsignedBig(number as u64)
            } else {
                BoundValue::Big(number as i64)
            }
        }
        FieldKind::Float => BoundValue::Float(number as f32),
        FieldKind::Double => BoundValue::Double(number),
        FieldKind::Time | FieldKind::Date | FieldKind::DateTime | FieldKind::Timestamp => {
            let text = required_text(index, param)?;
            BoundValue::Temporal(param.kind, TemporalValue::parse(text))
        }
        FieldKind::StringOrBlob => {
            let text = required_text(index, param)?;
            BoundValue::Text(text.as_bytes().to_vec())
        }
        FieldKind::Null => BoundValue::Null,
    };
    Ok(value)
}

fn required_text<'p>(index: usize, param: &'p ParameterValue) -> Result<&'p str> {
    param.text.as_deref().ok_or_else(|| {
        Error::Config(format!(
            "parameter {} is a {:?} and requires a string value",
            index, param.kind
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(kind: FieldKind, number: f64) -> ParameterValue {
        ParameterValue {
            kind,
            is_unsigned: false,
            text: None,
            number: Some(number),
        }
    }

    fn textual(kind: FieldKind, text: &str) -> ParameterValue {
        ParameterValue {
            kind,
            is_unsigned: false,
            text: Some(text.to_string()),
            number: None,
        }
    }

    #[test]
    fn test_count_mismatch_reports_both_counts() {
        let params = vec![numeric(FieldKind::Int, 1.0), numeric(FieldKind::Int, 2.0)];
        let err = BoundParameters::bind(&params, 3).unwrap_err();
        match err {
            Error::ParameterCountMismatch { expected, actual } => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_numeric_narrowing_truncates() {
        let bound = BoundParameters::bind(&[numeric(FieldKind::Int, 42.9)], 1).unwrap();
        assert_eq!(bound.values()[0], BoundValue::Int(42));

        let bound = BoundParameters::bind(&[numeric(FieldKind::TinyInt, -3.7)], 1).unwrap();
        assert_eq!(bound.values()[0], BoundValue::Tiny(-3));
    }

    #[test]
    fn test_double_round_trips_exactly() {
        let bound = BoundParameters::bind(&[numeric(FieldKind::Double, 42.0)], 1).unwrap();
        assert_eq!(bound.values()[0], BoundValue::Double(42.0));
    }

    #[test]
    fn test_unsigned_flag_selects_unsigned_width() {
        let param = ParameterValue {
            kind: FieldKind::TinyInt,
            is_unsigned: true,
            text: None,
            number: Some(200.0),
        };
        let bound = BoundParameters::bind(&[param], 1).unwrap();
        assert_eq!(bound.values()[0], BoundValue::UnsignedTiny(200));
    }

    #[test]
    fn test_temporal_length_routing() {
        let bound =
            BoundParameters::bind(&[textual(FieldKind::Date, "2024-06-15")], 1).unwrap();
        match &bound.values()[0] {
            BoundValue::Temporal(FieldKind::Date, t) => {
                assert_eq!((t.year, t.month, t.day), (2024, 6, 15));
                assert_eq!((t.hour, t.minute, t.second), (0, 0, 0));
            }
            other => panic!("unexpected value: {other:?}"),
        }

        let bound =
            BoundParameters::bind(&[textual(FieldKind::DateTime, "2024-06-15 10:20:30")], 1)
                .unwrap();
        match &bound.values()[0] {
            BoundValue::Temporal(FieldKind::DateTime, t) => {
                assert_eq!((t.hour, t.minute, t.second), (10, 20, 30));
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_text_carries_raw_bytes() {
        let bound = BoundParameters::bind(&[textual(FieldKind::StringOrBlob, "Ann")], 1).unwrap();
        assert_eq!(bound.values()[0], BoundValue::Text(b"Ann".to_vec()));
    }

    #[test]
    fn test_null_binds_without_buffer() {
        let param = ParameterValue {
            kind: FieldKind::Null,
            is_unsigned: false,
            text: None,
            number: None,
        };
        let bound = BoundParameters::bind(&[param], 1).unwrap();
        assert_eq!(bound.values()[0], BoundValue::Null);
    }

    #[test]
    fn test_temporal_without_string_is_a_config_error() {
        let err = BoundParameters::bind(&[numeric(FieldKind::Date, 1.0)], 1).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_binding() {
        assert!(BoundParameters::empty().is_empty());
        assert_eq!(BoundParameters::bind(&[], 0).unwrap().len(), 0);
    }
}
