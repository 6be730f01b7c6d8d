//! Untyped data cell accepted by the conversion engine

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::culture::{Culture, DateOrder};
use crate::constants::conversion::{NAN, NEGATIVE_INFINITY, POSITIVE_INFINITY};

/// A value of unspecified runtime type
///
/// `Null` and `DbNull` are both treated as absent. `Bytes` is an opaque blob
/// that no conversion accepts.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    /// Explicit "no data" marker, as returned for SQL NULL columns
    DbNull,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Char(char),
    String(String),
    DateTime(NaiveDateTime),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null | Value::DbNull)
    }

    /// Short name of the runtime type, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::DbNull => "db-null",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Decimal(_) => "decimal",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::DateTime(_) => "date-time",
            Value::Bytes(_) => "bytes",
        }
    }

    /// Integer payload widened to `i128`, if this is an integer
    pub(crate) fn as_integer(&self) -> Option<i128> {
        let wide = match *self {
            Value::I8(v) => v.into(),
            Value::I16(v) => v.into(),
            Value::I32(v) => v.into(),
            Value::I64(v) => v.into(),
            Value::U8(v) => v.into(),
            Value::U16(v) => v.into(),
            Value::U32(v) => v.into(),
            Value::U64(v) => v.into(),
            _ => return None,
        };
        Some(wide)
    }

    /// Textual form of the value under `culture`
    ///
    /// `None` for absent values and for blobs, which have no text form.
    pub fn to_text(&self, culture: &Culture) -> Option<String> {
        let text = match self {
            Value::Null | Value::DbNull | Value::Bytes(_) => return None,
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::F32(v) => format_float(*v as f64, &v.to_string(), culture),
            Value::F64(v) => format_float(*v, &v.to_string(), culture),
            Value::Decimal(d) => localize_decimal_point(&d.to_string(), culture),
            Value::Char(c) => c.to_string(),
            Value::String(s) => s.clone(),
            Value::DateTime(dt) => format_date_time(dt, culture),
            other => other.as_integer()?.to_string(),
        };
        Some(text)
    }
}

fn format_float(value: f64, shortest: &str, culture: &Culture) -> String {
    if value.is_nan() {
        NAN.to_string()
    } else if value == f64::INFINITY {
        POSITIVE_INFINITY.to_string()
    } else if value == f64::NEG_INFINITY {
        NEGATIVE_INFINITY.to_string()
    } else {
        localize_decimal_point(shortest, culture)
    }
}

fn localize_decimal_point(text: &str, culture: &Culture) -> String {
    if culture.decimal_separator == '.' {
        text.to_string()
    } else {
        text.replace('.', &culture.decimal_separator.to_string())
    }
}

/// Short date in the culture's component order followed by a 24-hour time
pub(crate) fn format_date_time(value: &NaiveDateTime, culture: &Culture) -> String {
    // The separator is culture data, never part of a strftime pattern
    let sep = culture.date_separator;
    let (year, month, day) = (value.year(), value.month(), value.day());
    let date = match culture.date_order {
        DateOrder::MonthDayYear => format!("{month:02}{sep}{day:02}{sep}{year:04}"),
        DateOrder::DayMonthYear => format!("{day:02}{sep}{month:02}{sep}{year:04}"),
        DateOrder::YearMonthDay => format!("{year:04}{sep}{month:02}{sep}{day:02}"),
    };
    format!("{date} {}", value.format("%H:%M:%S"))
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    char => Char,
    String => String,
    NaiveDateTime => DateTime,
    Vec<u8> => Bytes,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::DateTime(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    n.as_f64().map_or(Value::Null, Value::F64)
                }
            }
            Json::String(s) => Value::String(s),
            // Arrays and objects keep their compact JSON text
            other => Value::String(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_absent_values() {
        assert!(Value::Null.is_absent());
        assert!(Value::DbNull.is_absent());
        assert!(Value::from(None::<i32>).is_absent());
        assert!(!Value::from("").is_absent());
    }

    #[test]
    fn test_to_text_numbers() {
        let invariant = Culture::invariant();
        assert_eq!(Value::from(12).to_text(&invariant).as_deref(), Some("12"));
        assert_eq!(Value::from(-7i64).to_text(&invariant).as_deref(), Some("-7"));
        assert_eq!(Value::from(23.55).to_text(&invariant).as_deref(), Some("23.55"));
        assert_eq!(Value::from(23.55).to_text(&Culture::de_de()).as_deref(), Some("23,55"));
        assert_eq!(Value::from(f64::INFINITY).to_text(&invariant).as_deref(), Some("Infinity"));
    }

    #[test]
    fn test_to_text_decimal_and_bool() {
        let d = Decimal::from_str("1.50").unwrap();
        assert_eq!(Value::from(d).to_text(&Culture::fr_fr()).as_deref(), Some("1,50"));
        assert_eq!(Value::from(true).to_text(&Culture::invariant()).as_deref(), Some("True"));
    }

    #[test]
    fn test_to_text_date_time_follows_culture() {
        let dt = NaiveDate::from_ymd_opt(2029, 1, 2)
            .unwrap()
            .and_hms_opt(13, 5, 0)
            .unwrap();
        assert_eq!(
            Value::from(dt).to_text(&Culture::en_us()).as_deref(),
            Some("01/02/2029 13:05:00")
        );
        assert_eq!(
            Value::from(dt).to_text(&Culture::de_de()).as_deref(),
            Some("02.01.2029 13:05:00")
        );
    }

    #[test]
    fn test_date_separator_is_literal() {
        let dt = NaiveDate::from_ymd_opt(2029, 1, 2)
            .unwrap()
            .and_hms_opt(13, 5, 0)
            .unwrap();
        let mut culture = Culture::en_us();
        culture.date_separator = '%';
        assert_eq!(Value::from(dt).to_text(&culture).as_deref(), Some("01%02%2029 13:05:00"));

        culture.date_order = DateOrder::YearMonthDay;
        culture.date_separator = 'd';
        assert_eq!(Value::from(dt).to_text(&culture).as_deref(), Some("2029d01d02 13:05:00"));
    }

    #[test]
    fn test_blobs_have_no_text() {
        assert_eq!(Value::from(vec![1u8, 2]).to_text(&Culture::invariant()), None);
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::from(serde_json::json!(5)), Value::I64(5));
        assert_eq!(Value::from(serde_json::json!(u64::MAX)), Value::U64(u64::MAX));
        assert_eq!(Value::from(serde_json::json!(1.5)), Value::F64(1.5));
        assert_eq!(Value::from(serde_json::json!(null)), Value::Null);
        assert_eq!(Value::from(serde_json::json!([1, 2])), Value::String("[1,2]".to_string()));
    }
}
