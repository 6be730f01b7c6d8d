//! Per-target conversion rules
//!
//! Each supported target type implements [`Convertible`] with its own parse and
//! range-check logic. There is no universal "convert anything" path: a target
//! only accepts the source kinds listed in its impl.

use std::num::IntErrorKind;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::culture::{Culture, DateOrder};
use super::error::ConversionError;
use super::tokens::BooleanTokens;
use super::value::Value;
use crate::constants::conversion::{NAN, NEGATIVE_INFINITY, POSITIVE_INFINITY, TWO_DIGIT_YEAR_PIVOT};

/// Settings in effect for a single conversion
#[derive(Debug, Clone, Copy)]
pub struct ConversionContext<'a> {
    pub culture: &'a Culture,
    pub tokens: &'a BooleanTokens,
}

/// A type the safe conversion engine can produce
pub trait Convertible: Sized {
    /// Name used in error messages and logs
    const TYPE_NAME: &'static str;

    /// Convert a present (non-absent) value
    fn convert(value: &Value, ctx: &ConversionContext<'_>) -> Result<Self, ConversionError>;
}

// ==============================================================================
// Integers
// ==============================================================================

fn integer_from(value: &Value, target: &'static str) -> Result<i128, ConversionError> {
    if let Some(wide) = value.as_integer() {
        return Ok(wide);
    }
    match value {
        Value::Bool(b) => Ok(i128::from(*b)),
        Value::Char(c) => Ok(i128::from(u32::from(*c))),
        Value::F32(v) => float_to_integer(f64::from(*v), target),
        Value::F64(v) => float_to_integer(*v, target),
        Value::Decimal(d) => d
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i128()
            .ok_or_else(|| ConversionError::overflow(target)),
        Value::String(s) => parse_integer(s, target),
        other => Err(ConversionError::incompatible(other.kind(), target)),
    }
}

/// Round half to even, then range check against `i128`
fn float_to_integer(value: f64, target: &'static str) -> Result<i128, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::overflow(target));
    }
    let rounded = value.round_ties_even();
    if rounded < i128::MIN as f64 || rounded >= i128::MAX as f64 {
        return Err(ConversionError::overflow(target));
    }
    Ok(rounded as i128)
}

/// Optional sign and ASCII digits, surrounded by optional whitespace
fn parse_integer(text: &str, target: &'static str) -> Result<i128, ConversionError> {
    text.trim().parse::<i128>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ConversionError::overflow(target),
        _ => ConversionError::format(text, target),
    })
}

macro_rules! impl_integer {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Convertible for $ty {
                const TYPE_NAME: &'static str = $name;

                fn convert(value: &Value, _ctx: &ConversionContext<'_>) -> Result<Self, ConversionError> {
                    let wide = integer_from(value, $name)?;
                    <$ty>::try_from(wide).map_err(|_| ConversionError::overflow($name))
                }
            }
        )*
    };
}

impl_integer! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
}

// ==============================================================================
// Floating point and decimal
// ==============================================================================

/// Rewrite culture-formatted number text into Rust's literal syntax
///
/// Group separators are dropped before the decimal separator. Exponents are
/// only accepted when `allow_exponent` is set.
fn normalize_number(
    text: &str,
    culture: &Culture,
    allow_exponent: bool,
    target: &'static str,
) -> Result<String, ConversionError> {
    let trimmed = text.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut seen_point = false;
    let mut seen_exponent = false;
    for c in trimmed.chars() {
        if c == culture.decimal_separator && !seen_point && !seen_exponent {
            seen_point = true;
            out.push('.');
        } else if c == culture.group_separator && !seen_point && !seen_exponent {
            continue;
        } else if c.is_ascii_digit() || c == '+' || c == '-' {
            out.push(c);
        } else if allow_exponent && !seen_exponent && (c == 'e' || c == 'E') {
            seen_exponent = true;
            out.push('e');
        } else {
            return Err(ConversionError::format(text, target));
        }
    }
    Ok(out)
}

fn parse_float<T: FromStr>(text: &str, culture: &Culture, target: &'static str) -> Result<T, ConversionError> {
    let trimmed = text.trim();
    let symbol = trimmed.trim_start_matches('+');
    if symbol == POSITIVE_INFINITY || symbol == NEGATIVE_INFINITY || symbol == "∞" || symbol == "-∞" {
        return Err(ConversionError::overflow(target));
    }
    let normalized = if trimmed.eq_ignore_ascii_case(NAN) {
        NAN.to_string()
    } else {
        normalize_number(text, culture, true, target)?
    };
    normalized
        .parse::<T>()
        .map_err(|_| ConversionError::format(text, target))
}

macro_rules! impl_float {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Convertible for $ty {
                const TYPE_NAME: &'static str = $name;

                fn convert(value: &Value, ctx: &ConversionContext<'_>) -> Result<Self, ConversionError> {
                    let result = match value {
                        Value::F32(v) => *v as $ty,
                        Value::F64(v) => *v as $ty,
                        Value::Bool(b) => if *b { 1.0 } else { 0.0 },
                        Value::Decimal(d) => d
                            .to_f64()
                            .ok_or_else(|| ConversionError::overflow($name))? as $ty,
                        Value::String(s) => parse_float::<$ty>(s, ctx.culture, $name)?,
                        other => match other.as_integer() {
                            Some(wide) => wide as $ty,
                            None => return Err(ConversionError::incompatible(other.kind(), $name)),
                        },
                    };
                    // Overflow to infinity is never a valid result
                    if result.is_infinite() {
                        return Err(ConversionError::overflow($name));
                    }
                    Ok(result)
                }
            }
        )*
    };
}

impl_float! {
    f32 => "f32",
    f64 => "f64",
}

fn parse_decimal(text: &str, culture: &Culture) -> Result<Decimal, ConversionError> {
    const TARGET: &str = "decimal";
    let normalized = normalize_number(text, culture, false, TARGET)?;
    let (negative, magnitude) = match normalized.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, normalized.strip_prefix('+').unwrap_or(&normalized)),
    };
    if !magnitude.chars().any(|c| c.is_ascii_digit())
        || magnitude.chars().any(|c| !(c.is_ascii_digit() || c == '.'))
    {
        return Err(ConversionError::format(text, TARGET));
    }
    // "5." and ".5" are accepted forms
    let magnitude = magnitude.strip_suffix('.').unwrap_or(magnitude);
    let magnitude = if magnitude.starts_with('.') {
        format!("0{magnitude}")
    } else {
        magnitude.to_string()
    };
    // Syntax is valid at this point, so a parse failure means too many digits
    let parsed = Decimal::from_str(&magnitude).map_err(|_| ConversionError::overflow(TARGET))?;
    Ok(if negative { -parsed } else { parsed })
}

/// Floats go through their shortest round-trip text so 23.55 stays 23.55
fn decimal_from_float(value: f64, shortest: String) -> Result<Decimal, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::overflow(Decimal::TYPE_NAME));
    }
    parse_decimal(&shortest, &Culture::invariant())
}

impl Convertible for Decimal {
    const TYPE_NAME: &'static str = "decimal";

    fn convert(value: &Value, ctx: &ConversionContext<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Decimal(d) => Ok(*d),
            Value::Bool(b) => Ok(Decimal::from(u8::from(*b))),
            Value::F32(v) => decimal_from_float(f64::from(*v), v.to_string()),
            Value::F64(v) => decimal_from_float(*v, v.to_string()),
            Value::String(s) => parse_decimal(s, ctx.culture),
            other => match other.as_integer() {
                Some(wide) => Decimal::try_from_i128_with_scale(wide, 0)
                    .map_err(|_| ConversionError::overflow(Self::TYPE_NAME)),
                None => Err(ConversionError::incompatible(other.kind(), Self::TYPE_NAME)),
            },
        }
    }
}

// ==============================================================================
// Boolean, char and string
// ==============================================================================

impl Convertible for bool {
    const TYPE_NAME: &'static str = "bool";

    /// Matches the value's text against the configured boolean tokens
    fn convert(value: &Value, ctx: &ConversionContext<'_>) -> Result<Self, ConversionError> {
        let text = value
            .to_text(ctx.culture)
            .ok_or_else(|| ConversionError::incompatible(value.kind(), Self::TYPE_NAME))?;
        ctx.tokens
            .resolve(&text)
            .ok_or_else(|| ConversionError::format(text, Self::TYPE_NAME))
    }
}

impl Convertible for char {
    const TYPE_NAME: &'static str = "char";

    fn convert(value: &Value, _ctx: &ConversionContext<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Char(c) => Ok(*c),
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ConversionError::format(s.as_str(), Self::TYPE_NAME)),
                }
            }
            other => match other.as_integer() {
                Some(code) => u32::try_from(code)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| ConversionError::overflow(Self::TYPE_NAME)),
                None => Err(ConversionError::incompatible(other.kind(), Self::TYPE_NAME)),
            },
        }
    }
}

impl Convertible for String {
    const TYPE_NAME: &'static str = "string";

    fn convert(value: &Value, ctx: &ConversionContext<'_>) -> Result<Self, ConversionError> {
        value
            .to_text(ctx.culture)
            .ok_or_else(|| ConversionError::incompatible(value.kind(), Self::TYPE_NAME))
    }
}

// ==============================================================================
// Date/time
// ==============================================================================

const ISO_DATE_TIME_PATTERNS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const TIME_PATTERNS: [&str; 6] = [
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M:%S%p",
    "%I:%M%p",
];

fn parse_date_time(text: &str, culture: &Culture) -> Result<NaiveDateTime, ConversionError> {
    let trimmed = text.trim();
    // Offsets are normalised to UTC
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }
    if let Some(dt) = ISO_DATE_TIME_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(trimmed, pattern).ok())
    {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    parse_culture_date_time(trimmed, culture)
        .ok_or_else(|| ConversionError::format(text, NaiveDateTime::TYPE_NAME))
}

/// Short date in the culture's component order, optionally followed by a time
fn parse_culture_date_time(text: &str, culture: &Culture) -> Option<NaiveDateTime> {
    let (date_part, time_part) = match text.split_once(char::is_whitespace) {
        Some((date, time)) => (date, time.trim()),
        None => (text, ""),
    };
    let parts: Vec<&str> = date_part
        .split(|c| c == culture.date_separator || c == '/' || c == '-' || c == '.')
        .collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }
    // A four-digit leading component is always a year
    let order = if parts[0].len() == 4 {
        DateOrder::YearMonthDay
    } else {
        culture.date_order
    };
    let (year, month, day) = match order {
        DateOrder::MonthDayYear => (parts[2], parts[0], parts[1]),
        DateOrder::DayMonthYear => (parts[2], parts[1], parts[0]),
        DateOrder::YearMonthDay => (parts[0], parts[1], parts[2]),
    };
    let date = NaiveDate::from_ymd_opt(expand_year(year)?, month.parse().ok()?, day.parse().ok()?)?;
    let time = if time_part.is_empty() {
        NaiveTime::MIN
    } else {
        TIME_PATTERNS
            .iter()
            .find_map(|pattern| NaiveTime::parse_from_str(time_part, pattern).ok())?
    };
    Some(date.and_time(time))
}

fn expand_year(text: &str) -> Option<i32> {
    let year: i32 = text.parse().ok()?;
    if text.len() <= 2 {
        Some(if year <= TWO_DIGIT_YEAR_PIVOT { 2000 + year } else { 1900 + year })
    } else {
        Some(year)
    }
}

impl Convertible for NaiveDateTime {
    const TYPE_NAME: &'static str = "date-time";

    fn convert(value: &Value, ctx: &ConversionContext<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::DateTime(dt) => Ok(*dt),
            Value::String(s) => parse_date_time(s, ctx.culture),
            other => Err(ConversionError::incompatible(other.kind(), Self::TYPE_NAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert<T: Convertible>(value: impl Into<Value>, culture: &Culture) -> Result<T, ConversionError> {
        let tokens = BooleanTokens::default();
        let ctx = ConversionContext { culture, tokens: &tokens };
        T::convert(&value.into(), &ctx)
    }

    fn invariant<T: Convertible>(value: impl Into<Value>) -> Result<T, ConversionError> {
        convert(value, &Culture::invariant())
    }

    #[test]
    fn test_integer_error_classes() {
        assert_eq!(invariant::<i32>(" 42 "), Ok(42));
        assert_eq!(invariant::<i32>("+42"), Ok(42));
        assert!(matches!(invariant::<i32>("241.25"), Err(ConversionError::Format { .. })));
        assert!(matches!(invariant::<i32>("3123123123"), Err(ConversionError::Overflow { .. })));
        assert!(matches!(invariant::<u16>("-1"), Err(ConversionError::Overflow { .. })));
        assert!(matches!(
            invariant::<i64>("99999999999999999999999999999999999999999"),
            Err(ConversionError::Overflow { .. })
        ));
        assert!(matches!(invariant::<i32>(vec![1u8]), Err(ConversionError::IncompatibleType { .. })));
    }

    #[test]
    fn test_integer_from_other_kinds() {
        assert_eq!(invariant::<i32>(true), Ok(1));
        assert_eq!(invariant::<u8>('A'), Ok(65));
        assert_eq!(invariant::<i16>(300i64), Ok(300));
        assert!(matches!(invariant::<i8>(300i64), Err(ConversionError::Overflow { .. })));
        // Round half to even
        assert_eq!(invariant::<i32>(2.5f64), Ok(2));
        assert_eq!(invariant::<i32>(3.5f64), Ok(4));
        assert_eq!(invariant::<i32>(Decimal::new(-25, 1)), Ok(-2));
        assert!(matches!(invariant::<i32>(f64::NAN), Err(ConversionError::Overflow { .. })));
    }

    #[test]
    fn test_integer_rejects_date_time() {
        let dt = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_time(NaiveTime::MIN);
        assert_eq!(
            invariant::<i32>(dt),
            Err(ConversionError::IncompatibleType { source_kind: "date-time", target: "i32" })
        );
    }

    #[test]
    fn test_float_culture_separators() {
        assert_eq!(invariant::<f64>("1,234.5"), Ok(1234.5));
        assert_eq!(convert::<f64>("1.234,5", &Culture::de_de()), Ok(1234.5));
        assert_eq!(convert::<f64>("23,55", &Culture::de_de()), Ok(23.55));
        assert_eq!(invariant::<f64>("1e3"), Ok(1000.0));
        assert!(invariant::<f64>("NaN").unwrap().is_nan());
        assert!(matches!(invariant::<f64>("12abc"), Err(ConversionError::Format { .. })));
        assert!(matches!(invariant::<f64>("1.2.3"), Err(ConversionError::Format { .. })));
    }

    #[test]
    fn test_float_infinity_rejected_on_every_path() {
        assert!(matches!(invariant::<f32>("3.402824e38"), Err(ConversionError::Overflow { .. })));
        assert!(matches!(invariant::<f32>(1e300f64), Err(ConversionError::Overflow { .. })));
        assert!(matches!(invariant::<f64>(f64::INFINITY), Err(ConversionError::Overflow { .. })));
        assert!(matches!(invariant::<f64>("Infinity"), Err(ConversionError::Overflow { .. })));
        assert!(matches!(invariant::<f64>("1.79769313486233e308"), Err(ConversionError::Overflow { .. })));
    }

    #[test]
    fn test_decimal_parsing() {
        assert_eq!(invariant::<Decimal>("23.55"), Ok(Decimal::from_str("23.55").unwrap()));
        assert_eq!(invariant::<Decimal>("-.5"), Ok(Decimal::from_str("-0.5").unwrap()));
        assert_eq!(invariant::<Decimal>(Value::F64(23.55)), Ok(Decimal::from_str("23.55").unwrap()));
        assert!(matches!(invariant::<Decimal>("1e5"), Err(ConversionError::Format { .. })));
        assert!(matches!(
            invariant::<Decimal>("79228162514264337593543950336"),
            Err(ConversionError::Overflow { .. })
        ));
        assert!(matches!(invariant::<Decimal>(f64::NAN), Err(ConversionError::Overflow { .. })));
    }

    #[test]
    fn test_char_conversion() {
        assert_eq!(invariant::<char>("a"), Ok('a'));
        assert!(matches!(invariant::<char>("65"), Err(ConversionError::Format { .. })));
        assert!(matches!(invariant::<char>(""), Err(ConversionError::Format { .. })));
        assert_eq!(invariant::<char>(65), Ok('A'));
        assert!(matches!(invariant::<char>(0xD800u32), Err(ConversionError::Overflow { .. })));
        assert!(matches!(invariant::<char>(1.5f64), Err(ConversionError::IncompatibleType { .. })));
    }

    #[test]
    fn test_bool_uses_text_form() {
        assert_eq!(invariant::<bool>(1), Ok(true));
        assert_eq!(invariant::<bool>(0u8), Ok(false));
        assert_eq!(invariant::<bool>(true), Ok(true));
        assert!(matches!(invariant::<bool>(2), Err(ConversionError::Format { .. })));
    }

    #[test]
    fn test_date_time_formats() {
        let jan_first = NaiveDate::from_ymd_opt(2029, 1, 1).unwrap().and_time(NaiveTime::MIN);
        assert_eq!(convert::<NaiveDateTime>("1/1/2029", &Culture::en_us()), Ok(jan_first));
        assert!(convert::<NaiveDateTime>("13/1/2029", &Culture::en_us()).is_err());
        assert_eq!(
            convert::<NaiveDateTime>("13/1/2029", &Culture::en_gb()),
            Ok(NaiveDate::from_ymd_opt(2029, 1, 13).unwrap().and_time(NaiveTime::MIN))
        );
        assert_eq!(invariant::<NaiveDateTime>("2029-01-01"), Ok(jan_first));
        assert_eq!(
            invariant::<NaiveDateTime>("2029-01-01T10:30:00"),
            Ok(NaiveDate::from_ymd_opt(2029, 1, 1).unwrap().and_hms_opt(10, 30, 0).unwrap())
        );
        assert_eq!(
            invariant::<NaiveDateTime>("2029-01-01T10:30:00+02:00"),
            Ok(NaiveDate::from_ymd_opt(2029, 1, 1).unwrap().and_hms_opt(8, 30, 0).unwrap())
        );
        assert_eq!(
            convert::<NaiveDateTime>("1/1/2029 1:15 PM", &Culture::en_us()),
            Ok(NaiveDate::from_ymd_opt(2029, 1, 1).unwrap().and_hms_opt(13, 15, 0).unwrap())
        );
        assert_eq!(
            convert::<NaiveDateTime>("02.01.29", &Culture::de_de()),
            Ok(NaiveDate::from_ymd_opt(2029, 1, 2).unwrap().and_time(NaiveTime::MIN))
        );
        assert!(invariant::<NaiveDateTime>(5).is_err());
    }

    #[test]
    fn test_date_time_text_round_trip() {
        let dt = NaiveDate::from_ymd_opt(2031, 12, 24).unwrap().and_hms_opt(18, 0, 5).unwrap();
        for culture in [Culture::invariant(), Culture::en_gb(), Culture::de_de(), Culture::fr_fr()] {
            let text = convert::<String>(dt, &culture).unwrap();
            assert_eq!(convert::<NaiveDateTime>(text.as_str(), &culture), Ok(dt), "{culture:?}");
        }
    }
}
