use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::coerce::Convertible;
use super::converter::global;
use super::value::Value;

/// `as_*` conversions on any value that can become a [`Value`]
///
/// Backed by the process-wide converter returned by [`global`].
///
/// ```
/// use alaveri_common::convert::SafeConvertExt;
///
/// assert_eq!("1234".as_int32(-1), 1234);
/// assert_eq!("123s4".as_int32(-1), -1);
/// assert!("Yes".as_boolean(false));
/// ```
pub trait SafeConvertExt {
    fn to_value(&self) -> Value;

    fn change_type<T: Convertible>(&self, default: T) -> T {
        global().change_type(self.to_value(), default)
    }

    fn as_int16(&self, default: i16) -> i16 {
        global().to_int16(self.to_value(), default)
    }

    fn as_int32(&self, default: i32) -> i32 {
        global().to_int32(self.to_value(), default)
    }

    fn as_int64(&self, default: i64) -> i64 {
        global().to_int64(self.to_value(), default)
    }

    fn as_uint16(&self, default: u16) -> u16 {
        global().to_uint16(self.to_value(), default)
    }

    fn as_uint32(&self, default: u32) -> u32 {
        global().to_uint32(self.to_value(), default)
    }

    fn as_uint64(&self, default: u64) -> u64 {
        global().to_uint64(self.to_value(), default)
    }

    fn as_byte(&self, default: u8) -> u8 {
        global().to_byte(self.to_value(), default)
    }

    fn as_sbyte(&self, default: i8) -> i8 {
        global().to_sbyte(self.to_value(), default)
    }

    fn as_single(&self, default: f32) -> f32 {
        global().to_single(self.to_value(), default)
    }

    fn as_double(&self, default: f64) -> f64 {
        global().to_double(self.to_value(), default)
    }

    fn as_decimal(&self, default: Decimal) -> Decimal {
        global().to_decimal(self.to_value(), default)
    }

    fn as_char(&self, default: char) -> char {
        global().to_char(self.to_value(), default)
    }

    fn as_string(&self, default: Option<&str>) -> String {
        global().to_string(self.to_value(), default)
    }

    fn as_date_time(&self, default: NaiveDateTime) -> NaiveDateTime {
        global().to_date_time(self.to_value(), default)
    }

    fn as_boolean(&self, default: bool) -> bool {
        global().to_boolean(self.to_value(), default)
    }
}

impl<T> SafeConvertExt for T
where
    T: Clone + Into<Value>,
{
    fn to_value(&self) -> Value {
        self.clone().into()
    }
}
