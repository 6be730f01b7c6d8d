use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::coerce::{ConversionContext, Convertible};
use super::culture::Culture;
use super::error::ConversionError;
use super::tokens::BooleanTokens;
use super::value::Value;

static GLOBAL: Lazy<SafeConverter> = Lazy::new(SafeConverter::new);

/// Process-wide converter used by [`SafeConvertExt`](super::SafeConvertExt)
///
/// Its boolean tokens can be replaced at any time; prefer an owned
/// [`SafeConverter`] where the settings should not leak between callers.
pub fn global() -> &'static SafeConverter {
    &GLOBAL
}

/// Converts untyped values to primitive types, returning a default on failure
///
/// The boolean token sets are held behind an `Arc` that is swapped whole on
/// replacement, so a conversion running alongside a replacement sees either
/// the old or the new set.
#[derive(Debug)]
pub struct SafeConverter {
    tokens: RwLock<Arc<BooleanTokens>>,
    culture: Option<Culture>,
}

impl Default for SafeConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl SafeConverter {
    /// Converter with default tokens that follows the process culture
    pub fn new() -> Self {
        Self::with_tokens(BooleanTokens::default())
    }

    pub fn with_tokens(tokens: BooleanTokens) -> Self {
        Self {
            tokens: RwLock::new(Arc::new(tokens)),
            culture: None,
        }
    }

    /// Pin the culture used when a call does not pass one
    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = Some(culture);
        self
    }

    /// Culture used by calls without an explicit culture
    pub fn culture(&self) -> &Culture {
        self.culture.as_ref().unwrap_or_else(|| Culture::process())
    }

    /// Snapshot of the current boolean token sets
    pub fn tokens(&self) -> Arc<BooleanTokens> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new token set; later conversions observe it
    pub fn replace_tokens(&self, tokens: BooleanTokens) {
        debug!(
            true_values = ?tokens.true_values(),
            false_values = ?tokens.false_values(),
            "Replacing boolean tokens"
        );
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(tokens);
    }

    pub fn set_true_values<I>(&self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut guard = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        let updated = guard.with_true_values(values);
        *guard = Arc::new(updated);
    }

    pub fn set_false_values<I>(&self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut guard = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        let updated = guard.with_false_values(values);
        *guard = Arc::new(updated);
    }

    /// Convert `value`, reporting why it failed
    pub fn try_change_type<T: Convertible>(&self, value: impl Into<Value>) -> Result<T, ConversionError> {
        self.try_change_type_with_culture(value, self.culture())
    }

    pub fn try_change_type_with_culture<T: Convertible>(
        &self,
        value: impl Into<Value>,
        culture: &Culture,
    ) -> Result<T, ConversionError> {
        let value = value.into();
        if value.is_absent() {
            return Err(ConversionError::Absent);
        }
        let tokens = self.tokens();
        let ctx = ConversionContext {
            culture,
            tokens: &tokens,
        };
        T::convert(&value, &ctx)
    }

    /// Convert `value`, or return `default` if it is absent or invalid
    pub fn change_type<T: Convertible>(&self, value: impl Into<Value>, default: T) -> T {
        self.change_type_with_culture(value, default, self.culture())
    }

    pub fn change_type_with_culture<T: Convertible>(
        &self,
        value: impl Into<Value>,
        default: T,
        culture: &Culture,
    ) -> T {
        match self.try_change_type_with_culture(value, culture) {
            Ok(converted) => converted,
            Err(err) => {
                trace!(target_type = T::TYPE_NAME, culture = %culture.name(), error = %err, "Conversion failed, using default");
                default
            }
        }
    }

    /// Convert `value`, falling back to the type's zero value
    pub fn change_type_or_default<T: Convertible + Default>(&self, value: impl Into<Value>) -> T {
        self.change_type(value, T::default())
    }

    pub fn to_int16(&self, value: impl Into<Value>, default: i16) -> i16 {
        self.change_type(value, default)
    }

    pub fn to_int32(&self, value: impl Into<Value>, default: i32) -> i32 {
        self.change_type(value, default)
    }

    pub fn to_int64(&self, value: impl Into<Value>, default: i64) -> i64 {
        self.change_type(value, default)
    }

    pub fn to_uint16(&self, value: impl Into<Value>, default: u16) -> u16 {
        self.change_type(value, default)
    }

    pub fn to_uint32(&self, value: impl Into<Value>, default: u32) -> u32 {
        self.change_type(value, default)
    }

    pub fn to_uint64(&self, value: impl Into<Value>, default: u64) -> u64 {
        self.change_type(value, default)
    }

    pub fn to_byte(&self, value: impl Into<Value>, default: u8) -> u8 {
        self.change_type(value, default)
    }

    pub fn to_sbyte(&self, value: impl Into<Value>, default: i8) -> i8 {
        self.change_type(value, default)
    }

    pub fn to_single(&self, value: impl Into<Value>, default: f32) -> f32 {
        self.change_type(value, default)
    }

    pub fn to_double(&self, value: impl Into<Value>, default: f64) -> f64 {
        self.change_type(value, default)
    }

    pub fn to_decimal(&self, value: impl Into<Value>, default: Decimal) -> Decimal {
        self.change_type(value, default)
    }

    pub fn to_char(&self, value: impl Into<Value>, default: char) -> char {
        self.change_type(value, default)
    }

    /// Text form of `value`; an absent value yields `default`, or `""` without one
    pub fn to_string(&self, value: impl Into<Value>, default: Option<&str>) -> String {
        match self.try_change_type::<String>(value) {
            Ok(text) => text,
            Err(_) => default.unwrap_or_default().to_string(),
        }
    }

    pub fn to_date_time(&self, value: impl Into<Value>, default: NaiveDateTime) -> NaiveDateTime {
        self.change_type(value, default)
    }

    pub fn to_boolean(&self, value: impl Into<Value>, default: bool) -> bool {
        self.change_type(value, default)
    }
}
