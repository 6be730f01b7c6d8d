//! Safe value conversion
//!
//! Converts an untyped [`Value`] to a primitive type and returns a
//! caller-supplied default whenever the value is absent or the conversion is
//! invalid:
//! - **coerce**: the closed set of target types and their parse/range rules
//! - **converter**: [`SafeConverter`] holding the boolean tokens, plus the
//!   process-wide instance behind [`SafeConvertExt`]
//! - **culture**: number and date conventions used when parsing text

mod coerce;
mod converter;
mod culture;
mod error;
mod ext;
mod tokens;
mod value;

pub use coerce::{ConversionContext, Convertible};
pub use converter::{global, SafeConverter};
pub use culture::{Culture, DateOrder};
pub use error::ConversionError;
pub use ext::SafeConvertExt;
pub use tokens::BooleanTokens;
pub use value::Value;
