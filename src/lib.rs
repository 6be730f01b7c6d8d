//! Alaveri common library
//!
//! - **convert**: safe, defaulting conversion of untyped values to primitives
//! - **compare**: membership tests and safe string slicing
//! - **config**: typed configuration files (JSON, XML, TOML) in per-OS locations
//! - **data**: driver-agnostic query building and typed record access
//! - **enums**: display text and stable identifiers attached to enum variants
//! - **globalization**: resource-backed translation lookup
//! - **window_state**: persisted window position, size and maximized state

#![forbid(unsafe_code)]

pub mod compare;
pub mod config;
pub mod constants;
pub mod convert;
pub mod data;
pub mod enums;
pub mod globalization;
pub mod window_state;

pub use convert::{ConversionError, Culture, SafeConvertExt, SafeConverter, Value};
