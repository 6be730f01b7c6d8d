use thiserror::Error;

/// Why a value could not be converted to the requested type.
///
/// Every variant is resolved locally by [`SafeConverter::change_type`] by
/// returning the caller's default; [`SafeConverter::try_change_type`] hands
/// the classification back instead.
///
/// [`SafeConverter::change_type`]: super::SafeConverter::change_type
/// [`SafeConverter::try_change_type`]: super::SafeConverter::try_change_type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The value was null or the "no data" marker
    #[error("value is absent")]
    Absent,

    /// The value's text does not parse as the target type
    #[error("'{text}' is not a valid {target}")]
    Format { text: String, target: &'static str },

    /// The value's runtime type cannot be coerced to the target type
    #[error("cannot convert {source_kind} to {target}")]
    IncompatibleType {
        source_kind: &'static str,
        target: &'static str,
    },

    /// The value lies outside the target type's representable range
    #[error("value out of range for {target}")]
    Overflow { target: &'static str },
}

impl ConversionError {
    pub(crate) fn format(text: impl Into<String>, target: &'static str) -> Self {
        ConversionError::Format {
            text: text.into(),
            target,
        }
    }

    pub(crate) fn incompatible(source_kind: &'static str, target: &'static str) -> Self {
        ConversionError::IncompatibleType {
            source_kind,
            target,
        }
    }

    pub(crate) fn overflow(target: &'static str) -> Self {
        ConversionError::Overflow { target }
    }
}
