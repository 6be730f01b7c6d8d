use serde::{Deserialize, Serialize};

use crate::compare::{string_in_sequence, StringComparison};
use crate::constants::conversion::{FALSE_VALUES, TRUE_VALUES};

/// Strings recognised as boolean `true`/`false` during conversion
///
/// Immutable once built; replace the whole set to change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanTokens {
    #[serde(default = "default_true_values")]
    true_values: Vec<String>,
    #[serde(default = "default_false_values")]
    false_values: Vec<String>,
}

fn default_true_values() -> Vec<String> {
    TRUE_VALUES.iter().map(|s| s.to_string()).collect()
}

fn default_false_values() -> Vec<String> {
    FALSE_VALUES.iter().map(|s| s.to_string()).collect()
}

impl Default for BooleanTokens {
    fn default() -> Self {
        Self {
            true_values: default_true_values(),
            false_values: default_false_values(),
        }
    }
}

impl BooleanTokens {
    pub fn new<T, F>(true_values: T, false_values: F) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            true_values: true_values.into_iter().map(Into::into).collect(),
            false_values: false_values.into_iter().map(Into::into).collect(),
        }
    }

    /// Copy of this set with the true tokens replaced
    pub fn with_true_values<I>(&self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            true_values: values.into_iter().map(Into::into).collect(),
            false_values: self.false_values.clone(),
        }
    }

    /// Copy of this set with the false tokens replaced
    pub fn with_false_values<I>(&self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            true_values: self.true_values.clone(),
            false_values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn true_values(&self) -> &[String] {
        &self.true_values
    }

    pub fn false_values(&self) -> &[String] {
        &self.false_values
    }

    /// Resolve trimmed `text` against the sets, true tokens first
    pub fn resolve(&self, text: &str) -> Option<bool> {
        let text = text.trim();
        if string_in_sequence(text, &self.true_values, StringComparison::OrdinalIgnoreCase) {
            Some(true)
        } else if string_in_sequence(text, &self.false_values, StringComparison::OrdinalIgnoreCase) {
            Some(false)
        } else {
            None
        }
    }
}
