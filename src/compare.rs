//! Membership tests and safe string slicing
//!
//! Small helpers shared by the conversion engine (boolean token lookup) and
//! the data layer (string parameter truncation).

/// How two strings are compared for membership tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringComparison {
    /// Exact, case-sensitive comparison
    Ordinal,
    /// Case-insensitive comparison using simple Unicode lowercase folding
    #[default]
    OrdinalIgnoreCase,
}

impl StringComparison {
    pub fn equals(self, left: &str, right: &str) -> bool {
        match self {
            StringComparison::Ordinal => left == right,
            StringComparison::OrdinalIgnoreCase => left
                .chars()
                .flat_map(char::to_lowercase)
                .eq(right.chars().flat_map(char::to_lowercase)),
        }
    }
}

/// Check whether `value` equals any item of `sequence`
pub fn in_sequence<'a, T, I>(value: &T, sequence: I) -> bool
where
    T: PartialEq + 'a,
    I: IntoIterator<Item = &'a T>,
{
    sequence.into_iter().any(|item| item == value)
}

/// Check whether `value` matches any string of `sequence` under `comparison`
pub fn string_in_sequence<I, S>(value: &str, sequence: I, comparison: StringComparison) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sequence
        .into_iter()
        .any(|item| comparison.equals(item.as_ref(), value))
}

/// Take up to `length` characters starting at character `start`
///
/// Never panics: a start beyond the end yields an empty string and the length
/// is clipped to what remains.
pub fn safe_substring(value: &str, start: usize, length: usize) -> String {
    value.chars().skip(start).take(length).collect()
}

/// Keep at most `length` characters of `value`
pub fn truncate(value: &str, length: usize) -> String {
    safe_substring(value, 0, length)
}
