//! Environment variable overrides for individual settings

use tracing::{debug, warn};

use crate::convert::{global, Convertible, Culture};

/// `PREFIX_KEY` in upper case, with `-`, `.` and spaces mapped to `_`
pub fn env_key(prefix: &str, key: &str) -> String {
    let raw = if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}_{key}")
    };
    raw.chars()
        .map(|c| match c {
            '-' | '.' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// Read `PREFIX_KEY` from the process environment and convert it to `T`
///
/// An unset variable or a value that does not convert yields `default`.
/// Values are parsed with the invariant culture.
pub fn env_setting<T: Convertible>(prefix: &str, key: &str, default: T) -> T {
    env_setting_from(|name| std::env::var(name).ok(), prefix, key, default)
}

/// [`env_setting`] with an injectable variable lookup
pub fn env_setting_from<T, F>(lookup: F, prefix: &str, key: &str, default: T) -> T
where
    T: Convertible,
    F: Fn(&str) -> Option<String>,
{
    let variable = env_key(prefix, key);
    let Some(raw) = lookup(&variable) else {
        return default;
    };

    match global().try_change_type_with_culture::<T>(raw.as_str(), &Culture::invariant()) {
        Ok(value) => {
            debug!(variable = %variable, "Applied environment override");
            value
        }
        Err(e) => {
            warn!(
                variable = %variable,
                value = %raw,
                target_type = T::TYPE_NAME,
                error = %e,
                "Ignoring invalid environment override"
            );
            default
        }
    }
}
