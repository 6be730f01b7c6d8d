//! Number and date formatting conventions used by text coercion

use std::env;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::constants::locale;

static PROCESS: Lazy<Culture> = Lazy::new(Culture::current);

/// Order of the day, month and year components in a short date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// month/day/year
    MonthDayYear,
    /// day/month/year
    DayMonthYear,
    /// year/month/day
    YearMonthDay,
}

/// Formatting conventions for a language/region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Culture {
    name: String,
    pub decimal_separator: char,
    pub group_separator: char,
    pub date_separator: char,
    pub date_order: DateOrder,
}

impl Culture {
    /// Culture-neutral conventions (`.` decimal point, month/day/year)
    pub fn invariant() -> Self {
        Self {
            name: String::new(),
            decimal_separator: '.',
            group_separator: ',',
            date_separator: '/',
            date_order: DateOrder::MonthDayYear,
        }
    }

    pub fn en_us() -> Self {
        Self {
            name: "en-US".to_string(),
            ..Self::invariant()
        }
    }

    pub fn en_gb() -> Self {
        Self {
            name: "en-GB".to_string(),
            date_order: DateOrder::DayMonthYear,
            ..Self::invariant()
        }
    }

    pub fn de_de() -> Self {
        Self {
            name: "de-DE".to_string(),
            decimal_separator: ',',
            group_separator: '.',
            date_separator: '.',
            date_order: DateOrder::DayMonthYear,
        }
    }

    pub fn fr_fr() -> Self {
        Self {
            name: "fr-FR".to_string(),
            decimal_separator: ',',
            group_separator: '\u{a0}',
            date_separator: '/',
            date_order: DateOrder::DayMonthYear,
        }
    }

    /// Look up a preset by name (`de-DE`, `de_DE`, `de`, case-insensitive)
    ///
    /// Returns `None` for cultures without a preset.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().replace('_', "-").to_ascii_lowercase();
        let culture = match normalized.as_str() {
            "" | "invariant" | "c" | "posix" => Self::invariant(),
            "en-us" | "en" => Self::en_us(),
            "en-gb" => Self::en_gb(),
            "de-de" | "de" => Self::de_de(),
            "fr-fr" | "fr" => Self::fr_fr(),
            _ => return None,
        };
        Some(culture)
    }

    /// Culture of the running process, read from the locale environment
    ///
    /// Falls back to the invariant culture when no variable names a known preset.
    pub fn current() -> Self {
        Self::from_locale_env(|key| env::var(key).ok())
    }

    /// [`current`](Self::current), resolved on first use and cached for the process lifetime
    pub fn process() -> &'static Culture {
        &PROCESS
    }

    /// Resolve the culture from a locale variable lookup (`LC_ALL`, `LC_NUMERIC`, `LANG`)
    pub fn from_locale_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in locale::ENV_VARS {
            let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            // de_DE.UTF-8@euro -> de_DE
            let tag = raw
                .split(['.', '@'])
                .next()
                .unwrap_or_default();
            if let Some(culture) = Self::from_name(tag) {
                debug!(variable = key, locale = %raw, culture = %culture.name(), "Resolved current culture");
                return culture;
            }
            debug!(variable = key, locale = %raw, "No culture preset for locale, trying next variable");
        }
        Self::invariant()
    }

    /// Culture name (`""` for invariant)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Neutral language part of the name (`de` for `de-DE`)
    pub fn language(&self) -> &str {
        self.name.split('-').next().unwrap_or_default()
    }

    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_name_accepts_variants() {
        assert_eq!(Culture::from_name("de-DE"), Some(Culture::de_de()));
        assert_eq!(Culture::from_name("de_de"), Some(Culture::de_de()));
        assert_eq!(Culture::from_name("EN-gb"), Some(Culture::en_gb()));
        assert_eq!(Culture::from_name(""), Some(Culture::invariant()));
        assert_eq!(Culture::from_name("xx-YY"), None);
    }

    #[test]
    fn test_from_locale_env_strips_encoding() {
        let vars = HashMap::from([("LANG", "de_DE.UTF-8".to_string())]);
        let culture = Culture::from_locale_env(|key| vars.get(key).cloned());
        assert_eq!(culture, Culture::de_de());
    }

    #[test]
    fn test_from_locale_env_priority() {
        let vars = HashMap::from([
            ("LC_ALL", "fr_FR.UTF-8".to_string()),
            ("LANG", "en_GB.UTF-8".to_string()),
        ]);
        let culture = Culture::from_locale_env(|key| vars.get(key).cloned());
        assert_eq!(culture.name(), "fr-FR");
    }

    #[test]
    fn test_from_locale_env_skips_unknown_and_falls_back() {
        let vars = HashMap::from([("LC_ALL", "tlh_KX".to_string())]);
        let culture = Culture::from_locale_env(|key| vars.get(key).cloned());
        assert!(culture.is_invariant());
    }

    #[test]
    fn test_process_culture_is_resolved_once() {
        let first = Culture::process();
        assert!(std::ptr::eq(first, Culture::process()));
        assert_eq!(*first, Culture::current());
    }

    #[test]
    fn test_language() {
        assert_eq!(Culture::de_de().language(), "de");
        assert_eq!(Culture::invariant().language(), "");
    }
}
