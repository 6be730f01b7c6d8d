//! Library-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the library, providing a single source of truth for constant values.

/// Safe conversion defaults
pub mod conversion {
    /// Strings recognised as boolean `true` (case-insensitive)
    pub const TRUE_VALUES: [&str; 4] = ["true", "yes", "y", "1"];

    /// Strings recognised as boolean `false` (case-insensitive)
    pub const FALSE_VALUES: [&str; 4] = ["false", "no", "n", "0"];

    /// Two-digit years up to this value are placed in the 2000s, the rest in the 1900s
    pub const TWO_DIGIT_YEAR_PIVOT: i32 = 49;

    /// Text written for positive infinity
    pub const POSITIVE_INFINITY: &str = "Infinity";

    /// Text written for negative infinity
    pub const NEGATIVE_INFINITY: &str = "-Infinity";

    /// Text written for NaN
    pub const NAN: &str = "NaN";
}

/// Locale environment lookup
pub mod locale {
    /// Environment variables consulted (in order) for the current culture
    pub const ENV_VARS: [&str; 3] = ["LC_ALL", "LC_NUMERIC", "LANG"];

    /// Culture name used for the development translation resources
    pub const DEVELOPMENT_CULTURE: &str = "en-US";
}

/// Configuration file conventions
pub mod config {
    /// JSON configuration file extension
    pub const JSON_EXTENSION: &str = ".json";

    /// XML configuration file extension
    pub const XML_EXTENSION: &str = ".xml";

    /// TOML configuration file extension
    pub const TOML_EXTENSION: &str = ".toml";

    /// Root element written by the XML serializer when none is configured
    pub const DEFAULT_XML_ROOT: &str = "Configuration";

    /// UTF-8 byte order mark, tolerated at the start of configuration files
    pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

    /// Machine-wide configuration directory on macOS
    pub const MACOS_APPLICATION_DIR: &str = "/Library/Application Support";

    /// Machine-wide configuration directory on other Unix systems
    pub const UNIX_APPLICATION_DIR: &str = "/etc/xdg";

    /// Fallback for `%ProgramData%` when the variable is unset
    pub const WINDOWS_PROGRAM_DATA: &str = "C:\\ProgramData";
}

/// Database query defaults
pub mod data {
    /// Default command timeout in seconds
    pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;
}

/// Logging setup for the `acl` binary
pub mod logging {
    /// Environment variable holding the log level
    pub const LEVEL_ENV: &str = "LOG_LEVEL";

    /// Log level used when the variable is unset or unrecognised
    pub const DEFAULT_LEVEL: &str = "info";
}

/// Translation resources
pub mod globalization {
    /// Stem of the resource file used when no culture-specific entry exists
    pub const NEUTRAL_RESOURCE: &str = "neutral";

    /// Extension of resource files
    pub const RESOURCE_EXTENSION: &str = "json";

    /// Identifier reported by the built-in development reader
    pub const DEV_READER_ID: &str = "DevLanguageReader";
}

/// Window state defaults
pub mod window {
    /// Width used before any state has been stored
    pub const DEFAULT_WIDTH: f64 = 800.0;

    /// Height used before any state has been stored
    pub const DEFAULT_HEIGHT: f64 = 600.0;
}

/// Property keys read from `#[strum(props(...))]` by enum descriptors
pub mod enums {
    pub const IDENTIFIER: &str = "identifier";

    pub const ADDITIONAL_DATA: &str = "additional_data";
}
