//! Built-in development resources

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::reader::LanguageReader;
use super::translator::Translator;
use crate::constants::globalization::DEV_READER_ID;
use crate::constants::locale::DEVELOPMENT_CULTURE;
use crate::convert::Culture;
use crate::data::DataSourceReader;

static AMERICAN_ENGLISH: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("TestTranslationPhrase", "Translated Phrase"),
        ("Yes", "Yes"),
        ("No", "No"),
        ("Ok", "OK"),
        ("Cancel", "Cancel"),
        ("Error", "Error"),
    ])
});

static DEV_TRANSLATOR: Lazy<Translator<DevLanguageReader>> = Lazy::new(|| {
    let culture = Culture::from_name(DEVELOPMENT_CULTURE).unwrap_or_else(Culture::en_us);
    Translator::with_reader(DevLanguageReader, culture)
});

/// American English strings compiled into the library
///
/// The same table answers for every culture.
#[derive(Debug, Clone, Copy, Default)]
pub struct DevLanguageReader;

impl DataSourceReader for DevLanguageReader {
    fn id(&self) -> &str {
        DEV_READER_ID
    }
}

impl LanguageReader for DevLanguageReader {
    fn translation(&self, identifier: &str, _culture: &Culture) -> Option<String> {
        AMERICAN_ENGLISH.get(identifier).map(|text| text.to_string())
    }
}

/// Shared translator over [`DevLanguageReader`]
pub fn dev_translator() -> &'static Translator<DevLanguageReader> {
    &DEV_TRANSLATOR
}
