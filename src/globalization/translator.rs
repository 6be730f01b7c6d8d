use tracing::warn;

use super::format::format_placeholders;
use super::reader::{LanguageDataSource, LanguageReader};
use crate::convert::{Culture, Value};

/// Translates identifiers through a language data source
#[derive(Debug, Clone)]
pub struct Translator<R> {
    source: LanguageDataSource<R>,
}

impl<R: LanguageReader> Translator<R> {
    pub fn new(source: LanguageDataSource<R>) -> Self {
        Self { source }
    }

    pub fn with_reader(reader: R, culture: Culture) -> Self {
        Self::new(LanguageDataSource::new(reader, culture))
    }

    pub fn culture(&self) -> &Culture {
        self.source.culture()
    }

    pub fn set_culture(&mut self, culture: Culture) {
        self.source.set_culture(culture);
    }

    pub fn data_source(&self) -> &LanguageDataSource<R> {
        &self.source
    }

    /// Translated text, or `identifier` itself when there is none
    pub fn translate(&self, identifier: &str) -> String {
        match self.source.translation(identifier) {
            Some(text) => text,
            None => {
                warn!(
                    identifier,
                    culture = %self.culture().name(),
                    reader = %self.source.reader().id(),
                    "Missing translation"
                );
                identifier.to_string()
            }
        }
    }

    /// Translate, then substitute `{0}`, `{1}`, … with `args`
    pub fn translate_format(&self, identifier: &str, args: &[Value]) -> String {
        format_placeholders(&self.translate(identifier), args, self.culture())
    }
}
