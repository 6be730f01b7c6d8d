use crate::convert::Culture;
use crate::data::{DataSource, DataSourceReader, NullDataSourceWriter};

/// Source of translated text
pub trait LanguageReader: DataSourceReader {
    /// Text for `identifier` in `culture`, if the reader has one
    fn translation(&self, identifier: &str, culture: &Culture) -> Option<String>;
}

/// A read-only language source fixed to one culture
#[derive(Debug, Clone)]
pub struct LanguageDataSource<R> {
    source: DataSource<R, NullDataSourceWriter>,
    culture: Culture,
}

impl<R: LanguageReader> LanguageDataSource<R> {
    pub fn new(reader: R, culture: Culture) -> Self {
        Self {
            source: DataSource::new(reader, NullDataSourceWriter),
            culture,
        }
    }

    pub fn translation(&self, identifier: &str) -> Option<String> {
        self.source.reader().translation(identifier, &self.culture)
    }

    pub fn reader(&self) -> &R {
        self.source.reader()
    }

    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    pub fn set_culture(&mut self, culture: Culture) {
        self.culture = culture;
    }
}
