//! Translation lookup
//!
//! A [`LanguageReader`] maps an identifier to text for a culture.
//! [`Translator`] sits on top of a [`LanguageDataSource`] and never fails:
//! an identifier without a translation comes back unchanged.

pub mod dev;
pub mod format;
pub mod reader;
pub mod resource;
pub mod translator;

pub use dev::{dev_translator, DevLanguageReader};
pub use format::format_placeholders;
pub use reader::{LanguageDataSource, LanguageReader};
pub use resource::ResourceLanguageReader;
pub use translator::Translator;
