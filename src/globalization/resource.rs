//! Translations loaded from JSON resource files

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::reader::LanguageReader;
use crate::constants::globalization::{NEUTRAL_RESOURCE, RESOURCE_EXTENSION};
use crate::convert::Culture;
use crate::data::DataSourceReader;

type Resources = HashMap<String, String>;

/// Reads `<dir>/<culture>.json` files holding flat `identifier -> text` maps
///
/// Lookup for `de-DE` tries `de-DE.json`, then `de.json`, then
/// `neutral.json`. Culture file names match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ResourceLanguageReader {
    id: String,
    cultures: HashMap<String, Resources>,
}

impl ResourceLanguageReader {
    /// Load every resource file in `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries =
            fs::read_dir(dir).with_context(|| format!("Failed to read resource directory {:?}", dir))?;

        let mut reader = Self {
            id: dir.display().to_string(),
            cultures: HashMap::new(),
        };
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to list resource directory {:?}", dir))?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some(RESOURCE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let text =
                fs::read_to_string(&path).with_context(|| format!("Failed to read resource file {:?}", path))?;
            let resources: Resources = serde_json::from_str(text.trim_start_matches('\u{feff}'))
                .with_context(|| format!("Failed to parse resource file {:?}", path))?;
            debug!(file = %path.display(), entries = resources.len(), "Loaded resource file");
            reader.cultures.insert(stem.to_ascii_lowercase(), resources);
        }

        info!("Loaded {} resource file(s) from {:?}", reader.cultures.len(), dir);
        Ok(reader)
    }

    /// Reader over in-memory resources; use `""` or `neutral` for the neutral set
    pub fn from_resources<I, K>(id: impl Into<String>, cultures: I) -> Self
    where
        I: IntoIterator<Item = (K, Resources)>,
        K: AsRef<str>,
    {
        let cultures = cultures
            .into_iter()
            .map(|(name, resources)| {
                let key = match name.as_ref() {
                    "" => NEUTRAL_RESOURCE.to_string(),
                    other => other.to_ascii_lowercase(),
                };
                (key, resources)
            })
            .collect();
        Self { id: id.into(), cultures }
    }

    /// Culture names with loaded resources, lower-cased
    pub fn cultures(&self) -> impl Iterator<Item = &str> {
        self.cultures.keys().map(String::as_str)
    }

    fn fallback_chain(culture: &Culture) -> Vec<String> {
        let mut chain = Vec::with_capacity(3);
        if !culture.is_invariant() {
            chain.push(culture.name().to_ascii_lowercase());
            let language = culture.language().to_ascii_lowercase();
            if !chain.contains(&language) {
                chain.push(language);
            }
        }
        chain.push(NEUTRAL_RESOURCE.to_string());
        chain
    }
}

impl DataSourceReader for ResourceLanguageReader {
    fn id(&self) -> &str {
        &self.id
    }
}

impl LanguageReader for ResourceLanguageReader {
    fn translation(&self, identifier: &str, culture: &Culture) -> Option<String> {
        Self::fallback_chain(culture)
            .iter()
            .filter_map(|name| self.cultures.get(name))
            .find_map(|resources| resources.get(identifier))
            .cloned()
    }
}
