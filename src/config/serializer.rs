//! Configuration file formats

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::config::{DEFAULT_XML_ROOT, JSON_EXTENSION, TOML_EXTENSION, UTF8_BOM, XML_EXTENSION};

/// Turns a configuration into file bytes and back
pub trait ConfigSerializer {
    /// Extension including the leading dot, e.g. `.json`
    fn file_extension(&self) -> &'static str;

    fn serialize<T: Serialize>(&self, config: &T) -> Result<Vec<u8>>;

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T>;
}

/// Input as UTF-8 text with any byte order mark removed
fn utf8_text(data: &[u8]) -> Result<&str> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    std::str::from_utf8(data).context("Configuration data is not valid UTF-8")
}

/// Indented JSON (the default format)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonSerializer {
    pub pretty: bool,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ConfigSerializer for JsonSerializer {
    fn file_extension(&self) -> &'static str {
        JSON_EXTENSION
    }

    fn serialize<T: Serialize>(&self, config: &T) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(config)
        } else {
            serde_json::to_vec(config)
        };
        bytes.context("Failed to serialize configuration to JSON")
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        serde_json::from_str(utf8_text(data)?).context("Failed to parse JSON configuration")
    }
}

/// Indented XML under a configurable root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlSerializer {
    pub root: String,
}

impl Default for XmlSerializer {
    fn default() -> Self {
        Self {
            root: DEFAULT_XML_ROOT.to_string(),
        }
    }
}

impl XmlSerializer {
    pub fn with_root(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }
}

impl ConfigSerializer for XmlSerializer {
    fn file_extension(&self) -> &'static str {
        XML_EXTENSION
    }

    fn serialize<T: Serialize>(&self, config: &T) -> Result<Vec<u8>> {
        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some(&self.root))
            .with_context(|| format!("Invalid XML root element name {:?}", self.root))?;
        serializer.indent(' ', 2);
        config
            .serialize(serializer)
            .context("Failed to serialize configuration to XML")?;
        Ok(format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n{body}\n").into_bytes())
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        quick_xml::de::from_str(utf8_text(data)?).context("Failed to parse XML configuration")
    }
}

/// TOML, as used by hand-edited settings files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TomlSerializer;

impl ConfigSerializer for TomlSerializer {
    fn file_extension(&self) -> &'static str {
        TOML_EXTENSION
    }

    fn serialize<T: Serialize>(&self, config: &T) -> Result<Vec<u8>> {
        toml::to_string_pretty(config)
            .map(String::into_bytes)
            .context("Failed to serialize configuration to TOML")
    }

    fn deserialize<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        toml::from_str(utf8_text(data)?).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        port: u16,
        enabled: bool,
        ratio: f64,
        #[serde(default)]
        tags: Vec<String>,
    }

    fn sample() -> Sample {
        Sample {
            name: "primary".to_string(),
            port: 8080,
            enabled: true,
            ratio: 0.5,
            tags: vec!["alpha".to_string(), "beta".to_string()],
        }
    }

    #[test]
    fn test_json_round_trip_is_indented() {
        let bytes = JsonSerializer::default().serialize(&sample()).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("\n  \"name\": \"primary\""));
        let back: Sample = JsonSerializer::default().deserialize(&bytes).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_json_tolerates_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(br#"{"name":"x","port":1,"enabled":false,"ratio":1.0}"#);
        let parsed: Sample = JsonSerializer::default().deserialize(&bytes).unwrap();
        assert_eq!(parsed.name, "x");
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn test_xml_round_trip_uses_root() {
        let serializer = XmlSerializer::with_root("Settings");
        let bytes = serializer.serialize(&sample()).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("<?xml"));
        assert!(text.contains("<Settings>"));
        assert!(text.contains("<port>8080</port>"));
        let back: Sample = serializer.deserialize(&bytes).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_toml_round_trip() {
        let bytes = TomlSerializer.serialize(&sample()).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("port = 8080"));
        let back: Sample = TomlSerializer.deserialize(&bytes).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        assert!(JsonSerializer::default().deserialize::<Sample>(b"{not json").is_err());
        assert!(TomlSerializer.deserialize::<Sample>(&[0xff, 0xfe]).is_err());
        assert!(XmlSerializer::default().deserialize::<Sample>(b"<Configuration><port>x</port>").is_err());
    }

    #[test]
    fn test_extensions() {
        assert_eq!(JsonSerializer::default().file_extension(), ".json");
        assert_eq!(XmlSerializer::default().file_extension(), ".xml");
        assert_eq!(TomlSerializer.file_extension(), ".toml");
    }
}
