//! Typed configuration bound to a file

use std::fs;
use std::io::{Read, Write};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::paths::{configuration_filename, ConfigurationKind};
use super::serializer::{ConfigSerializer, JsonSerializer};

/// A configuration value of type `T` plus the file it is stored in
///
/// Loading never fails: a missing, unreadable or malformed file produces
/// `T::default()` and a warning. Saving reports errors to the caller.
#[derive(Debug, Clone)]
pub struct Configuration<T, S = JsonSerializer> {
    data: T,
    filename: PathBuf,
    serializer: S,
    kind: Option<ConfigurationKind>,
}

impl<T, S> Deref for Configuration<T, S> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T, S> DerefMut for Configuration<T, S> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T, S> Configuration<T, S>
where
    T: Serialize + DeserializeOwned + Default,
    S: ConfigSerializer,
{
    pub fn new(data: T, filename: impl Into<PathBuf>, serializer: S) -> Self {
        Self {
            data,
            filename: filename.into(),
            serializer,
            kind: None,
        }
    }

    /// Load `<org>/<app>/<name><ext>` from the standard location of `kind`
    pub fn load(kind: ConfigurationKind, organization: &str, app: &str, serializer: S, name: &str) -> Self {
        let path = configuration_filename(kind, organization, app, serializer.file_extension(), name);
        Self {
            kind: Some(kind),
            ..Self::load_from_file(path, serializer)
        }
    }

    pub fn load_from_file(path: impl Into<PathBuf>, serializer: S) -> Self {
        let path = path.into();
        let data = match read_existing(&path) {
            Some(bytes) => decode(&serializer, &bytes, &path),
            None => T::default(),
        };
        Self::new(data, path, serializer)
    }

    /// Decode a configuration from `reader`, falling back to `T::default()`
    pub fn load_from_reader(mut reader: impl Read, serializer: &S) -> T {
        let mut bytes = Vec::new();
        if let Err(e) = reader.read_to_end(&mut bytes) {
            warn!(error = %e, "Failed to read configuration stream, using defaults");
            return T::default();
        }
        decode(serializer, &bytes, Path::new("<stream>"))
    }

    pub async fn load_async(
        kind: ConfigurationKind,
        organization: &str,
        app: &str,
        serializer: S,
        name: &str,
    ) -> Self {
        let path = configuration_filename(kind, organization, app, serializer.file_extension(), name);
        Self {
            kind: Some(kind),
            ..Self::load_from_file_async(path, serializer).await
        }
    }

    pub async fn load_from_file_async(path: impl Into<PathBuf>, serializer: S) -> Self {
        let path = path.into();
        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => decode(&serializer, &bytes, &path),
            Err(e) => {
                report_read_failure(&path, &e);
                T::default()
            }
        };
        Self::new(data, path, serializer)
    }

    /// Write to the bound filename
    pub fn save(&self) -> Result<()> {
        self.save_to_file(&self.filename)
    }

    /// Write to `path`, creating parent directories as needed
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        fs::write(path, bytes).with_context(|| format!("Failed to write config file {:?}", path))?;

        info!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn save_to_writer(&self, mut writer: impl Write) -> Result<()> {
        let bytes = self.encode()?;
        writer.write_all(&bytes).context("Failed to write configuration stream")?;
        writer.flush().context("Failed to flush configuration stream")
    }

    pub async fn save_async(&self) -> Result<()> {
        self.save_to_file_async(&self.filename).await
    }

    pub async fn save_to_file_async(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        tokio::fs::write(path, bytes)
            .await
            .with_context(|| format!("Failed to write config file {:?}", path))?;

        info!("Saved config to {:?}", path);
        Ok(())
    }

    fn encode(&self) -> Result<Vec<u8>> {
        self.serializer
            .serialize(&self.data)
            .with_context(|| format!("Failed to encode configuration for {:?}", self.filename))
    }
}

impl<T, S> Configuration<T, S> {
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Rebind to another file; the next [`save`](Self::save) writes there
    pub fn set_filename(&mut self, filename: impl Into<PathBuf>) {
        self.filename = filename.into();
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Location class the configuration was loaded from; `None` for explicit paths
    pub fn kind(&self) -> Option<ConfigurationKind> {
        self.kind
    }
}

fn read_existing(path: &Path) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            report_read_failure(path, &e);
            None
        }
    }
}

fn report_read_failure(path: &Path, error: &std::io::Error) {
    if error.kind() == std::io::ErrorKind::NotFound {
        info!("Config file not found at {:?}, using defaults", path);
    } else {
        warn!(path = %path.display(), error = %error, "Failed to read config file, using defaults");
    }
}

fn decode<T, S>(serializer: &S, bytes: &[u8], path: &Path) -> T
where
    T: DeserializeOwned + Default,
    S: ConfigSerializer,
{
    match serializer.deserialize(bytes) {
        Ok(data) => {
            info!("Loaded config from {:?}", path);
            data
        }
        Err(e) => {
            warn!(path = %path.display(), error = %format!("{e:#}"), "Failed to parse config, using defaults");
            T::default()
        }
    }
}
