//! Blob locations
//!
//! Commands read and write blob text through [`BlobStore`] and never learn
//! whether it lives in a file or in a versioned registry value.
//!
//! Location syntax:
//!
//! ```text
//! path/to/blob.json   a file
//! reg:                the highest installed Araxis Merge version
//! reg:2024.5909       exactly that version
//! ```
//!
//! A load followed by a store is not transactional. Another process writing
//! the same registry value between the two can lose its update.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Prefix selecting a registry location.
pub const REGISTRY_SCHEME: &str = "reg:";

/// Registry key holding one subkey per installed Araxis Merge version.
pub const REGISTRY_ROOT: &str = r"Software\Araxis\Merge";

/// Load/store capability for blob text.
pub trait BlobStore {
    /// Human-readable location, for messages.
    fn describe(&self) -> String;

    /// Read the blob text. `None` when the location holds nothing.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the blob text.
    fn store(&self, text: &str) -> Result<()>;
}

/// Versioned registry access, provided by the platform layer.
pub trait RegistryBackend {
    /// Version subkeys present under [`REGISTRY_ROOT`].
    fn installed_versions(&self) -> Result<Vec<String>>;

    fn read(&self, version: &str) -> Result<Option<String>>;

    fn write(&self, version: &str, text: &str) -> Result<()>;
}

/// Where a blob lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Registry { version: Option<String> },
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.strip_prefix(REGISTRY_SCHEME) {
            Some(version) => {
                let version = version.trim();
                Location::Registry {
                    version: (!version.is_empty()).then(|| version.to_string()),
                }
            }
            None => Location::File(PathBuf::from(s)),
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Registry { version: Some(v) } => write!(f, "{REGISTRY_SCHEME}{v}"),
            Location::Registry { version: None } => write!(f, "{REGISTRY_SCHEME}"),
        }
    }
}

impl Location {
    /// Bind this location to a store.
    ///
    /// Registry locations need a `registry` backend; without one they fail
    /// with [`Error::RegistryUnavailable`].
    pub fn open(&self, registry: Option<Box<dyn RegistryBackend>>) -> Result<Box<dyn BlobStore>> {
        match self {
            Location::File(path) => Ok(Box::new(FileStore::new(path.clone()))),
            Location::Registry { version } => {
                let backend = registry.ok_or_else(|| Error::RegistryUnavailable {
                    location: self.to_string(),
                })?;
                Ok(Box::new(RegistryStore::open(backend, version.as_deref())?))
            }
        }
    }
}

/// Blob text in a file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BlobStore for FileStore {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(&self.path, e)),
        }
    }

    fn store(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&self.path, text).map_err(|e| Error::io(&self.path, e))
    }
}

/// Blob text in the registry value of one Araxis Merge version.
pub struct RegistryStore {
    backend: Box<dyn RegistryBackend>,
    version: String,
}

impl RegistryStore {
    /// Resolve `requested` (or the highest installed version) against the backend.
    pub fn open(backend: Box<dyn RegistryBackend>, requested: Option<&str>) -> Result<Self> {
        let installed = backend.installed_versions()?;
        let version = select_version(&installed, requested)?;
        Ok(Self { backend, version })
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl BlobStore for RegistryStore {
    fn describe(&self) -> String {
        format!("{REGISTRY_SCHEME}{}", self.version)
    }

    fn load(&self) -> Result<Option<String>> {
        self.backend.read(&self.version)
    }

    fn store(&self, text: &str) -> Result<()> {
        self.backend.write(&self.version, text)
    }
}

/// Pick a version: exactly `requested` if given, else the highest installed.
pub fn select_version(installed: &[String], requested: Option<&str>) -> Result<String> {
    match requested {
        Some(version) => installed
            .iter()
            .find(|v| v.as_str() == version)
            .cloned()
            .ok_or_else(|| Error::VersionNotInstalled {
                version: version.to_string(),
            }),
        None => installed
            .iter()
            .max_by(|a, b| compare_versions(a, b))
            .cloned()
            .ok_or_else(|| Error::SourceNotFound {
                location: format!("{REGISTRY_SCHEME} (no Araxis Merge version under {REGISTRY_ROOT})"),
            }),
    }
}

/// Compare dotted versions numerically, component by component.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    _ => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
