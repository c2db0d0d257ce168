//! Configuration for invoking the external xmlsec tool.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{XmlSecError, XmlSecResult};

/// Environment variable that overrides [`XmlSecConfig::binary`].
pub const BINARY_ENV: &str = "XMLSEC1_BINARY";

/// Default executable name, resolved through `PATH`.
pub const DEFAULT_BINARY: &str = "xmlsec1";

/// Default flag used to declare the ID attribute for Sign and Verify.
pub const DEFAULT_ID_ATTR_FLAG: &str = "--id-attr:ID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XmlSecConfig {
    /// Tool executable, either a bare name or a path
    pub binary: PathBuf,
    /// Directory for staged encryption templates (system temp dir if unset)
    pub temp_dir: Option<PathBuf>,
    /// Flag preceding the ID attribute owner on Sign and Verify
    pub id_attr_flag: String,
    /// Start the tool with an empty environment
    pub env_clear: bool,
}

impl Default for XmlSecConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl XmlSecConfig {
    #[cfg(feature = "toml")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> XmlSecResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            XmlSecError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        toml::from_str(&content).map_err(|e| XmlSecError::Config(e.to_string()))
    }

    /// Default configuration with the binary taken from `XMLSEC1_BINARY` when set.
    pub fn from_env() -> Self {
        let config = Self::default_config();
        match std::env::var_os(BINARY_ENV) {
            Some(binary) if !binary.is_empty() => config.with_binary(binary),
            _ => config,
        }
    }

    pub fn default_config() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
            temp_dir: None,
            id_attr_flag: DEFAULT_ID_ATTR_FLAG.to_string(),
            env_clear: false,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Human readable binary name for logs and errors.
    pub fn binary_name(&self) -> String {
        self.binary.display().to_string()
    }
}
