pub mod path;


use std::{
    borrow::Cow,
    io::{self, Read},
    path::{Path, PathBuf},
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fixup::{BusType, DeviceId, ReportFixup};

use self::path::{get_fixups_paths, get_multidir_sorted_files};

/// Value of the `kind` field for report fixup configs
pub const REPORT_FIXUP_KIND: &str = "ReportFixup";

/// Represents all possible errors loading a [ReportFixupConfig]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Loads all report fixup configs from the given directories followed by the
/// default locations, sorted by file name, and returns the resulting fixups.
/// Files that fail to load are skipped with a warning.
pub fn load_fixups(extra_paths: &[PathBuf]) -> Vec<ReportFixup> {
    let mut paths = extra_paths.to_vec();
    paths.extend(get_fixups_paths());
    let files = get_multidir_sorted_files(paths.as_slice(), |entry| {
        entry
            .path()
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml")
    });

    let mut fixups = Vec::new();
    for file in files {
        log::trace!("Found file: {}", file.display());
        let config = match ReportFixupConfig::from_yaml_file(&file) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to parse report fixup {}: {e}", file.display());
                continue;
            }
        };
        match ReportFixup::try_from(config) {
            Ok(fixup) => {
                log::debug!("Loaded report fixup '{}' from {}", fixup.name, file.display());
                fixups.push(fixup);
            }
            Err(e) => log::warn!("Invalid report fixup {}: {e}", file.display()),
        }
    }

    fixups
}

/// Defines a device that ships a faulty report descriptor
#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct DeviceMatch {
    /// Bus the device enumerates on: "usb", "bluetooth" or a numeric bus type
    pub bus: String,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceMatch {
    pub fn to_device_id(&self) -> Result<DeviceId, LoadError> {
        let bus: BusType = self.bus.parse().map_err(LoadError::Invalid)?;
        Ok(DeviceId::new(bus, self.vendor_id, self.product_id))
    }
}

/// [ReportFixupConfig] defines a known-faulty report descriptor and the
/// corrected descriptor that replaces it.
#[derive(Debug, Deserialize, Serialize, Clone, JsonSchema, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ReportFixupConfig {
    pub version: u32,
    pub kind: String,
    pub name: String,
    pub matches: Vec<DeviceMatch>,
    /// Known lengths of the faulty report descriptor
    pub original_lengths: Vec<usize>,
    /// Number of leading bytes the faulty descriptor shares with the fixed one
    pub fingerprint_length: usize,
    /// The corrected report descriptor
    pub report_descriptor: Vec<u8>,
}

impl ReportFixupConfig {
    /// Load a [ReportFixupConfig] from the given YAML string
    pub fn from_yaml(content: String) -> Result<Self, LoadError> {
        let config: ReportFixupConfig = serde_yaml::from_str(content.as_str())?;
        Ok(config)
    }

    /// Load a [ReportFixupConfig] from the given YAML file
    pub fn from_yaml_file<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let mut file = std::fs::File::open(path)?;
        let mut content = String::default();
        file.read_to_string(&mut content)?;
        Self::from_yaml(content)
    }
}

impl TryFrom<ReportFixupConfig> for ReportFixup {
    type Error = LoadError;

    fn try_from(config: ReportFixupConfig) -> Result<Self, Self::Error> {
        if config.kind != REPORT_FIXUP_KIND {
            return Err(LoadError::Invalid(format!(
                "Unsupported kind '{}', expected '{REPORT_FIXUP_KIND}'",
                config.kind
            )));
        }
        if config.version != 1 {
            return Err(LoadError::Invalid(format!(
                "Unsupported version {}",
                config.version
            )));
        }

        let matches = config
            .matches
            .iter()
            .map(DeviceMatch::to_device_id)
            .collect::<Result<Vec<_>, _>>()?;

        let fixup = ReportFixup {
            name: Cow::Owned(config.name),
            matches: Cow::Owned(matches),
            original_lengths: Cow::Owned(config.original_lengths),
            fingerprint_len: config.fingerprint_length,
            rdesc: Cow::Owned(config.report_descriptor),
        };
        fixup.validate().map_err(LoadError::Invalid)?;

        Ok(fixup)
    }
}
