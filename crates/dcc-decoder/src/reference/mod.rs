//! Reference data: value sets, the country table and the test device
//! registry.
//!
//! A copy of every table is compiled into the crate. [`ReferenceData::from_dir`]
//! overlays newer exports from disk, file by file, so a deployment can
//! refresh one table without shipping all of them.

mod devices;
mod value_set;

pub use devices::{DeviceManufacturer, DeviceRegistry, HscListEntry, RapidAntigenTestDevice};
pub use value_set::{ResolvedCode, ValueSet, ValueSetEntry, ValueSetId};

use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

const COUNTRY_FILE: &str = "country-2-codes.json";
const VALUE_SET_DIR: &str = "valuesets";
const DEVICE_DIR: &str = "devices";

/// Lookups the certificate resolver needs. Implementations must be safe to
/// share across threads; a single instance usually serves every decode.
pub trait ReferenceLookup: Send + Sync {
    /// Resolve `code` in `set`. Never fails: an unknown code comes back as an
    /// inactive entry whose display is the code itself.
    fn resolve(&self, set: ValueSetId, code: &str, lang: &str) -> ResolvedCode;

    /// English short name for an ISO 3166-1 alpha-2 code.
    fn country_name(&self, code: &str) -> Option<&str>;

    /// Registry entry for a rapid antigen test device id.
    fn test_device(&self, id: &str) -> Option<&RapidAntigenTestDevice>;
}

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("failed to read reference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reference table {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// In-memory reference tables.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    value_sets: HashMap<ValueSetId, ValueSet>,
    countries: BTreeMap<String, String>,
    devices: DeviceRegistry,
}

impl ReferenceData {
    /// Tables compiled into the crate.
    pub fn bundled() -> Result<Self, ReferenceError> {
        let mut value_sets = HashMap::new();
        for id in ValueSetId::ALL {
            value_sets.insert(id, parse(id.file_name(), id.bundled_json())?);
        }
        Ok(Self {
            value_sets,
            countries: parse(COUNTRY_FILE, include_str!("../../data/country-2-codes.json"))?,
            devices: parse(DeviceRegistry::FILE_NAME, DeviceRegistry::bundled_json())?,
        })
    }

    /// Load tables from `dir`, falling back to the bundled copy for each file
    /// that is not present.
    ///
    /// Layout: `valuesets/<name>.json`, `country-2-codes.json`,
    /// `devices/hsc-common-recognition-rat.json`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let dir = dir.as_ref();
        let mut data = Self::bundled()?;

        for id in ValueSetId::ALL {
            let path = dir.join(VALUE_SET_DIR).join(id.file_name());
            if let Some(set) = load_optional(&path)? {
                data.value_sets.insert(id, set);
            }
        }
        if let Some(countries) = load_optional(&dir.join(COUNTRY_FILE))? {
            data.countries = countries;
        }
        let device_path = dir.join(DEVICE_DIR).join(DeviceRegistry::FILE_NAME);
        if let Some(devices) = load_optional(&device_path)? {
            data.devices = devices;
        }

        Ok(data)
    }

    pub fn value_set(&self, id: ValueSetId) -> Option<&ValueSet> {
        self.value_sets.get(&id)
    }

    pub fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }
}

impl ReferenceLookup for ReferenceData {
    fn resolve(&self, set: ValueSetId, code: &str, lang: &str) -> ResolvedCode {
        match self.value_sets.get(&set).and_then(|s| s.get(code)) {
            Some(entry) => ResolvedCode::from_entry(code, entry),
            None => {
                tracing::warn!(value_set = %set, code, "code not found in value set");
                ResolvedCode::unknown(code, lang)
            }
        }
    }

    fn country_name(&self, code: &str) -> Option<&str> {
        self.countries.get(code).map(String::as_str)
    }

    fn test_device(&self, id: &str) -> Option<&RapidAntigenTestDevice> {
        self.devices.find(id)
    }
}

fn parse<T: DeserializeOwned>(name: &str, json: &str) -> Result<T, ReferenceError> {
    serde_json::from_str(json).map_err(|source| ReferenceError::Parse {
        name: name.to_string(),
        source,
    })
}

fn load_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ReferenceError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ReferenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    tracing::debug!(path = %path.display(), "loading reference table override");
    parse(&path.display().to_string(), &json).map(Some)
}
