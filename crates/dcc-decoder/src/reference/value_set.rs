//! Coded value sets in the EU `valueSetValues` JSON layout.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The value sets a certificate body refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueSetId {
    DiseaseAgentTargeted,
    VaccineProphylaxis,
    VaccineMedicinalProduct,
    VaccineManufacturer,
    TestType,
    TestResult,
}

impl ValueSetId {
    pub const ALL: [ValueSetId; 6] = [
        Self::DiseaseAgentTargeted,
        Self::VaccineProphylaxis,
        Self::VaccineMedicinalProduct,
        Self::VaccineManufacturer,
        Self::TestType,
        Self::TestResult,
    ];

    /// File name under a reference directory's `valuesets/` folder.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::DiseaseAgentTargeted => "disease-agent-targeted.json",
            Self::VaccineProphylaxis => "vaccine-prophylaxis.json",
            Self::VaccineMedicinalProduct => "vaccine-medicinal-product.json",
            Self::VaccineManufacturer => "vaccine-mah-manf.json",
            Self::TestType => "test-type.json",
            Self::TestResult => "test-result.json",
        }
    }

    pub(crate) fn bundled_json(self) -> &'static str {
        match self {
            Self::DiseaseAgentTargeted => {
                include_str!("../../data/valuesets/disease-agent-targeted.json")
            }
            Self::VaccineProphylaxis => include_str!("../../data/valuesets/vaccine-prophylaxis.json"),
            Self::VaccineMedicinalProduct => {
                include_str!("../../data/valuesets/vaccine-medicinal-product.json")
            }
            Self::VaccineManufacturer => include_str!("../../data/valuesets/vaccine-mah-manf.json"),
            Self::TestType => include_str!("../../data/valuesets/test-type.json"),
            Self::TestResult => include_str!("../../data/valuesets/test-result.json"),
        }
    }
}

impl std::fmt::Display for ValueSetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.file_name().trim_end_matches(".json");
        f.write_str(name)
    }
}

/// One published value set.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueSet {
    #[serde(rename = "valueSetId")]
    pub id: String,
    #[serde(rename = "valueSetDate")]
    pub date: String,
    #[serde(rename = "valueSetValues")]
    pub values: BTreeMap<String, ValueSetEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueSetEntry {
    pub display: String,
    pub lang: String,
    pub active: bool,
    pub system: String,
    pub version: String,
}

/// A code together with its human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCode {
    pub code: String,
    pub display: String,
    pub lang: String,
    pub active: bool,
    pub system: String,
    pub version: String,
}

impl ResolvedCode {
    pub(crate) fn from_entry(code: &str, entry: &ValueSetEntry) -> Self {
        Self {
            code: code.to_string(),
            display: entry.display.clone(),
            lang: entry.lang.clone(),
            active: entry.active,
            system: entry.system.clone(),
            version: entry.version.clone(),
        }
    }

    /// Placeholder for a code the table does not know: the display falls
    /// back to the code itself and the entry is marked inactive.
    pub(crate) fn unknown(code: &str, lang: &str) -> Self {
        Self {
            code: code.to_string(),
            display: code.to_string(),
            lang: lang.to_string(),
            active: false,
            system: String::new(),
            version: String::new(),
        }
    }
}

impl ValueSet {
    pub fn get(&self, code: &str) -> Option<&ValueSetEntry> {
        self.values.get(code)
    }
}
