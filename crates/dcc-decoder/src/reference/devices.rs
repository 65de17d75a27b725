//! Rapid antigen test device registry (HSC common list export).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRegistry {
    pub extracted_on: String,
    #[serde(rename = "deviceList")]
    pub device_list: Vec<RapidAntigenTestDevice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RapidAntigenTestDevice {
    pub id_device: String,
    pub commercial_name: String,
    pub manufacturer: DeviceManufacturer,
    pub hsc_common_list: bool,
    pub hsc_mutual_recognition: bool,
    pub last_updated: String,
    #[serde(default)]
    pub hsc_list_history: Vec<HscListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceManufacturer {
    pub id_manufacturer: String,
    pub name: String,
    pub country: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HscListEntry {
    pub list_date: String,
    pub in_common_list: bool,
    pub in_mutual_recognition: bool,
}

impl DeviceRegistry {
    pub(crate) const FILE_NAME: &'static str = "hsc-common-recognition-rat.json";

    pub(crate) fn bundled_json() -> &'static str {
        include_str!("../../data/devices/hsc-common-recognition-rat.json")
    }

    /// First device whose id matches. The export is not deduplicated.
    pub fn find(&self, id: &str) -> Option<&RapidAntigenTestDevice> {
        self.device_list.iter().find(|d| d.id_device == id)
    }
}
