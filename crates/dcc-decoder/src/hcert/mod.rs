//! Typed EU Digital COVID Certificate bodies.
//!
//! A body holds exactly one of three groups (`v`, `t`, `r`); only the
//! first entry of that group is read. Coded values are resolved against
//! [`ReferenceLookup`](crate::reference::ReferenceLookup) tables while
//! building the typed form.

mod fields;
mod resolve;

pub use resolve::{parse_sample_time, resolve_certificate};

use crate::reference::{RapidAntigenTestDevice, ResolvedCode};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Which group a certificate carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateKind {
    Vaccination,
    Test,
    Recovery,
}

impl CertificateKind {
    /// Body key of the group.
    pub fn key(self) -> &'static str {
        match self {
            Self::Vaccination => "v",
            Self::Test => "t",
            Self::Recovery => "r",
        }
    }
}

impl std::fmt::Display for CertificateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Vaccination => "vaccination",
            Self::Test => "test",
            Self::Recovery => "recovery",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Certificate {
    Vaccination(HealthCertificate<VaccinationGroup>),
    Test(HealthCertificate<TestGroup>),
    Recovery(HealthCertificate<RecoveryGroup>),
}

impl Certificate {
    pub fn kind(&self) -> CertificateKind {
        match self {
            Self::Vaccination(_) => CertificateKind::Vaccination,
            Self::Test(_) => CertificateKind::Test,
            Self::Recovery(_) => CertificateKind::Recovery,
        }
    }

    pub fn schema_version(&self) -> &str {
        match self {
            Self::Vaccination(c) => &c.schema_version,
            Self::Test(c) => &c.schema_version,
            Self::Recovery(c) => &c.schema_version,
        }
    }

    pub fn person(&self) -> &Person {
        match self {
            Self::Vaccination(c) => &c.person,
            Self::Test(c) => &c.person,
            Self::Recovery(c) => &c.person,
        }
    }

    /// Unique certificate identifier (`ci`) of the group.
    pub fn certificate_id(&self) -> &str {
        match self {
            Self::Vaccination(c) => &c.group.certificate_id,
            Self::Test(c) => &c.group.certificate_id,
            Self::Recovery(c) => &c.group.certificate_id,
        }
    }
}

/// Common certificate fields plus the variant's group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthCertificate<G> {
    pub schema_version: String,
    pub person: Person,
    pub group: G,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    pub family_name_standardised: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name_standardised: Option<String>,
    /// ISO 8601 date, possibly truncated to `YYYY-MM` or `YYYY`.
    pub date_of_birth: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaccinationGroup {
    pub disease: ResolvedCode,
    pub vaccine_or_prophylaxis: ResolvedCode,
    pub vaccine_product: ResolvedCode,
    pub vaccine_manufacturer: ResolvedCode,
    pub dose_number: u32,
    pub total_doses: u32,
    pub vaccination_date: String,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub certificate_issuer: String,
    pub certificate_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestGroup {
    pub disease: ResolvedCode,
    pub test_type: ResolvedCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_name: Option<String>,
    /// Rapid antigen test device id (`ma`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_device: Option<RapidAntigenTestDevice>,
    pub sample_collected_at: DateTime<FixedOffset>,
    pub test_result: ResolvedCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub testing_centre: Option<String>,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub certificate_issuer: String,
    pub certificate_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryGroup {
    pub disease: ResolvedCode,
    pub first_positive_test_date: String,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub certificate_issuer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    pub certificate_id: String,
}
