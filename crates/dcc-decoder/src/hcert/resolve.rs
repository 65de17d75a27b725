use super::fields::Fields;
use super::{
    Certificate, CertificateKind, HealthCertificate, Person, RecoveryGroup, TestGroup,
    VaccinationGroup,
};
use crate::cbor;
use crate::document::CertificateDocument;
use crate::error::{DecodeError, DecodeResult, ErrorCode, Stage};
use crate::reference::{ReferenceLookup, ResolvedCode, ValueSetId};
use chrono::{DateTime, FixedOffset};
use ciborium::value::Value;

const SCHEMA_VERSION: &str = "ver";

/// Build the typed certificate from a decoded payload.
pub fn resolve_certificate(
    document: &CertificateDocument,
    reference: &dyn ReferenceLookup,
    lang: &str,
) -> DecodeResult<Certificate> {
    let body = Fields::new("", document.hcert_body()?);

    let schema_version = match body.get(SCHEMA_VERSION) {
        None => {
            return Err(DecodeError::new(
                Stage::Certificate,
                ErrorCode::UnrecognizedSchema,
                "certificate body has no schema version",
            ))
        }
        Some(_) => body.text(SCHEMA_VERSION)?.to_string(),
    };
    if !schema_version.starts_with("1.") {
        tracing::debug!(%schema_version, "schema version outside the 1.x line");
    }

    let person = person(&body)?;
    let (kind, entry) = select_group(&body)?;

    let path = format!("{}[0]", kind.key());
    let group = match entry {
        Value::Map(entries) => Fields::new(&path, entries),
        other => {
            return Err(DecodeError::new(
                Stage::Certificate,
                ErrorCode::InvalidField,
                format!("field '{}' is not a map (found {})", path, cbor::kind(other)),
            ))
        }
    };

    let resolver = Resolver { reference, lang };
    let certificate = match kind {
        CertificateKind::Vaccination => Certificate::Vaccination(HealthCertificate {
            schema_version,
            person,
            group: resolver.vaccination(&group)?,
        }),
        CertificateKind::Test => Certificate::Test(HealthCertificate {
            schema_version,
            person,
            group: resolver.test(&group)?,
        }),
        CertificateKind::Recovery => Certificate::Recovery(HealthCertificate {
            schema_version,
            person,
            group: resolver.recovery(&group)?,
        }),
    };

    tracing::debug!(
        kind = %certificate.kind(),
        schema_version = certificate.schema_version(),
        "resolved certificate body"
    );
    Ok(certificate)
}

/// Parse a sample collection time: ISO 8601 date-time with an explicit
/// offset (`Z`, `+hh`, `+hhmm` or `+hh:mm`), optional fractional seconds.
pub fn parse_sample_time(value: &str) -> DecodeResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%#z"))
        .map_err(|e| {
            DecodeError::new(
                Stage::Certificate,
                ErrorCode::InvalidTimestamp,
                format!("'{}' is not a date-time with offset: {}", value, e),
            )
            .with_source(e)
        })
}

fn person(body: &Fields<'_>) -> DecodeResult<Person> {
    let nam = Fields::new("nam", body.map("nam")?);
    Ok(Person {
        family_name: nam.opt_text("fn")?.map(str::to_string),
        family_name_standardised: nam.text("fnt")?.to_string(),
        given_name: nam.opt_text("gn")?.map(str::to_string),
        given_name_standardised: nam.opt_text("gnt")?.map(str::to_string),
        date_of_birth: body.text("dob")?.to_string(),
    })
}

// Exactly one of v/t/r may hold entries. Empty arrays count as absent.
fn select_group<'a>(body: &Fields<'a>) -> DecodeResult<(CertificateKind, &'a Value)> {
    let mut present = Vec::with_capacity(1);
    for kind in [
        CertificateKind::Vaccination,
        CertificateKind::Test,
        CertificateKind::Recovery,
    ] {
        let Some(items) = body.opt_array(kind.key())? else {
            continue;
        };
        if items.len() > 1 {
            tracing::debug!(group = kind.key(), entries = items.len(), "reading first entry only");
        }
        if let Some(first) = items.first() {
            present.push((kind, first));
        }
    }

    match present.as_slice() {
        [] => Err(DecodeError::new(
            Stage::Certificate,
            ErrorCode::UnknownCertificateVariant,
            "certificate body has no vaccination, test or recovery entry",
        )),
        [single] => Ok(*single),
        several => {
            let keys: Vec<&str> = several.iter().map(|(kind, _)| kind.key()).collect();
            Err(DecodeError::new(
                Stage::Certificate,
                ErrorCode::AmbiguousCertificateVariant,
                format!("certificate body has entries for {}", keys.join(", ")),
            ))
        }
    }
}

struct Resolver<'r> {
    reference: &'r dyn ReferenceLookup,
    lang: &'r str,
}

impl Resolver<'_> {
    fn code(&self, group: &Fields<'_>, key: &str, set: ValueSetId) -> DecodeResult<ResolvedCode> {
        let code = group.text(key)?;
        Ok(self.reference.resolve(set, code, self.lang))
    }

    fn country(&self, code: &str) -> Option<String> {
        let name = self.reference.country_name(code);
        if name.is_none() {
            tracing::debug!(code, "unknown country code");
        }
        name.map(str::to_string)
    }

    fn vaccination(&self, g: &Fields<'_>) -> DecodeResult<VaccinationGroup> {
        let country_code = g.text("co")?.to_string();
        Ok(VaccinationGroup {
            disease: self.code(g, "tg", ValueSetId::DiseaseAgentTargeted)?,
            vaccine_or_prophylaxis: self.code(g, "vp", ValueSetId::VaccineProphylaxis)?,
            vaccine_product: self.code(g, "mp", ValueSetId::VaccineMedicinalProduct)?,
            vaccine_manufacturer: self.code(g, "ma", ValueSetId::VaccineManufacturer)?,
            dose_number: g.uint("dn")?,
            total_doses: g.uint("sd")?,
            vaccination_date: g.text("dt")?.to_string(),
            country: self.country(&country_code),
            country_code,
            certificate_issuer: g.text("is")?.to_string(),
            certificate_id: g.text("ci")?.to_string(),
        })
    }

    fn test(&self, g: &Fields<'_>) -> DecodeResult<TestGroup> {
        let device_id = g.non_empty_text("ma")?;
        let test_device = device_id.and_then(|id| {
            let device = self.reference.test_device(id).cloned();
            if device.is_none() {
                tracing::debug!(device_id = id, "test device not in registry");
            }
            device
        });
        let sample_collected_at = parse_sample_time(g.text("sc")?)
            .map_err(|e| e.with_context(g.path("sc")))?;
        let country_code = g.text("co")?.to_string();

        Ok(TestGroup {
            disease: self.code(g, "tg", ValueSetId::DiseaseAgentTargeted)?,
            test_type: self.code(g, "tt", ValueSetId::TestType)?,
            test_name: g.non_empty_text("nm")?.map(str::to_string),
            device_id: device_id.map(str::to_string),
            test_device,
            sample_collected_at,
            test_result: self.code(g, "tr", ValueSetId::TestResult)?,
            testing_centre: g.non_empty_text("tc")?.map(str::to_string),
            country: self.country(&country_code),
            country_code,
            certificate_issuer: g.text("is")?.to_string(),
            certificate_id: g.text("ci")?.to_string(),
        })
    }

    fn recovery(&self, g: &Fields<'_>) -> DecodeResult<RecoveryGroup> {
        let country_code = g.text("co")?.to_string();
        Ok(RecoveryGroup {
            disease: self.code(g, "tg", ValueSetId::DiseaseAgentTargeted)?,
            first_positive_test_date: g.text("fr")?.to_string(),
            country: self.country(&country_code),
            country_code,
            certificate_issuer: g.text("is")?.to_string(),
            valid_from: g.opt_text("df")?.map(str::to_string),
            valid_until: g.opt_text("du")?.map(str::to_string),
            certificate_id: g.text("ci")?.to_string(),
        })
    }
}
