//! Registration validation shared by pre-flight and authoritative callers.
//!
//! Every per-field rule runs, so a caller sees all failing fields at once.
//! Within a single field the first violated rule wins. The email/domain
//! relationship is checked only when both fields are individually well
//! formed, and its failure is reported on the email field.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use unicred_canonical::{AisheCode, EmailAddress, ValidationError, WalletAddress, WebsiteDomain};

use crate::registration::{NormalizedCandidate, RegistrationCandidate, Region, UniversityType};

/// Legal name length bounds, in characters.
pub const LEGAL_NAME_MIN: usize = 3;
/// Upper bound for the legal name.
pub const LEGAL_NAME_MAX: usize = 255;
/// Upper bound for the UGC reference.
pub const UGC_REFERENCE_MAX: usize = 255;

/// Email domain suffixes accepted even when they differ from the website domain.
pub const ACADEMIC_EMAIL_SUFFIXES: [&str; 2] = [".edu.in", ".ac.in"];

/// User-facing messages, one per rule.
pub mod messages {
    #![allow(missing_docs)]
    pub const LEGAL_NAME_TOO_SHORT: &str = "University legal name must be at least 3 characters";
    pub const LEGAL_NAME_TOO_LONG: &str = "University legal name must not exceed 255 characters";
    pub const INVALID_TYPE: &str = "Please select a valid university type";
    pub const INVALID_STATE: &str = "Please select a valid Indian state or union territory";
    pub const UGC_REFERENCE_TOO_LONG: &str = "UGC reference must not exceed 255 characters";
    pub const INVALID_AISHE_CODE: &str = "AISHE code must follow pattern: A-123456";
    pub const DOMAIN_REQUIRED: &str = "Website domain is required";
    pub const INVALID_DOMAIN: &str = "Please enter a valid domain (e.g., example.edu.in)";
    pub const EMAIL_REQUIRED: &str = "Registrar email is required";
    pub const INVALID_EMAIL: &str = "Please enter a valid email address";
    pub const EMAIL_DOMAIN_MISMATCH: &str =
        "Registrar email must match university domain, end with .edu.in, or .ac.in";
    pub const WALLET_REQUIRED: &str = "Wallet address is required";
    pub const INVALID_WALLET: &str =
        "Invalid wallet address. Must be a valid Ethereum address (0x...)";
}

/// Registration fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// `legalName`
    LegalName,
    /// `type`
    #[serde(rename = "type")]
    Type,
    /// `state`
    State,
    /// `ugcReference`
    UgcReference,
    /// `aisheCode`
    AisheCode,
    /// `websiteDomain`
    WebsiteDomain,
    /// `registrarOfficialEmail`
    RegistrarOfficialEmail,
    /// `walletAddress`
    WalletAddress,
}

impl Field {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::LegalName => "legalName",
            Field::Type => "type",
            Field::State => "state",
            Field::UgcReference => "ugcReference",
            Field::AisheCode => "aisheCode",
            Field::WebsiteDomain => "websiteDomain",
            Field::RegistrarOfficialEmail => "registrarOfficialEmail",
            Field::WalletAddress => "walletAddress",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// At most one message per [`Field`].
///
/// Serializes as `{"<field>": "<message>", ...}` in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    entries: BTreeMap<Field, String>,
}

impl FieldErrors {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless the field already has one.
    pub fn reject(&mut self, field: Field, message: impl Into<String>) {
        self.entries.entry(field).or_insert_with(|| message.into());
    }

    /// Message for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    /// Whether `field` failed.
    pub fn contains(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Failing fields and their messages in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field.as_str(), message)?;
        }
        map.end()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validates a raw registration.
///
/// # Example
///
/// ```rust
/// use unicred_core::{validate, Field, RegistrationCandidate};
///
/// let candidate = RegistrationCandidate {
///     legal_name: "Indian Institute of Technology Bombay".into(),
///     kind: "CENTRAL".into(),
///     state: "Maharashtra".into(),
///     website_domain: "IITB.ac.in".into(),
///     registrar_official_email: "registrar@iitb.ac.in".into(),
///     wallet_address: "0xABCDEF0123456789abcdef0123456789ABCDEF01".into(),
///     ..Default::default()
/// };
/// let normalized = validate(&candidate).expect("valid");
/// assert_eq!(normalized.website_domain.as_str(), "iitb.ac.in");
///
/// let mut broken = candidate.clone();
/// broken.registrar_official_email = "someone@gmail.com".into();
/// let errors = validate(&broken).unwrap_err();
/// assert!(errors.contains(Field::RegistrarOfficialEmail));
/// ```
pub fn validate(candidate: &RegistrationCandidate) -> Result<NormalizedCandidate, FieldErrors> {
    let mut errors = FieldErrors::new();

    let legal_name_len = candidate.legal_name.chars().count();
    if legal_name_len < LEGAL_NAME_MIN {
        errors.reject(Field::LegalName, messages::LEGAL_NAME_TOO_SHORT);
    } else if legal_name_len > LEGAL_NAME_MAX {
        errors.reject(Field::LegalName, messages::LEGAL_NAME_TOO_LONG);
    }

    let kind = candidate.kind.parse::<UniversityType>().ok();
    if kind.is_none() {
        errors.reject(Field::Type, messages::INVALID_TYPE);
    }

    let state = candidate.state.parse::<Region>().ok();
    if state.is_none() {
        errors.reject(Field::State, messages::INVALID_STATE);
    }

    let ugc_reference = non_blank(candidate.ugc_reference.as_deref());
    if let Some(reference) = ugc_reference {
        if reference.chars().count() > UGC_REFERENCE_MAX {
            errors.reject(Field::UgcReference, messages::UGC_REFERENCE_TOO_LONG);
        }
    }

    let aishe_code = match non_blank(candidate.aishe_code.as_deref()) {
        None => None,
        Some(code) => match AisheCode::parse(code) {
            Ok(code) => Some(code),
            Err(_) => {
                errors.reject(Field::AisheCode, messages::INVALID_AISHE_CODE);
                None
            }
        },
    };

    let website_domain = match WebsiteDomain::parse(candidate.website_domain.as_str()) {
        Ok(domain) => Some(domain),
        Err(ValidationError::Empty { .. } | ValidationError::LengthOutOfBounds { .. }) => {
            errors.reject(Field::WebsiteDomain, messages::DOMAIN_REQUIRED);
            None
        }
        Err(_) => {
            errors.reject(Field::WebsiteDomain, messages::INVALID_DOMAIN);
            None
        }
    };

    let email = match EmailAddress::parse(candidate.registrar_official_email.as_str()) {
        Ok(email) => Some(email),
        Err(ValidationError::Empty { .. }) => {
            errors.reject(Field::RegistrarOfficialEmail, messages::EMAIL_REQUIRED);
            None
        }
        Err(_) => {
            errors.reject(Field::RegistrarOfficialEmail, messages::INVALID_EMAIL);
            None
        }
    };

    if let (Some(domain), Some(email)) = (&website_domain, &email) {
        if !email_domain_allowed(email, domain) {
            errors.reject(Field::RegistrarOfficialEmail, messages::EMAIL_DOMAIN_MISMATCH);
        }
    }

    let wallet_address = match WalletAddress::parse(candidate.wallet_address.as_str()) {
        Ok(wallet) => Some(wallet),
        Err(ValidationError::Empty { .. }) => {
            errors.reject(Field::WalletAddress, messages::WALLET_REQUIRED);
            None
        }
        Err(_) => {
            errors.reject(Field::WalletAddress, messages::INVALID_WALLET);
            None
        }
    };

    match (kind, state, website_domain, email, wallet_address) {
        (Some(kind), Some(state), Some(website_domain), Some(email), Some(wallet_address))
            if errors.is_empty() =>
        {
            Ok(NormalizedCandidate {
                legal_name: candidate.legal_name.clone(),
                kind,
                state,
                ugc_reference: ugc_reference.map(str::to_string),
                aishe_code,
                website_domain,
                registrar_official_email: email,
                wallet_address,
            })
        }
        _ => Err(errors),
    }
}

/// Cross-field rule: the email domain equals the website domain or is an
/// Indian academic domain. Both inputs are already lowercase.
pub fn email_domain_allowed(email: &EmailAddress, domain: &WebsiteDomain) -> bool {
    let email_domain = email.domain();
    email_domain == domain.as_str()
        || ACADEMIC_EMAIL_SUFFIXES
            .iter()
            .any(|suffix| email_domain.ends_with(suffix))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
