use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicred_canonical::{AisheCode, EmailAddress, WalletAddress, WebsiteDomain};

/// Indian states and union territories accepted as a university's region.
pub const STATES_AND_UNION_TERRITORIES: [&str; 36] = [
    "Andaman and Nicobar Islands",
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chandigarh",
    "Chhattisgarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jammu and Kashmir",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Ladakh",
    "Lakshadweep",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Puducherry",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

/// Kind of university.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UniversityType {
    /// Central university.
    Central,
    /// State university.
    State,
    /// Private university.
    Private,
    /// Deemed-to-be university.
    Deemed,
}

impl UniversityType {
    /// All variants in declaration order.
    pub const ALL: [UniversityType; 4] = [
        UniversityType::Central,
        UniversityType::State,
        UniversityType::Private,
        UniversityType::Deemed,
    ];

    /// Wire name of the variant.
    pub fn as_str(self) -> &'static str {
        match self {
            UniversityType::Central => "CENTRAL",
            UniversityType::State => "STATE",
            UniversityType::Private => "PRIVATE",
            UniversityType::Deemed => "DEEMED",
        }
    }
}

impl FromStr for UniversityType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for UniversityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value that is not one of a closed set of names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct UnknownVariant(pub String);

/// One of [`STATES_AND_UNION_TERRITORIES`]. Matching is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Region(&'static str);

impl Region {
    /// Region name as listed.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl FromStr for Region {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STATES_AND_UNION_TERRITORIES
            .iter()
            .copied()
            .find(|name| *name == s)
            .map(Region)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(de::Error::custom)
    }
}

impl From<Region> for String {
    fn from(value: Region) -> Self {
        value.0.to_string()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Raw registration submission, exactly as received.
///
/// Every field is an untrusted string. Missing or `null` fields decode as
/// empty strings so the validator, not the JSON decoder, reports them.
/// Numbers and booleans decode as their JSON text; arrays and objects count
/// as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationCandidate {
    /// Legal name of the institution.
    #[serde(deserialize_with = "lenient::string")]
    pub legal_name: String,
    /// University type (`CENTRAL`, `STATE`, `PRIVATE`, `DEEMED`).
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    /// State or union territory.
    #[serde(deserialize_with = "lenient::string")]
    pub state: String,
    /// Optional UGC reference.
    #[serde(deserialize_with = "lenient::optional")]
    pub ugc_reference: Option<String>,
    /// Optional AISHE code.
    #[serde(deserialize_with = "lenient::optional")]
    pub aishe_code: Option<String>,
    /// Website domain.
    #[serde(deserialize_with = "lenient::string")]
    pub website_domain: String,
    /// Registrar's official email.
    #[serde(deserialize_with = "lenient::string")]
    pub registrar_official_email: String,
    /// Wallet address that will issue credentials.
    #[serde(deserialize_with = "lenient::string")]
    pub wallet_address: String,
}

/// Form fields arrive as whatever the client sent.
mod lenient {
    use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct FieldText;

    impl<'de> Visitor<'de> for FieldText {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a form field value")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(FieldText)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(d.deserialize_any(FieldText)?.unwrap_or_default())
    }

    pub fn optional<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        d.deserialize_any(FieldText)
    }
}

/// Registration that passed every validation rule.
///
/// Domain, email and wallet are lowercase; blank optional fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCandidate {
    /// Legal name, unchanged.
    pub legal_name: String,
    /// University type.
    #[serde(rename = "type")]
    pub kind: UniversityType,
    /// State or union territory.
    pub state: Region,
    /// UGC reference when present.
    pub ugc_reference: Option<String>,
    /// AISHE code when present.
    pub aishe_code: Option<AisheCode>,
    /// Lowercased website domain.
    pub website_domain: WebsiteDomain,
    /// Lowercased registrar email.
    pub registrar_official_email: EmailAddress,
    /// Lowercased wallet address.
    pub wallet_address: WalletAddress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_six_distinct_regions() {
        let mut names = STATES_AND_UNION_TERRITORIES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 36);
    }

    #[test]
    fn region_matching_is_exact() {
        assert_eq!("Kerala".parse::<Region>().unwrap().as_str(), "Kerala");
        assert!("kerala".parse::<Region>().is_err());
        assert!("Kerala ".parse::<Region>().is_err());
    }

    #[test]
    fn university_type_wire_names() {
        assert_eq!("DEEMED".parse::<UniversityType>().unwrap(), UniversityType::Deemed);
        assert!("Deemed".parse::<UniversityType>().is_err());
        assert_eq!(
            serde_json::to_string(&UniversityType::Central).unwrap(),
            "\"CENTRAL\""
        );
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let candidate: RegistrationCandidate =
            serde_json::from_str(r#"{"legalName": "IIT Bombay", "type": "CENTRAL"}"#).unwrap();
        assert_eq!(candidate.legal_name, "IIT Bombay");
        assert_eq!(candidate.kind, "CENTRAL");
        assert!(candidate.website_domain.is_empty());
        assert!(candidate.aishe_code.is_none());
    }

    #[test]
    fn null_and_non_string_fields_reach_the_validator() {
        let candidate: RegistrationCandidate = serde_json::from_str(
            r#"{"legalName": null, "type": 1, "state": true, "ugcReference": null,
                "aisheCode": 123, "websiteDomain": ["x"], "registrarOfficialEmail": {},
                "walletAddress": 1.5}"#,
        )
        .unwrap();
        assert_eq!(candidate.legal_name, "");
        assert_eq!(candidate.kind, "1");
        assert_eq!(candidate.state, "true");
        assert_eq!(candidate.ugc_reference, None);
        assert_eq!(candidate.aishe_code.as_deref(), Some("123"));
        assert_eq!(candidate.website_domain, "");
        assert_eq!(candidate.registrar_official_email, "");
        assert_eq!(candidate.wallet_address, "1.5");
    }

    #[test]
    fn region_deserializes_from_owned_strings() {
        let region: Region = serde_json::from_value(serde_json::json!("Tamil Nadu")).unwrap();
        assert_eq!(region.as_str(), "Tamil Nadu");
        assert!(serde_json::from_str::<Region>("\"Atlantis\"").is_err());

        let normalized: NormalizedCandidate = serde_json::from_str(
            r#"{"legalName": "IIT Madras", "type": "CENTRAL", "state": "Tamil Nadu",
                "ugcReference": null, "aisheCode": "U-0001", "websiteDomain": "iitm.ac.in",
                "registrarOfficialEmail": "registrar@iitm.ac.in",
                "walletAddress": "0x742d35cc6634c0532925a3b844bc454e4438f44e"}"#,
        )
        .unwrap();
        assert_eq!(normalized.state.as_str(), "Tamil Nadu");
    }
}
