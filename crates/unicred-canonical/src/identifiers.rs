use crate::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hostname grammar: dot-separated labels of 1-63 alphanumerics with
/// internal hyphens only.
pub const DOMAIN_PATTERN: &str =
    r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)*[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$";
/// Basic `local@domain.tld` shape.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
/// `0x` followed by 40 hex characters.
pub const WALLET_PATTERN: &str = r"^0x[a-fA-F0-9]{40}$";
/// One uppercase letter, a hyphen, then 3 to 6 digits.
pub const AISHE_PATTERN: &str = r"^[A-Z]-[0-9]{3,6}$";

/// Minimum length of a website domain, in characters.
pub const DOMAIN_MIN_LEN: usize = 3;

macro_rules! identifier {
    ($name:ident, $doc:expr, $field:expr, $pattern:expr, $normalize:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parses and normalizes a raw value.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                static PATTERN: Lazy<Regex> =
                    Lazy::new(|| Regex::new($pattern).expect("invalid regex"));
                let s = value.into();
                if s.is_empty() {
                    return Err(ValidationError::Empty { field: $field });
                }
                if !PATTERN.is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: $field,
                        value: s,
                    });
                }
                let normalize: fn(String) -> String = $normalize;
                Ok(Self(normalize(s)))
            }

            /// Returns the normalized text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    WalletAddress,
    "Ethereum-style account address, stored lowercase.",
    "wallet_address",
    WALLET_PATTERN,
    |s| s.to_ascii_lowercase()
);
identifier!(
    EmailAddress,
    "Registrar email address, stored lowercase.",
    "email",
    EMAIL_PATTERN,
    |s| s.to_lowercase()
);
identifier!(
    AisheCode,
    "All India Survey on Higher Education institution code (`A-123456`).",
    "aishe_code",
    AISHE_PATTERN,
    |s| s
);
identifier!(
    HostName,
    "Syntactically valid DNS hostname, stored lowercase.",
    "hostname",
    DOMAIN_PATTERN,
    |s| s.to_ascii_lowercase()
);

/// Website domain of a registered institution, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebsiteDomain(HostName);

impl WebsiteDomain {
    /// Parses a domain: at least three characters of valid hostname syntax.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let len = s.chars().count();
        if len == 0 {
            return Err(ValidationError::Empty {
                field: "website_domain",
            });
        }
        if len < DOMAIN_MIN_LEN {
            return Err(ValidationError::LengthOutOfBounds {
                field: "website_domain",
                len,
                min: DOMAIN_MIN_LEN,
                max: usize::MAX,
            });
        }
        HostName::parse(s).map(Self).map_err(|err| match err {
            ValidationError::PatternMismatch { value, .. } => ValidationError::PatternMismatch {
                field: "website_domain",
                value,
            },
            other => other,
        })
    }

    /// Returns the normalized text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for WebsiteDomain {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<WebsiteDomain> for String {
    fn from(value: WebsiteDomain) -> Self {
        value.0.into()
    }
}

impl AsRef<str> for WebsiteDomain {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for WebsiteDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EmailAddress {
    /// Domain part after the `@`, already lowercase.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or_default()
    }

    /// Local part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(l, _)| l).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_address_accepts_mixed_case_and_lowercases() {
        let addr = WalletAddress::parse("0xABCDEF0123456789abcdef0123456789ABCDEF01").unwrap();
        assert_eq!(addr.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn wallet_address_rejects_short_and_unprefixed() {
        assert!(WalletAddress::parse("0x123").is_err());
        assert!(WalletAddress::parse("ABCDEF0123456789abcdef0123456789ABCDEF0123").is_err());
        assert!(WalletAddress::parse("0XABCDEF0123456789abcdef0123456789ABCDEF01").is_err());
        assert_eq!(
            WalletAddress::parse(""),
            Err(ValidationError::Empty {
                field: "wallet_address"
            })
        );
    }

    #[test]
    fn aishe_code_digit_bounds() {
        assert!(AisheCode::parse("A-123456").is_ok());
        assert!(AisheCode::parse("A-123").is_ok());
        assert!(AisheCode::parse("A-12").is_err());
        assert!(AisheCode::parse("A-1234567").is_err());
        assert!(AisheCode::parse("AB-123456").is_err());
        assert!(AisheCode::parse("a-123456").is_err());
    }

    #[test]
    fn website_domain_grammar() {
        assert_eq!(WebsiteDomain::parse("IITB.ac.IN").unwrap().as_str(), "iitb.ac.in");
        assert!(WebsiteDomain::parse("x-y.edu.in").is_ok());
        assert!(WebsiteDomain::parse("-bad.edu").is_err());
        assert!(WebsiteDomain::parse("bad-.edu").is_err());
        assert!(WebsiteDomain::parse("a..b").is_err());
        assert!(WebsiteDomain::parse("has space.in").is_err());
        assert!(WebsiteDomain::parse(&format!("{}.in", "a".repeat(64))).is_err());
        assert!(WebsiteDomain::parse(&format!("{}.in", "a".repeat(63))).is_ok());
        assert!(matches!(
            WebsiteDomain::parse("ab"),
            Err(ValidationError::LengthOutOfBounds { len: 2, .. })
        ));
    }

    #[test]
    fn email_parts_after_normalization() {
        let email = EmailAddress::parse("Registrar@IITB.AC.IN").unwrap();
        assert_eq!(email.as_str(), "registrar@iitb.ac.in");
        assert_eq!(email.domain(), "iitb.ac.in");
        assert_eq!(email.local_part(), "registrar");
        assert!(EmailAddress::parse("no-at-sign.in").is_err());
        assert!(EmailAddress::parse("a@nodot").is_err());
        assert!(EmailAddress::parse("a b@x.in").is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: WalletAddress =
            serde_json::from_str("\"0xABCDEF0123456789abcdef0123456789ABCDEF01\"").unwrap();
        assert!(ok.as_str().starts_with("0xabcdef"));
        assert!(serde_json::from_str::<WebsiteDomain>("\"not a domain\"").is_err());
    }
}
