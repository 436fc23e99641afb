use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::DohError;

/// DNS numeric type code for CNAME records
pub const CNAME_TYPE_CODE: u16 = 5;

/// DNS numeric type code for SOA records
pub const SOA_TYPE_CODE: u16 = 6;

/// DNS record type requested from the resolver
///
/// The known tags carry their numeric code and a short description. Anything
/// else is kept in [`RecordType::Other`] and sent to the resolver verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RecordType {
    /// IPv4 address
    #[default]
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name (alias)
    Cname,
    /// Mail exchange
    Mx,
    /// Free-form text
    Txt,
    /// Name server
    Ns,
    /// Service locator
    Srv,
    /// Reverse pointer
    Ptr,
    /// Start of authority
    Soa,
    /// Any other mnemonic or numeric code, passed through as given
    Other(String),
}

impl RecordType {
    /// All enumerated record types, in display order
    pub const KNOWN: [Self; 9] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Txt,
        Self::Ns,
        Self::Srv,
        Self::Ptr,
        Self::Soa,
    ];

    /// Mnemonic sent as the `type` query parameter
    #[must_use]
    pub fn mnemonic(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Other(raw) => raw,
        }
    }

    /// DNS numeric type code, if known
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::A => Some(1),
            Self::Ns => Some(2),
            Self::Cname => Some(CNAME_TYPE_CODE),
            Self::Soa => Some(SOA_TYPE_CODE),
            Self::Ptr => Some(12),
            Self::Mx => Some(15),
            Self::Txt => Some(16),
            Self::Aaaa => Some(28),
            Self::Srv => Some(33),
            Self::Other(_) => None,
        }
    }

    /// Look up an enumerated record type by numeric code
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::KNOWN.into_iter().find(|t| t.code() == Some(code))
    }

    /// Human-readable description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::A => "Maps a domain to an IPv4 address.",
            Self::Aaaa => "Maps a domain to an IPv6 address.",
            Self::Cname => "Alias one domain to another domain.",
            Self::Mx => "Mail Exchange - specifies mail servers.",
            Self::Txt => "Text records used for SPF, DKIM, DMARC, etc.",
            Self::Ns => "Name Server - defines authoritative name servers.",
            Self::Srv => "Service locator for specific services.",
            Self::Ptr => "Pointer record for reverse DNS lookups.",
            Self::Soa => "Start of Authority - information about the domain zone.",
            Self::Other(_) => "Record type passed through to the resolver unchanged.",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for RecordType {
    type Err = DohError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DohError::Config("record type must not be empty".into()));
        }

        let known = match trimmed.to_ascii_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "NS" => Self::Ns,
            "SRV" => Self::Srv,
            "PTR" => Self::Ptr,
            "SOA" => Self::Soa,
            _ => Self::Other(trimmed.to_string()),
        };

        Ok(known)
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::Other(raw) => raw,
            known => known.mnemonic().to_string(),
        }
    }
}

impl TryFrom<String> for RecordType {
    type Error = DohError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("aaaa".parse::<RecordType>().unwrap(), RecordType::Aaaa);
        assert_eq!(" Cname ".parse::<RecordType>().unwrap(), RecordType::Cname);
    }

    #[test]
    fn test_unknown_type_passes_through_verbatim() {
        let rtype: RecordType = "caa".parse().unwrap();
        assert_eq!(rtype, RecordType::Other("caa".into()));
        assert_eq!(rtype.mnemonic(), "caa");
        assert_eq!(rtype.code(), None);
    }

    #[test]
    fn test_empty_type_rejected() {
        assert!("  ".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_codes() {
        assert_eq!(RecordType::Cname.code(), Some(5));
        assert_eq!(RecordType::Soa.code(), Some(6));
        assert_eq!(RecordType::from_code(28), Some(RecordType::Aaaa));
        assert_eq!(RecordType::from_code(257), None);
    }

    #[test]
    fn test_every_known_type_has_description() {
        for rtype in RecordType::KNOWN {
            assert!(!rtype.description().is_empty());
            assert_eq!(rtype.mnemonic().parse::<RecordType>().unwrap(), rtype);
        }
    }

    #[test]
    fn test_defaults_to_a() {
        assert_eq!(RecordType::default(), RecordType::A);
    }

    #[test]
    fn test_serializes_as_mnemonic() {
        let json = serde_json::to_string(&RecordType::Mx).unwrap();
        assert_eq!(json, "\"MX\"");
        let parsed: RecordType = serde_json::from_str("\"txt\"").unwrap();
        assert_eq!(parsed, RecordType::Txt);
    }
}
