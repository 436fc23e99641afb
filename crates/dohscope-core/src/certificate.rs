//! Certificate expiry interpretation.
//!
//! The expiry signal comes from a fetch proxy that copies the upstream
//! certificate's `notAfter` into a response header. This is a best-effort
//! reading of one header, not a TLS handshake or a chain validation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Response header carrying the certificate's valid-until date
pub const EXPIRY_HEADER: &str = "x-certificate-valid-until";

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Result of a certificate probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CertificateStatus {
    /// An expiry date was reported
    Valid {
        /// Reported expiry
        expiry: DateTime<Utc>,
        /// Whole days until expiry, rounded up; zero or negative once expired
        days_left: i64,
    },
    /// The proxy answered without an expiry signal
    Invalid,
    /// The probe itself failed (transport, deadline, unreadable header)
    CheckFailed,
}

impl CertificateStatus {
    /// Returns true if an expiry date was found
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Returns true if the reported expiry is not in the future
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self, Self::Valid { days_left, .. } if *days_left <= 0)
    }

    /// Days left, when an expiry was found
    #[must_use]
    pub const fn days_left(&self) -> Option<i64> {
        match self {
            Self::Valid { days_left, .. } => Some(*days_left),
            _ => None,
        }
    }
}

/// Classify an optional expiry header observed at `now`
///
/// An absent header means the proxy could not tell, which is `Invalid`. A
/// header that is present but unreadable is treated as a failed check.
#[must_use]
pub fn classify(header: Option<&str>, now: DateTime<Utc>) -> CertificateStatus {
    let Some(raw) = header else {
        return CertificateStatus::Invalid;
    };

    match parse_expiry(raw) {
        Some(expiry) => CertificateStatus::Valid {
            expiry,
            days_left: days_left(expiry, now),
        },
        None => CertificateStatus::CheckFailed,
    }
}

/// `ceil((expiry - now) / 1 day)`
#[must_use]
pub fn days_left(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expiry - now).num_milliseconds();
    let days = millis / MILLIS_PER_DAY;

    // Integer division truncates toward zero, which is already the ceiling
    // for negative spans.
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// Parse a header date in any of the formats proxies are seen to emit
///
/// Accepts RFC 3339, RFC 2822 / HTTP-date, OpenSSL's `notAfter` layout, and a
/// bare `YYYY-MM-DD` read as midnight UTC.
#[must_use]
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%b %e %H:%M:%S %Y GMT") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
