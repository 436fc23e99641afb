//! How a resolved record would be entered at common DNS providers.

use serde::Serialize;

use crate::{AnswerSet, Domain, RecordType};

/// One row of the provider reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderHint {
    /// Provider name
    pub provider: &'static str,
    /// Record type as entered at the provider
    pub record_type: String,
    /// Host field: `www` or the apex marker `@`
    pub host: &'static str,
    /// Value / points-to field
    pub value: String,
    /// TTL field as the provider labels it
    pub ttl: &'static str,
    /// Free-form note
    pub notes: &'static str,
}

const PROVIDERS: [(&str, &str, &str); 3] = [
    ("GoDaddy", "1 hr", "GoDaddy input style"),
    ("Cloudflare", "Auto", "Cloudflare input style"),
    ("Generic", "Auto", "General usage"),
];

/// Build the reference rows for a resolved answer
///
/// Returns nothing when the answer is empty. The value column mirrors the
/// first record only.
#[must_use]
pub fn provider_hints(
    domain: &Domain,
    record_type: &RecordType,
    answers: &AnswerSet,
) -> Vec<ProviderHint> {
    let Some(first) = answers.first() else {
        return Vec::new();
    };

    let host = if domain.mentions_www() { "www" } else { "@" };

    PROVIDERS
        .iter()
        .map(|&(provider, ttl, notes)| ProviderHint {
            provider,
            record_type: record_type.to_string(),
            host,
            value: first.data.clone(),
            ttl,
            notes,
        })
        .collect()
}
