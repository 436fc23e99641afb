use serde::{Deserialize, Serialize};
use std::fmt;

use super::record_type::{RecordType, CNAME_TYPE_CODE, SOA_TYPE_CODE};

/// JSON body returned by a DNS-over-HTTPS resolver
///
/// Field names follow the JSON API shared by Google and Cloudflare. Only
/// `Answer` is required for resolution; the rest is informational.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DohResponse {
    /// DNS response code (0 = NOERROR, 3 = NXDOMAIN, ...)
    #[serde(default, rename = "Status")]
    pub status: Option<u16>,

    /// Response was truncated
    #[serde(default, rename = "TC")]
    pub truncated: Option<bool>,

    /// Recursion desired
    #[serde(default, rename = "RD")]
    pub recursion_desired: Option<bool>,

    /// Recursion available
    #[serde(default, rename = "RA")]
    pub recursion_available: Option<bool>,

    /// Answer validated with DNSSEC
    #[serde(default, rename = "AD")]
    pub authenticated_data: Option<bool>,

    /// DNSSEC checking disabled
    #[serde(default, rename = "CD")]
    pub checking_disabled: Option<bool>,

    /// Echo of the question section
    #[serde(default, rename = "Question")]
    pub question: Vec<DohQuestion>,

    /// Answer section; absent when the name has no records of the type
    #[serde(default, rename = "Answer")]
    pub answer: Option<Vec<ResourceRecord>>,
}

/// Question echoed back by the resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DohQuestion {
    /// Queried name
    pub name: String,

    /// Numeric record type
    #[serde(rename = "type")]
    pub type_code: u16,
}

/// Individual DNS resource record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Owner name, usually fully qualified with a trailing dot
    pub name: String,

    /// Numeric record type (1 = A, 5 = CNAME, 6 = SOA, ...)
    #[serde(rename = "type")]
    pub type_code: u16,

    /// Time to live in seconds
    #[serde(default, rename = "TTL")]
    pub ttl: u32,

    /// Record data in presentation format
    #[serde(default)]
    pub data: String,
}

impl ResourceRecord {
    /// Create a record
    #[must_use]
    pub fn new(name: impl Into<String>, type_code: u16, ttl: u32, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_code,
            ttl,
            data: data.into(),
        }
    }

    /// The enumerated record type, if the code is one we know
    #[must_use]
    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_code(self.type_code)
    }

    /// Mnemonic for known codes, the number otherwise
    #[must_use]
    pub fn type_label(&self) -> String {
        self.record_type()
            .map_or_else(|| self.type_code.to_string(), |t| t.mnemonic().to_string())
    }

    /// Returns true if this is a CNAME record
    #[must_use]
    pub const fn is_cname(&self) -> bool {
        self.type_code == CNAME_TYPE_CODE
    }

    /// Returns true if this is an SOA record
    #[must_use]
    pub const fn is_soa(&self) -> bool {
        self.type_code == SOA_TYPE_CODE
    }
}

/// DNS response code carried in the DoH `Status` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseCode(pub u16);

impl ResponseCode {
    /// Standard mnemonic, or `RCODE<n>` for anything unassigned here
    #[must_use]
    pub fn mnemonic(self) -> String {
        let name = match self.0 {
            0 => "NOERROR",
            1 => "FORMERR",
            2 => "SERVFAIL",
            3 => "NXDOMAIN",
            4 => "NOTIMP",
            5 => "REFUSED",
            other => return format!("RCODE{other}"),
        };
        name.to_string()
    }

    /// Returns true for NOERROR
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mnemonic())
    }
}

/// Ordered answer records for one query
///
/// Order is the order the resolver returned. An empty set means the name has
/// no records of the requested type; it is not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    records: Vec<ResourceRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<ResponseCode>,
}

impl AnswerSet {
    /// Create an answer set from records
    #[must_use]
    pub const fn new(records: Vec<ResourceRecord>) -> Self {
        Self {
            records,
            status: None,
        }
    }

    /// Attach the resolver's response code
    #[must_use]
    pub fn with_status(mut self, status: ResponseCode) -> Self {
        self.status = Some(status);
        self
    }

    /// All records in resolver order
    #[must_use]
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Response code reported by the resolver, if any
    #[must_use]
    pub const fn status(&self) -> Option<ResponseCode> {
        self.status
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the resolver returned no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first record, which drives chaining and staleness decisions
    #[must_use]
    pub fn first(&self) -> Option<&ResourceRecord> {
        self.records.first()
    }

    /// Iterate over records
    pub fn iter(&self) -> std::slice::Iter<'_, ResourceRecord> {
        self.records.iter()
    }

    /// Alias target to follow, when the first record is a CNAME
    ///
    /// Only the first record is consulted. Later CNAMEs in the same answer
    /// are ignored.
    #[must_use]
    pub fn chain_target(&self) -> Option<&str> {
        self.first()
            .filter(|r| r.is_cname())
            .map(|r| r.data.as_str())
    }

    /// TTL of the first record
    #[must_use]
    pub fn ttl_remaining(&self) -> Option<u32> {
        self.first().map(|r| r.ttl)
    }

    /// First SOA record anywhere in the answer
    #[must_use]
    pub fn soa_record(&self) -> Option<&ResourceRecord> {
        self.records.iter().find(|r| r.is_soa())
    }
}

impl From<DohResponse> for AnswerSet {
    fn from(response: DohResponse) -> Self {
        let set = Self::new(response.answer.unwrap_or_default());
        match response.status {
            Some(code) => set.with_status(ResponseCode(code)),
            None => set,
        }
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = &'a ResourceRecord;
    type IntoIter = std::slice::Iter<'a, ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for AnswerSet {
    type Item = ResourceRecord;
    type IntoIter = std::vec::IntoIter<ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Answer for a query plus the one-hop CNAME follow-up, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainResult {
    initial: AnswerSet,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    chained: Option<AnswerSet>,
}

impl ChainResult {
    /// A result with no chain hop
    #[must_use]
    pub const fn direct(initial: AnswerSet) -> Self {
        Self {
            initial,
            chained: None,
        }
    }

    /// A result with a chained answer
    ///
    /// The chained answer is dropped unless the initial answer starts with a
    /// CNAME, so `chained` can never be populated for a direct answer.
    #[must_use]
    pub fn with_chained(initial: AnswerSet, chained: AnswerSet) -> Self {
        let chained = initial.chain_target().is_some().then_some(chained);
        Self { initial, chained }
    }

    /// Answer to the original query
    #[must_use]
    pub const fn initial(&self) -> &AnswerSet {
        &self.initial
    }

    /// A-record answer for the alias target
    #[must_use]
    pub const fn chained(&self) -> Option<&AnswerSet> {
        self.chained.as_ref()
    }

    /// Number of alias hops followed: 0 or 1
    #[must_use]
    pub const fn depth(&self) -> usize {
        if self.chained.is_some() {
            1
        } else {
            0
        }
    }

    /// Split into the initial and chained answers
    #[must_use]
    pub fn into_parts(self) -> (AnswerSet, Option<AnswerSet>) {
        (self.initial, self.chained)
    }
}
