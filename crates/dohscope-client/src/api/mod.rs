//! API endpoint modules.

mod certificate;
mod dns;

pub use certificate::CertificateApi;
pub use dns::DnsApi;
