//! Certificate expiry probe.

use crate::DohClient;
use chrono::{DateTime, Utc};
use dohscope_core::certificate::{classify, EXPIRY_HEADER};
use dohscope_core::{CertificateStatus, Domain};
use tracing::{debug, info, warn};

/// Certificate checks through the configured fetch proxy
///
/// The proxy fetches `https://<domain>` on our behalf and reports the served
/// certificate's expiry in the `x-certificate-valid-until` response header.
/// This depends entirely on that third party and does not inspect a TLS
/// handshake; treat the result as a hint.
pub struct CertificateApi<'a> {
    client: &'a DohClient,
}

impl<'a> CertificateApi<'a> {
    pub(crate) const fn new(client: &'a DohClient) -> Self {
        Self { client }
    }

    /// Check the certificate served for `domain`, measured against now
    pub async fn check(&self, domain: &Domain) -> CertificateStatus {
        self.check_at(domain, Utc::now()).await
    }

    /// Check the certificate served for `domain`, measured against `now`
    ///
    /// Never fails: transport problems become [`CertificateStatus::CheckFailed`].
    pub async fn check_at(&self, domain: &Domain, now: DateTime<Utc>) -> CertificateStatus {
        let target = domain.https_url();

        let response = match self
            .client
            .get_certificate_proxy(&[("url", target.as_str())])
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(domain = %domain, error = %e, "certificate probe failed");
                return CertificateStatus::CheckFailed;
            }
        };

        debug!(domain = %domain, status = response.status().as_u16(), "certificate proxy answered");

        let status = match response.headers().get(EXPIRY_HEADER) {
            None => classify(None, now),
            Some(value) => match value.to_str() {
                Ok(raw) => classify(Some(raw), now),
                Err(_) => {
                    warn!(domain = %domain, "certificate expiry header is not valid text");
                    CertificateStatus::CheckFailed
                }
            },
        };

        info!(domain = %domain, ?status, "certificate classified");
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DohClient {
        DohClient::builder()
            .certificate_proxy_url(format!("{}/get", server.uri()))
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap()
    }

    fn new_year_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_expiry_header_is_valid() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("url", "https://example.com"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-certificate-valid-until", "2026-01-01")
                    .set_body_json(serde_json::json!({"contents": "", "status": {"http_code": 200}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let status = client
            .certificates()
            .check_at(&Domain::new("example.com").unwrap(), new_year_2025())
            .await;

        assert_eq!(
            status,
            CertificateStatus::Valid {
                expiry: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
                days_left: 365,
            }
        );
    }

    #[tokio::test]
    async fn test_missing_header_is_invalid() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let status = client
            .certificates()
            .check_at(&Domain::new("example.com").unwrap(), new_year_2025())
            .await;

        assert_eq!(status, CertificateStatus::Invalid);
    }

    #[tokio::test]
    async fn test_header_read_even_on_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(
                ResponseTemplate::new(500).insert_header("x-certificate-valid-until", "2024-12-01"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let status = client
            .certificates()
            .check_at(&Domain::new("expired.example").unwrap(), new_year_2025())
            .await;

        assert_eq!(status.days_left(), Some(-31));
        assert!(status.is_expired());
    }

    #[tokio::test]
    async fn test_network_error_is_check_failed() {
        let client = DohClient::builder()
            .certificate_proxy_url("http://127.0.0.1:1/get")
            .build()
            .unwrap();

        let status = client
            .certificates()
            .check(&Domain::new("example.com").unwrap())
            .await;

        assert_eq!(status, CertificateStatus::CheckFailed);
    }

    #[tokio::test]
    async fn test_slow_proxy_is_check_failed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-certificate-valid-until", "2026-01-01")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let status = client
            .certificates()
            .check(&Domain::new("example.com").unwrap())
            .await;

        assert_eq!(status, CertificateStatus::CheckFailed);
    }
}
