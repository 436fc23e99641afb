//! DNS resolution endpoints.

use crate::DohClient;
use dohscope_core::{AnswerSet, ChainResult, DohResponse, Domain, RecordType, Result};
use tracing::{debug, warn};

/// DNS resolution over the configured DoH resolver
pub struct DnsApi<'a> {
    client: &'a DohClient,
}

impl<'a> DnsApi<'a> {
    pub(crate) const fn new(client: &'a DohClient) -> Self {
        Self { client }
    }

    /// Issue one query for `domain` / `record_type`
    ///
    /// A response without an `Answer` section is an empty [`AnswerSet`], not
    /// an error. Transport failures, non-2xx statuses and undecodable bodies
    /// are errors.
    pub async fn resolve(&self, domain: &Domain, record_type: &RecordType) -> Result<AnswerSet> {
        let response: DohResponse = self
            .client
            .get_resolver(&[("name", domain.as_str()), ("type", record_type.mnemonic())])
            .await?;

        let answers = AnswerSet::from(response);
        debug!(
            domain = %domain,
            record_type = %record_type,
            records = answers.len(),
            "resolved"
        );

        Ok(answers)
    }

    /// Resolve and follow a leading CNAME by one hop
    ///
    /// Only the first record of the initial answer decides whether to chain.
    /// The alias target is resolved for `A` records and is not followed any
    /// further. If the follow-up query fails the result simply has no chained
    /// answer; only a failure of the initial query is returned as an error.
    pub async fn resolve_with_chain(
        &self,
        domain: &Domain,
        record_type: &RecordType,
    ) -> Result<ChainResult> {
        let initial = self.resolve(domain, record_type).await?;

        let Some(target) = initial.chain_target() else {
            return Ok(ChainResult::direct(initial));
        };

        let target = match Domain::new(target) {
            Ok(target) => target,
            Err(_) => {
                warn!(domain = %domain, "CNAME record has empty data, not following");
                return Ok(ChainResult::direct(initial));
            }
        };

        debug!(domain = %domain, target = %target, "following CNAME");

        match self.resolve(&target, &RecordType::A).await {
            Ok(chained) => Ok(ChainResult::with_chained(initial, chained)),
            Err(e) => {
                warn!(target = %target, error = %e, "CNAME follow-up query failed");
                Ok(ChainResult::direct(initial))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dohscope_core::DohError;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DohClient {
        DohClient::builder()
            .resolver_url(format!("{}/resolve", server.uri()))
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap()
    }

    fn domain(name: &str) -> Domain {
        Domain::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_a_record() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("name", "example.com"))
            .and(query_param("type", "A"))
            .and(header("accept", "application/dns-json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Status": 0,
                "Answer": [
                    {"name": "example.com", "type": 1, "TTL": 300, "data": "93.184.216.34"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let answers = client.dns().resolve(&domain("example.com"), &RecordType::A).await.unwrap();

        assert_eq!(answers.len(), 1);
        let record = answers.first().unwrap();
        assert_eq!(record.name, "example.com");
        assert_eq!(record.type_code, 1);
        assert_eq!(record.ttl, 300);
        assert_eq!(record.data, "93.184.216.34");
    }

    #[tokio::test]
    async fn test_missing_answer_is_empty_not_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Status": 0,
                "Question": [{"name": "example.com.", "type": 15}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.dns().resolve(&domain("example.com"), &RecordType::Mx).await;

        let answers = tokio_test::assert_ok!(result);
        assert!(answers.is_empty());
    }

    #[tokio::test]
    async fn test_permissive_type_sent_verbatim() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("type", "caa"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Status": 0,
                "Answer": [
                    {"name": "example.com.", "type": 257, "TTL": 3600, "data": "0 issue \"letsencrypt.org\""}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let rtype: RecordType = "caa".parse().unwrap();
        let answers = client.dns().resolve(&domain("example.com"), &rtype).await.unwrap();
        assert_eq!(answers.first().unwrap().type_label(), "257");
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .dns()
            .resolve(&domain("example.com"), &RecordType::A)
            .await
            .unwrap_err();
        assert!(matches!(err, DohError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_upstream_status_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "Status": 1,
                "Comment": "Invalid name"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .dns()
            .resolve(&domain("bad..name"), &RecordType::A)
            .await
            .unwrap_err();

        match err {
            DohError::Upstream { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid name");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_resolver_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"Status": 0}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .dns()
            .resolve(&domain("example.com"), &RecordType::A)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_unreachable_resolver_is_network_error() {
        let client = DohClient::builder()
            .resolver_url("http://127.0.0.1:1/resolve")
            .build()
            .unwrap();

        let err = client
            .dns()
            .resolve(&domain("example.com"), &RecordType::A)
            .await
            .unwrap_err();
        assert!(matches!(err, DohError::Network(_)));
    }

    #[tokio::test]
    async fn test_direct_answer_not_chained() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("name", "example.com"))
            .and(query_param("type", "A"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Status": 0,
                "Answer": [
                    {"name": "example.com", "type": 1, "TTL": 300, "data": "93.184.216.34"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .dns()
            .resolve_with_chain(&domain("example.com"), &RecordType::A)
            .await
            .unwrap();

        assert_eq!(result.initial().len(), 1);
        assert_eq!(result.initial().first().unwrap().data, "93.184.216.34");
        assert!(result.chained().is_none());
        assert_eq!(result.depth(), 0);
    }

    #[tokio::test]
    async fn test_leading_cname_is_followed_once() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("name", "www.example.com"))
            .and(query_param("type", "CNAME"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Status": 0,
                "Answer": [
                    {"name": "www.example.com.", "type": 5, "TTL": 3600, "data": "alias.example.com"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        // The alias target itself answers with another CNAME, which must not
        // trigger a third query.
        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("name", "alias.example.com"))
            .and(query_param("type", "A"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Status": 0,
                "Answer": [
                    {"name": "alias.example.com.", "type": 5, "TTL": 60, "data": "edge.cdn.example.net."},
                    {"name": "edge.cdn.example.net.", "type": 1, "TTL": 20, "data": "192.0.2.10"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("name", "edge.cdn.example.net."))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .dns()
            .resolve_with_chain(&domain("www.example.com"), &RecordType::Cname)
            .await
            .unwrap();

        assert_eq!(result.depth(), 1);
        let chained = result.chained().unwrap();
        assert_eq!(chained.len(), 2);
        assert_eq!(chained.records()[1].data, "192.0.2.10");
    }

    #[tokio::test]
    async fn test_cname_after_first_record_is_ignored() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("name", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Status": 0,
                "Answer": [
                    {"name": "example.com.", "type": 1, "TTL": 300, "data": "192.0.2.1"},
                    {"name": "example.com.", "type": 5, "TTL": 300, "data": "alias.example.com."}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .dns()
            .resolve_with_chain(&domain("example.com"), &RecordType::A)
            .await
            .unwrap();

        assert!(result.chained().is_none());
    }

    #[tokio::test]
    async fn test_failed_follow_up_keeps_initial_answer() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("name", "www.example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Status": 0,
                "Answer": [
                    {"name": "www.example.com.", "type": 5, "TTL": 3600, "data": "alias.example.com."}
                ]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .and(query_param("name", "alias.example.com."))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .dns()
            .resolve_with_chain(&domain("www.example.com"), &RecordType::A)
            .await
            .unwrap();

        assert_eq!(result.initial().len(), 1);
        assert!(result.initial().first().unwrap().is_cname());
        assert!(result.chained().is_none());
    }

    #[tokio::test]
    async fn test_failed_initial_query_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resolve"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .dns()
            .resolve_with_chain(&domain("example.com"), &RecordType::A)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }
}
