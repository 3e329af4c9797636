//! Fake Solr node built on wiremock
//!
//! Answers every admin endpoint the harness uses with a success response
//! and records requests so tests can assert on ordering.

use std::time::Duration;

use serde_json::json;
use solr_tester::{HarnessConfig, LifecycleController};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::TestFixtures;

/// One request as seen by the fake node, reduced to what tests compare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub action: Option<String>,
    pub name: Option<String>,
}

impl RecordedCall {
    /// Short form such as `POST admin/configs UPLOAD playground`
    pub fn summary(&self) -> String {
        let mut parts = vec![self.method.clone(), self.path.trim_start_matches("/solr/").to_string()];
        parts.extend(self.action.clone());
        parts.extend(self.name.clone());
        parts.join(" ")
    }
}

pub struct FakeSolr {
    server: MockServer,
}

impl FakeSolr {
    /// A node where every admin call succeeds and searches find `doc_count` documents
    pub async fn healthy(existing: &[&str], doc_count: u64) -> Self {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/solr/admin/collections"))
            .and(query_param("action", "LIST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseHeader": { "status": 0 },
                "collections": existing,
            })))
            .mount(&server)
            .await;

        for admin_path in ["/solr/admin/configs", "/solr/admin/collections"] {
            Mock::given(method("POST"))
                .and(path(admin_path))
                .respond_with(ResponseTemplate::new(200).set_body_json(TestFixtures::ok_body()))
                .mount(&server)
                .await;
        }

        Mock::given(method("GET"))
            .and(path_regex(r"^/solr/[^/]+/admin/ping$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestFixtures::ping_body(0)))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path_regex(r"^/solr/[^/]+/update$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestFixtures::ok_body()))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/solr/[^/]+/select$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseHeader": { "status": 0 },
                "response": { "numFound": doc_count, "start": 0, "docs": [] }
            })))
            .mount(&server)
            .await;

        Self { server }
    }

    /// A node that accepts connections but never answers a ping successfully
    pub async fn unresponsive() -> Self {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/solr/[^/]+/admin/ping$"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&server)
            .await;
        Self { server }
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    pub fn url(&self) -> String {
        format!("{}/solr", self.server.uri())
    }

    /// Harness configuration pointed at this node with a short readiness budget
    pub fn config(&self) -> HarnessConfig {
        shared::logging::init_tracing();
        HarnessConfig::builder()
            .external_url(self.url())
            .configset_root(TestFixtures::configset_root())
            .readiness_attempts(TestFixtures::FAST_ATTEMPTS)
            .readiness_interval(Duration::from_millis(TestFixtures::FAST_INTERVAL_MS))
            .build()
    }

    pub fn controller(&self) -> LifecycleController {
        LifecycleController::new(self.config())
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| {
                let param = |key: &str| {
                    request
                        .url
                        .query_pairs()
                        .find(|(k, _)| k == key)
                        .map(|(_, v)| v.into_owned())
                };
                RecordedCall {
                    method: request.method.to_string(),
                    path: request.url.path().to_string(),
                    action: param("action"),
                    name: param("name"),
                }
            })
            .collect()
    }

    /// Summaries of every call after readiness, i.e. without LIST and placeholder pings
    pub async fn scenario_calls(&self) -> Vec<String> {
        self.calls()
            .await
            .into_iter()
            .filter(|c| c.action.as_deref() != Some("LIST"))
            .filter(|c| c.path != format!("/solr/{}/admin/ping", TestFixtures::PLACEHOLDER))
            .map(|c| c.summary())
            .collect()
    }

    /// Body of the first config set upload, if any
    pub async fn uploaded_archive(&self) -> Option<Vec<u8>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .find(|r| r.url.path() == "/solr/admin/configs" && r.url.query().is_some_and(|q| q.contains("UPLOAD")))
            .map(|r| r.body)
    }
}
