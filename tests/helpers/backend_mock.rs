//! Mock backends for testing
//!
//! Two wiremock servers stand in for the events backend (mounted under
//! `/api`) and the payments backend.

use serde_json::Value;
use ticketnow_admin::{ServiceFactory, Settings};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Token used by authenticated tests
pub const TEST_TOKEN: &str = "test-token";

/// Both backends of the platform
pub struct BackendMockServer {
    pub events: MockServer,
    pub payments: MockServer,
}

impl BackendMockServer {
    /// Start both mock servers
    pub async fn new() -> Self {
        Self {
            events: MockServer::start().await,
            payments: MockServer::start().await,
        }
    }

    /// Settings pointing at the mock servers
    pub fn settings(&self, token: Option<&str>) -> Settings {
        let mut settings = Settings::default();
        settings.api.express_url = self.events.uri();
        settings.api.fastapi_url = self.payments.uri();
        settings.api.timeout_seconds = 5;
        settings.auth.token = token.map(str::to_string);
        settings
    }

    /// Services bound to the mock servers, carrying [`TEST_TOKEN`]
    pub fn services(&self) -> ServiceFactory {
        ServiceFactory::new(&self.settings(Some(TEST_TOKEN))).expect("Failed to build services")
    }

    /// Services without a bearer token
    pub fn anonymous_services(&self) -> ServiceFactory {
        ServiceFactory::new(&self.settings(None)).expect("Failed to build services")
    }

    /// Answer `verb path` on the events backend; `path` excludes the `/api` prefix
    pub async fn mock_events(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(format!("/api{}", route)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.events)
            .await;
    }

    /// Answer `verb path` on the payments backend
    pub async fn mock_payments(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.payments)
            .await;
    }

    /// Fail the test if `verb path` on the events backend is ever called
    pub async fn forbid_events(&self, verb: &str, route: &str) {
        Mock::given(method(verb))
            .and(path(format!("/api{}", route)))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.events)
            .await;
    }

    /// Fail the test if `verb path` on the payments backend is ever called
    pub async fn forbid_payments(&self, verb: &str, route: &str) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.payments)
            .await;
    }

    /// Drop every mounted mock
    pub async fn reset(&self) {
        self.events.reset().await;
        self.payments.reset().await;
    }
}
