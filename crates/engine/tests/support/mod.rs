#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use wayfinder_api::{Transport, TransportError, TransportResponse};
use wayfinder_engine::{Configuration, ProviderSettings};
use wayfinder_types::RequestDescriptor;

pub const API_KEY: &str = "AIzaTestKey123";

/// Transport that answers every request with the same canned outcome and
/// records what it was asked to send.
pub struct StubTransport {
    outcome: Result<TransportResponse, String>,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl StubTransport {
    pub fn json(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(TransportResponse::new(status, body)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn ok(body: &str) -> Arc<Self> {
        Self::json(200, body)
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn last_request(&self) -> RequestDescriptor {
        self.requests().pop().expect("a request was sent")
    }
}

impl Transport for StubTransport {
    fn execute(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError> {
        self.requests.lock().expect("requests lock").push(request.clone());
        self.outcome.clone().map_err(TransportError::network)
    }
}

pub fn configuration(handle: &str, settings: ProviderSettings) -> Configuration {
    Configuration::default().with_provider(handle, settings)
}

pub fn keyed() -> ProviderSettings {
    ProviderSettings::default().with_api_key(API_KEY)
}

/// Routes `tracing` output through the test harness; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("wayfinder_engine=debug").with_test_writer().try_init();
}
