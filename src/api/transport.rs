use crate::error::AppError;
use serde_json::Value;
use tracing::debug;

const ORIGIN: &str = "https://developer.riotgames.com";

/// Per-call request state. Swapped as a whole when the key changes, never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    api_key: String,
}

impl RequestContext {
    pub fn new(api_key: impl Into<String>) -> Self {
        RequestContext {
            api_key: api_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn headers(&self) -> [(&'static str, &str); 2] {
        [("Origin", ORIGIN), ("X-Riot-Token", &self.api_key)]
    }
}

/// Status code and decoded body of one GET call.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

pub trait Transport {
    fn get(&self, url: &str, context: &RequestContext) -> Result<TransportResponse, AppError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("league_ingest/", env!("CARGO_PKG_VERSION")))
            .build();
        UreqTransport { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, context: &RequestContext) -> Result<TransportResponse, AppError> {
        let request = context
            .headers()
            .iter()
            .fold(self.agent.get(url), |request, (name, value)| {
                request.set(name, value)
            });

        // Non-2xx statuses still carry a body the caller wants to inspect.
        let response = match request.call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(e) => return Err(AppError::HttpError(e.to_string())),
        };

        let status = response.status();
        let text = response
            .into_string()
            .map_err(|e| AppError::HttpError(e.to_string()))?;
        debug!(status, bytes = text.len(), "response received");

        let body = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if status != 200 => Value::Null,
            Err(e) => return Err(AppError::JsonError(e.to_string())),
        };

        Ok(TransportResponse { status, body })
    }
}
