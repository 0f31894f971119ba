use crate::errors::AppResult;
use crate::models::node::Node;
use serde_json::{Map, Value};

/// Status code and undecoded body returned by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Delivers one serialized command to a node.
///
/// Connection handling, timeouts and retries belong to implementors.
/// Failures to reach the node are reported as `AppErrors::TransportError`;
/// a node answering with an error status is still `Ok`.
pub trait Transport {
    fn send(&self, node: &Node, command: &Map<String, Value>) -> AppResult<RawResponse>;
}
