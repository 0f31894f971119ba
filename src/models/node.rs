use crate::consts::DEFAULT_NODE_PORT;
use crate::errors::{AppErrors, AppResult};
use serde::Deserialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

/// Remote node endpoint. Read-only once built and shared by reference
/// across every command sent to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Node {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub path: Option<String>,
}

impl Node {
    pub fn new(protocol: Protocol, host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol,
            host: host.into(),
            port,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Parses `http[s]://host[:port][/path]`. Without a port the node's
    /// API port 14265 is used, not the scheme default.
    pub fn parse(endpoint: &str) -> AppResult<Node> {
        let url = url::Url::parse(endpoint)
            .map_err(|e| AppErrors::InvalidInput(format!("node url `{endpoint}`: {e}")))?;
        let protocol = match url.scheme() {
            "http" => Protocol::Http,
            "https" => Protocol::Https,
            other => {
                return Err(AppErrors::InvalidInput(format!(
                    "unsupported node scheme `{other}`"
                )));
            }
        };
        let host = url
            .host_str()
            .ok_or_else(|| AppErrors::InvalidInput(format!("node url `{endpoint}` has no host")))?
            .to_string();
        // `Url::port` hides a port equal to the scheme default
        let port = match url.port() {
            Some(port) => port,
            None if names_port(endpoint) => {
                url.port_or_known_default().unwrap_or(DEFAULT_NODE_PORT)
            }
            None => DEFAULT_NODE_PORT,
        };
        let path = match url.path().trim_matches('/') {
            "" => None,
            p => Some(p.to_string()),
        };
        Ok(Node {
            protocol,
            host,
            port,
            path,
        })
    }

    /// Full URL commands are posted to.
    pub fn endpoint(&self) -> String {
        match &self.path {
            Some(path) => format!(
                "{}://{}:{}/{}",
                self.protocol.as_str(),
                self.host,
                self.port,
                path.trim_matches('/')
            ),
            None => format!("{}://{}:{}", self.protocol.as_str(), self.host, self.port),
        }
    }
}

fn names_port(endpoint: &str) -> bool {
    let authority = endpoint
        .split_once("://")
        .map_or(endpoint, |(_, rest)| rest)
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    authority
        .rsplit_once(':')
        .is_some_and(|(_, port)| {
            !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
        })
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.endpoint())
    }
}
