use crate::errors::{AppErrors, AppResult};
use crate::services::commands::traits::node_command_trait::NodeCommand;
use log::warn;
use serde_json::Value;

#[derive(Debug)]
enum ResponseState<P> {
    Pending,
    Ready(P),
    NodeError(String),
}

/// The node's answer to one command `C`.
///
/// Created with [`Response::initialize`], validated by [`Response::finish`]
/// and checked with [`Response::throw_on_error`]. Typed access through
/// [`Response::payload`] is only possible once the body validated cleanly.
#[derive(Debug)]
pub struct Response<C: NodeCommand> {
    status: u16,
    raw: String,
    state: ResponseState<C::Payload>,
}

impl<C: NodeCommand> Response<C> {
    /// Stores the raw answer without looking at it.
    pub fn initialize(status: u16, raw: impl Into<String>) -> Self {
        Self {
            status,
            raw: raw.into(),
            state: ResponseState::Pending,
        }
    }

    /// Validates status and body shape. A node-reported error is recorded,
    /// not raised; a success body of the wrong shape is `MalformedResponse`.
    pub fn finish(mut self) -> AppResult<Self> {
        if !matches!(self.state, ResponseState::Pending) {
            return Ok(self);
        }

        let success = (200..300).contains(&self.status);
        let body = if self.raw.trim().is_empty() {
            Ok(Value::Object(Default::default()))
        } else {
            serde_json::from_str::<Value>(&self.raw)
        };

        self.state = match body {
            Ok(value) => match node_error_message(&value) {
                Some(message) => ResponseState::NodeError(message),
                None if !success => {
                    ResponseState::NodeError(format!("unexpected status {}", self.status))
                }
                None => match serde_json::from_value::<C::Payload>(value) {
                    Ok(payload) => ResponseState::Ready(payload),
                    Err(e) => {
                        return Err(AppErrors::MalformedResponse {
                            command: C::NAME,
                            reason: e.to_string(),
                        });
                    }
                },
            },
            Err(_) if !success => ResponseState::NodeError(self.raw.trim().to_string()),
            Err(e) => {
                return Err(AppErrors::MalformedResponse {
                    command: C::NAME,
                    reason: e.to_string(),
                });
            }
        };
        Ok(self)
    }

    /// Fails with `RemoteCommandError` if the node reported an error.
    pub fn throw_on_error(self) -> AppResult<Self> {
        match &self.state {
            ResponseState::Pending => Err(AppErrors::ResponseNotReady(C::NAME)),
            ResponseState::NodeError(message) => {
                warn!("node rejected `{}` with status {}: {message}", C::NAME, self.status);
                Err(AppErrors::RemoteCommandError {
                    command: C::NAME,
                    status: self.status,
                    message: message.clone(),
                })
            }
            ResponseState::Ready(_) => Ok(self),
        }
    }

    #[inline]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.state, ResponseState::Pending)
    }

    pub fn node_error(&self) -> Option<&str> {
        match &self.state {
            ResponseState::NodeError(message) => Some(message),
            _ => None,
        }
    }

    pub fn payload(&self) -> AppResult<&C::Payload> {
        match &self.state {
            ResponseState::Ready(payload) => Ok(payload),
            _ => Err(AppErrors::ResponseNotReady(C::NAME)),
        }
    }

    pub fn into_payload(self) -> AppResult<C::Payload> {
        match self.state {
            ResponseState::Ready(payload) => Ok(payload),
            _ => Err(AppErrors::ResponseNotReady(C::NAME)),
        }
    }
}

fn node_error_message(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    ["error", "exception"].iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    })
}
