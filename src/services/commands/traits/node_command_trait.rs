use crate::errors::{AppErrors, AppResult};
use crate::services::response::Response;
use crate::state::AppState;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// A request understood by the node API, paired with the payload its
/// response validates into.
///
/// Implementors derive `Serialize` for their parameters; the `command`
/// discriminator is added by [`NodeCommand::serialize_command`].
pub trait NodeCommand: Serialize {
    /// Value of the `command` field on the wire.
    const NAME: &'static str;

    /// Shape a successful response body must have.
    type Payload: DeserializeOwned + Debug;

    /// Builds the canonical payload: `command` first, then the parameters.
    ///
    /// # Returns
    /// * `AppResult<Map<String, Value>>` - The field mapping handed to the
    ///   transport, or `AppErrors::Json` if a parameter fails to encode.
    fn serialize_command(&self) -> AppResult<Map<String, Value>> {
        let mut fields = Map::new();
        fields.insert("command".to_string(), Value::String(Self::NAME.to_string()));
        match serde_json::to_value(self)? {
            Value::Object(params) => fields.extend(params),
            Value::Null => {}
            other => {
                return Err(AppErrors::InvalidInput(format!(
                    "`{}` parameters must encode as an object, got {other}",
                    Self::NAME
                )));
            }
        }
        Ok(fields)
    }

    /// Sends the command and returns the validated response.
    ///
    /// # Arguments
    /// * `app_state` - The node and collaborators to use.
    ///
    /// # Returns
    /// * `AppResult<Response<Self>>` - A response whose payload is readable,
    ///   `RemoteCommandError` if the node reported a failure, or the
    ///   transport's error unchanged.
    fn execute(&self, app_state: &AppState) -> AppResult<Response<Self>>
    where
        Self: Sized,
    {
        let payload = self.serialize_command()?;
        debug!("sending `{}` to {}", Self::NAME, app_state.node);
        let raw = app_state.transport.send(app_state.node, &payload)?;
        debug!("`{}` answered with status {}", Self::NAME, raw.status);
        Response::initialize(raw.status, raw.body)
            .finish()?
            .throw_on_error()
    }
}
