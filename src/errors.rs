use crate::models::action_step::ActionStep;
use crate::models::amount::Amount;

#[derive(thiserror::Error, Debug)]
pub enum AppErrors {
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),
    #[error("incomplete configuration: {0}")]
    IncompleteConfiguration(&'static str),
    #[error("response to `{0}` was read before it was validated")]
    ResponseNotReady(&'static str),
    #[error("node rejected `{command}` (status {status}): {message}")]
    RemoteCommandError {
        command: &'static str,
        status: u16,
        message: String,
    },
    #[error("malformed `{command}` response: {reason}")]
    MalformedResponse {
        command: &'static str,
        reason: String,
    },
    #[error("transport failure: {0}")]
    TransportError(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("insufficient balance: need {needed}, found {available}")]
    InsufficientBalance { needed: Amount, available: Amount },
    #[error("{step} failed: {source}")]
    StepFailed {
        step: ActionStep,
        #[source]
        source: Box<AppErrors>,
    },
    #[error("failed to encode or decode payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppErrors {
    /// Wraps `self` with the action step it happened in.
    pub fn at(self, step: ActionStep) -> AppErrors {
        AppErrors::StepFailed {
            step,
            source: Box::new(self),
        }
    }

    /// The step closest to the caller, if the error came out of an action.
    pub fn step(&self) -> Option<ActionStep> {
        match self {
            AppErrors::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Strips every `StepFailed` layer.
    pub fn root_cause(&self) -> &AppErrors {
        let mut err = self;
        while let AppErrors::StepFailed { source, .. } = err {
            err = source;
        }
        err
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("malformed amount `{0}`")]
    Malformed(String),
    #[error("amount `{0}` is not a whole number of iotas")]
    NotIntegral(String),
    #[error("amount `{0}` exceeds the total supply")]
    OutOfRange(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("overflow")]
    Overflow,
}

pub type AppResult<T> = Result<T, AppErrors>;

/// Adds step context to a fallible call inside an action.
pub(crate) trait StepContext<T> {
    fn at_step(self, step: ActionStep) -> AppResult<T>;
}

impl<T> StepContext<T> for AppResult<T> {
    fn at_step(self, step: ActionStep) -> AppResult<T> {
        self.map_err(|e| e.at(step))
    }
}
