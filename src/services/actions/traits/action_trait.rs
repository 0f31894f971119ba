use crate::errors::AppResult;
use crate::state::AppState;

/// A composite operation over one or more node commands and crypto calls.
///
/// Implementors are immutable, already-validated configurations; running one
/// never changes it, so a value can be executed again without leaking state.
pub trait Action {
    type Output;

    /// Runs every step in order and stops at the first failure.
    ///
    /// # Arguments
    /// * `app_state` - The node and collaborators to run against.
    ///
    /// # Returns
    /// * `AppResult<Self::Output>` - The aggregated result, or the first
    ///   error wrapped in `AppErrors::StepFailed` naming the step.
    fn execute(&self, app_state: &AppState) -> AppResult<Self::Output>;
}
