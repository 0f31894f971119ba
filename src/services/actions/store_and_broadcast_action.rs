use crate::errors::{AppErrors, AppResult, StepContext};
use crate::models::action_step::ActionStep;
use crate::models::identifiers::Trytes;
use crate::services::actions::traits::action_trait::Action;
use crate::services::commands::broadcast_transactions_command::BroadcastTransactionsCommand;
use crate::services::commands::store_transactions_command::StoreTransactionsCommand;
use crate::services::commands::traits::node_command_trait::NodeCommand;
use crate::services::response::Response;
use crate::state::AppState;
use log::{info, warn};

/// Stores attached transactions on the node, then broadcasts them.
#[derive(Debug, Clone)]
pub struct StoreAndBroadcast {
    trytes: Vec<Trytes>,
}

impl StoreAndBroadcast {
    pub fn new(trytes: Vec<Trytes>) -> AppResult<Self> {
        if trytes.is_empty() {
            return Err(AppErrors::IncompleteConfiguration(
                "at least one transaction is required",
            ));
        }
        Ok(Self { trytes })
    }
}

/// Storage always succeeded if this exists; broadcast may not have.
#[derive(Debug)]
pub struct StoreAndBroadcastOutcome {
    pub stored: Response<StoreTransactionsCommand>,
    pub broadcast: AppResult<Response<BroadcastTransactionsCommand>>,
    pub steps: Vec<ActionStep>,
}

impl StoreAndBroadcastOutcome {
    pub fn is_complete(&self) -> bool {
        self.broadcast.is_ok()
    }

    /// Collapses a failed broadcast into an error.
    pub fn into_result(self) -> AppResult<Response<BroadcastTransactionsCommand>> {
        self.broadcast
    }
}

impl Action for StoreAndBroadcast {
    type Output = StoreAndBroadcastOutcome;

    fn execute(&self, app_state: &AppState) -> AppResult<StoreAndBroadcastOutcome> {
        let stored = StoreTransactionsCommand::new(self.trytes.clone())
            .execute(app_state)
            .at_step(ActionStep::Store)?;
        let mut steps = vec![ActionStep::Store];

        // no retry, and storage is left in place if this fails
        let broadcast = BroadcastTransactionsCommand::new(self.trytes.clone())
            .execute(app_state)
            .at_step(ActionStep::Broadcast);
        match &broadcast {
            Ok(_) => {
                steps.push(ActionStep::Broadcast);
                info!("stored and broadcast {} transaction(s)", self.trytes.len());
            }
            Err(e) => warn!("transactions stored but not broadcast: {e}"),
        }

        Ok(StoreAndBroadcastOutcome {
            stored,
            broadcast,
            steps,
        })
    }
}
