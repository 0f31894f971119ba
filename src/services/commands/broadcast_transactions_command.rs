use crate::models::identifiers::Trytes;
use crate::services::commands::store_transactions_command::Acknowledgement;
use crate::services::commands::traits::node_command_trait::NodeCommand;
use serde::Serialize;

/// Sends attached transactions to the node's neighbors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BroadcastTransactionsCommand {
    trytes: Vec<Trytes>,
}

impl BroadcastTransactionsCommand {
    pub fn new(trytes: Vec<Trytes>) -> Self {
        Self { trytes }
    }
}

impl NodeCommand for BroadcastTransactionsCommand {
    const NAME: &'static str = "broadcastTransactions";
    type Payload = Acknowledgement;
}
