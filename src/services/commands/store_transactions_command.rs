use crate::models::identifiers::Trytes;
use crate::services::commands::traits::node_command_trait::NodeCommand;
use serde::{Deserialize, Serialize};

/// Persists attached transactions in the node's local storage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreTransactionsCommand {
    trytes: Vec<Trytes>,
}

impl StoreTransactionsCommand {
    pub fn new(trytes: Vec<Trytes>) -> Self {
        Self { trytes }
    }

    pub fn add_trytes(mut self, trytes: impl Into<Trytes>) -> Self {
        self.trytes.push(trytes.into());
        self
    }
}

/// Body of commands that answer with nothing but success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub duration: Option<u64>,
}

impl NodeCommand for StoreTransactionsCommand {
    const NAME: &'static str = "storeTransactions";
    type Payload = Acknowledgement;
}
