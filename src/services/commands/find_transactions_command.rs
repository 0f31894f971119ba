use crate::errors::AppResult;
use crate::models::identifiers::{Address, Trytes, TxHash};
use crate::services::commands::traits::node_command_trait::NodeCommand;
use crate::services::response::Response;
use serde::{Deserialize, Serialize};

/// Looks up transaction hashes by address, bundle or tag.
/// Only the filters that were set are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FindTransactionsCommand {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    addresses: Vec<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    bundles: Vec<TxHash>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<Trytes>,
}

impl FindTransactionsCommand {
    pub fn by_addresses<'a>(addresses: impl IntoIterator<Item = &'a Address>) -> Self {
        Self {
            addresses: addresses.into_iter().map(Address::without_checksum).collect(),
            ..Self::default()
        }
    }

    pub fn with_bundle(mut self, bundle: impl Into<TxHash>) -> Self {
        self.bundles.push(bundle.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<Trytes>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Hashes {
    pub hashes: Vec<TxHash>,
}

impl NodeCommand for FindTransactionsCommand {
    const NAME: &'static str = "findTransactions";
    type Payload = Hashes;
}

impl Response<FindTransactionsCommand> {
    pub fn hashes(&self) -> AppResult<&[TxHash]> {
        Ok(&self.payload()?.hashes)
    }
}
