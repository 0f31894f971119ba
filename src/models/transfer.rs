use crate::errors::AppResult;
use crate::models::amount::Amount;
use crate::models::identifiers::{Address, KeyIndex, SecurityLevel, Trytes};

/// One requested output of a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub address: Address,
    pub value: Amount,
    pub message: Option<Trytes>,
    pub tag: Option<Trytes>,
}

impl Transfer {
    pub fn new(address: Address, value: Amount) -> Self {
        Self {
            address,
            value,
            message: None,
            tag: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<Trytes>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<Trytes>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// An address owned by the seed that holds spendable funds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub address: Address,
    pub key_index: KeyIndex,
    pub security: Option<SecurityLevel>,
    pub balance: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Output,
    Input,
    Remainder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub kind: EntryKind,
    pub address: Address,
    /// Positive for outputs and remainder, negative for spent inputs.
    pub value: Amount,
    pub message: Option<Trytes>,
    pub tag: Option<Trytes>,
    pub key_index: Option<KeyIndex>,
}

/// Entries of a transfer before and after signing and proof-of-work.
///
/// `trytes` stays empty until the crypto capability signs the bundle and is
/// replaced by the attached transaction trytes after proof-of-work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    pub entries: Vec<BundleEntry>,
    pub trytes: Vec<Trytes>,
}

impl Bundle {
    /// Net value of all entries; a well-formed bundle sums to zero.
    pub fn balance(&self) -> AppResult<Amount> {
        Amount::total(self.entries.iter().map(|e| &e.value))
    }
}
