use crate::consts::{ADDRESS_LENGTH, ADDRESS_WITH_CHECKSUM_LENGTH};
use crate::errors::{AppErrors, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// Raw tryte-encoded transaction data as exchanged with the node.
pub type Trytes = String;

/// A tryte-encoded transaction hash.
pub type TxHash = String;

/// Position of an address in the sequence derived from a seed.
pub type KeyIndex = u64;

fn is_trytes(s: &str) -> bool {
    s.bytes().all(|b| b == b'9' || b.is_ascii_uppercase())
}

/// An 81-tryte address, optionally followed by a 9-tryte checksum.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn new(trytes: impl Into<String>) -> AppResult<Address> {
        let trytes = trytes.into();
        let len_ok = trytes.len() == ADDRESS_LENGTH || trytes.len() == ADDRESS_WITH_CHECKSUM_LENGTH;
        if !len_ok || !is_trytes(&trytes) {
            return Err(AppErrors::InvalidInput(format!("not an address: `{trytes}`")));
        }
        Ok(Address(trytes))
    }

    #[inline]
    pub fn has_checksum(&self) -> bool {
        self.0.len() == ADDRESS_WITH_CHECKSUM_LENGTH
    }

    /// The bare 81-tryte form the node API expects.
    pub fn without_checksum(&self) -> Address {
        Address(self.0[..ADDRESS_LENGTH].to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Address {
    type Error = AppErrors;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::new(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

/// Secret seed all addresses and signatures of an account derive from.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(String);

impl Seed {
    pub fn new(trytes: impl Into<String>) -> AppResult<Seed> {
        let trytes = trytes.into();
        if trytes.is_empty() || trytes.len() > ADDRESS_LENGTH || !is_trytes(&trytes) {
            return Err(AppErrors::InvalidInput("seed must be 1..=81 trytes".into()));
        }
        Ok(Seed(trytes))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for Seed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

/// Number of key fragments used for an address and its signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityLevel {
    Low = 1,
    Medium = 2,
    High = 3,
}
