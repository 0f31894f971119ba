//! Scripted collaborators for unit tests.

use crate::errors::{AppErrors, AppResult};
use crate::models::action_step::ActionStep;
use crate::models::identifiers::{Address, KeyIndex, SecurityLevel, Seed};
use crate::models::node::{Node, Protocol};
use crate::models::transfer::{Bundle, Input};
use crate::services::crypto::CryptoCapability;
use crate::services::transport::{RawResponse, Transport};
use crate::state::AppState;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Address the fake crypto derives for `index`: the index spelled in
/// letters (`0` -> `A`), padded with `9`.
pub fn address_for(index: KeyIndex) -> Address {
    let tag: String = index
        .to_string()
        .bytes()
        .map(|d| (b'A' + (d - b'0')) as char)
        .collect();
    Address::new(format!("{tag}{}", "9".repeat(81 - tag.len()))).expect("valid address")
}

pub fn seed() -> Seed {
    Seed::new("TESTSEED9").expect("valid seed")
}

enum Scripted {
    Reply(RawResponse),
    Fail(String),
}

/// Answers each command name from its own queue and records everything sent.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<HashMap<String, VecDeque<Scripted>>>,
    sent: RefCell<Vec<Map<String, Value>>>,
}

impl ScriptedTransport {
    pub fn reply(&self, command: &str, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .entry(command.to_string())
            .or_default()
            .push_back(Scripted::Reply(RawResponse::new(status, body)));
    }

    pub fn fail(&self, command: &str, message: &str) {
        self.replies
            .borrow_mut()
            .entry(command.to_string())
            .or_default()
            .push_back(Scripted::Fail(message.to_string()));
    }

    pub fn sent(&self) -> Vec<Map<String, Value>> {
        self.sent.borrow().clone()
    }

    pub fn sent_commands(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .filter_map(|c| c.get("command").and_then(Value::as_str).map(str::to_string))
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, _node: &Node, command: &Map<String, Value>) -> AppResult<RawResponse> {
        self.sent.borrow_mut().push(command.clone());
        let name = command
            .get("command")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let next = self
            .replies
            .borrow_mut()
            .get_mut(name)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Scripted::Reply(raw)) => Ok(raw),
            Some(Scripted::Fail(message)) => Err(AppErrors::TransportError(message)),
            None => Err(AppErrors::TransportError(format!(
                "no scripted reply for `{name}`"
            ))),
        }
    }
}

/// One recorded capability call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoCall {
    Derive {
        index: KeyIndex,
        security: Option<SecurityLevel>,
    },
    Checksum,
    Sign {
        inputs: usize,
        hmac_key: Option<String>,
    },
    Attach {
        depth: u32,
        min_weight_magnitude: u32,
        reference: Option<String>,
    },
}

/// Deterministic stand-in for hashing, signing and proof-of-work.
#[derive(Default)]
pub struct FakeCrypto {
    pub fail_on: Option<ActionStep>,
    calls: RefCell<Vec<CryptoCall>>,
}

impl FakeCrypto {
    pub fn failing_on(step: ActionStep) -> Self {
        Self {
            fail_on: Some(step),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<CryptoCall> {
        self.calls.borrow().clone()
    }

    fn check(&self, step: ActionStep) -> AppResult<()> {
        if self.fail_on == Some(step) {
            return Err(AppErrors::TransportError(format!("{step} unavailable")));
        }
        Ok(())
    }
}

impl CryptoCapability for FakeCrypto {
    fn derive_address(
        &self,
        _seed: &Seed,
        index: KeyIndex,
        security: Option<SecurityLevel>,
    ) -> AppResult<Address> {
        self.calls
            .borrow_mut()
            .push(CryptoCall::Derive { index, security });
        self.check(ActionStep::DeriveAddress)?;
        Ok(address_for(index))
    }

    fn add_checksum(&self, address: &Address) -> AppResult<Address> {
        self.calls.borrow_mut().push(CryptoCall::Checksum);
        Address::new(format!("{}CHECKSUM9", address.without_checksum()))
    }

    fn sign(
        &self,
        mut bundle: Bundle,
        _seed: &Seed,
        inputs: &[Input],
        hmac_key: Option<&str>,
    ) -> AppResult<Bundle> {
        self.calls.borrow_mut().push(CryptoCall::Sign {
            inputs: inputs.len(),
            hmac_key: hmac_key.map(str::to_string),
        });
        self.check(ActionStep::Sign)?;
        bundle.trytes = bundle
            .entries
            .iter()
            .map(|e| e.address.to_string())
            .collect();
        Ok(bundle)
    }

    fn attach(
        &self,
        mut bundle: Bundle,
        depth: u32,
        min_weight_magnitude: u32,
        reference: Option<&str>,
    ) -> AppResult<Bundle> {
        self.calls.borrow_mut().push(CryptoCall::Attach {
            depth,
            min_weight_magnitude,
            reference: reference.map(str::to_string),
        });
        self.check(ActionStep::Attach)?;
        bundle.trytes = bundle.trytes.iter().map(|t| format!("{t}POW")).collect();
        Ok(bundle)
    }
}

/// Node plus fakes, lending out an `AppState`.
pub struct Harness {
    pub node: Node,
    pub transport: ScriptedTransport,
    pub crypto: FakeCrypto,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_crypto(FakeCrypto::default())
    }

    pub fn with_crypto(crypto: FakeCrypto) -> Self {
        init_logger();
        Self {
            node: Node::new(Protocol::Http, "localhost", 14265),
            transport: ScriptedTransport::default(),
            crypto,
        }
    }

    pub fn state(&self) -> AppState<'_> {
        AppState::new(&self.node, &self.transport, &self.crypto)
    }
}
