use crate::errors::{AppErrors, AppResult, StepContext};
use crate::models::action_step::ActionStep;
use crate::models::amount::Amount;
use crate::models::identifiers::{Address, SecurityLevel, Seed};
use crate::models::transfer::{Bundle, BundleEntry, EntryKind, Input, Transfer};
use crate::services::actions::get_inputs_action::GetInputs;
use crate::services::actions::get_new_address_action::GetNewAddress;
use crate::services::actions::traits::action_trait::Action;
use crate::services::commands::broadcast_transactions_command::BroadcastTransactionsCommand;
use crate::services::commands::store_transactions_command::StoreTransactionsCommand;
use crate::services::commands::traits::node_command_trait::NodeCommand;
use crate::services::response::Response;
use crate::state::AppState;
use log::{debug, info, warn};

/// Sends value and/or messages from a seed.
///
/// Steps run strictly in order: resolve inputs, prepare the bundle, sign,
/// attach, broadcast, store. The first failing step ends the action and
/// nothing after it runs.
#[derive(Debug, Clone)]
pub struct SendTransfer {
    seed: Seed,
    transfers: Vec<Transfer>,
    depth: u32,
    min_weight_magnitude: u32,
    inputs: Vec<Input>,
    remainder_address: Option<Address>,
    security: Option<SecurityLevel>,
    hmac_key: Option<String>,
    reference: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SendTransferBuilder {
    seed: Option<Seed>,
    transfers: Vec<Transfer>,
    depth: Option<u32>,
    min_weight_magnitude: Option<u32>,
    inputs: Vec<Input>,
    remainder_address: Option<Address>,
    security: Option<SecurityLevel>,
    hmac_key: Option<String>,
    reference: Option<String>,
}

impl SendTransferBuilder {
    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn transfer(mut self, transfer: Transfer) -> Self {
        self.transfers.push(transfer);
        self
    }

    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn min_weight_magnitude(mut self, mwm: u32) -> Self {
        self.min_weight_magnitude = Some(mwm);
        self
    }

    /// Spend exactly these inputs instead of looking them up. Ignored when
    /// the transfers move no value, since nothing is spent then.
    pub fn input(mut self, input: Input) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn remainder_address(mut self, address: Address) -> Self {
        self.remainder_address = Some(address);
        self
    }

    pub fn security(mut self, security: SecurityLevel) -> Self {
        self.security = Some(security);
        self
    }

    pub fn hmac_key(mut self, key: impl Into<String>) -> Self {
        self.hmac_key = Some(key.into());
        self
    }

    /// Transaction the proof-of-work should reference.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn build(self) -> AppResult<SendTransfer> {
        let seed = self
            .seed
            .ok_or(AppErrors::IncompleteConfiguration("seed is required"))?;
        if self.transfers.is_empty() {
            return Err(AppErrors::IncompleteConfiguration(
                "at least one transfer is required",
            ));
        }
        let depth = self
            .depth
            .ok_or(AppErrors::IncompleteConfiguration("depth is required"))?;
        let min_weight_magnitude = self.min_weight_magnitude.ok_or(
            AppErrors::IncompleteConfiguration("min weight magnitude is required"),
        )?;
        if let Some(t) = self.transfers.iter().find(|t| t.value.is_negative()) {
            return Err(AppErrors::InvalidInput(format!(
                "transfer to {} has negative value {}",
                t.address, t.value
            )));
        }
        Ok(SendTransfer {
            seed,
            transfers: self.transfers,
            depth,
            min_weight_magnitude,
            inputs: self.inputs,
            remainder_address: self.remainder_address,
            security: self.security,
            hmac_key: self.hmac_key,
            reference: self.reference,
        })
    }
}

#[derive(Debug)]
pub struct SentTransfer {
    /// The attached bundle as broadcast and stored.
    pub bundle: Bundle,
    pub inputs: Vec<Input>,
    pub broadcast: Response<BroadcastTransactionsCommand>,
    pub stored: Response<StoreTransactionsCommand>,
    pub steps: Vec<ActionStep>,
}

impl SendTransfer {
    pub fn builder() -> SendTransferBuilder {
        SendTransferBuilder::default()
    }

    fn resolve_inputs(&self, app_state: &AppState, needed: &Amount) -> AppResult<Vec<Input>> {
        if needed.is_zero() {
            if !self.inputs.is_empty() {
                warn!(
                    "transfer moves no value, {} configured input(s) left unspent",
                    self.inputs.len()
                );
            }
            return Ok(Vec::new());
        }
        if self.inputs.is_empty() {
            let mut lookup = GetInputs::builder()
                .seed(self.seed.clone())
                .threshold(*needed);
            if let Some(security) = self.security {
                lookup = lookup.security(security);
            }
            return Ok(lookup.build()?.execute(app_state)?.inputs);
        }

        let available = Amount::total(self.inputs.iter().map(|i| &i.balance))?;
        if available.lt(needed) {
            return Err(AppErrors::InsufficientBalance {
                needed: *needed,
                available,
            });
        }
        Ok(self.inputs.clone())
    }

    fn remainder_target(&self, app_state: &AppState, inputs: &[Input]) -> AppResult<Address> {
        if let Some(address) = &self.remainder_address {
            return Ok(address.clone());
        }
        let after_inputs = inputs.iter().map(|i| i.key_index + 1).max().unwrap_or(0);
        let mut lookup = GetNewAddress::builder()
            .seed(self.seed.clone())
            .index(after_inputs);
        if let Some(security) = self.security {
            lookup = lookup.security(security);
        }
        lookup
            .build()?
            .execute(app_state)?
            .addresses
            .into_iter()
            .next()
            .ok_or_else(|| AppErrors::InvalidInput("no remainder address derived".into()))
    }

    fn prepare_bundle(
        &self,
        app_state: &AppState,
        needed: &Amount,
        inputs: &[Input],
    ) -> AppResult<Bundle> {
        let mut entries: Vec<BundleEntry> = self
            .transfers
            .iter()
            .map(|t| BundleEntry {
                kind: EntryKind::Output,
                address: t.address.without_checksum(),
                value: t.value,
                message: t.message.clone(),
                tag: t.tag.clone(),
                key_index: None,
            })
            .collect();

        for input in inputs {
            entries.push(BundleEntry {
                kind: EntryKind::Input,
                address: input.address.without_checksum(),
                value: Amount::zero().minus(&input.balance)?,
                message: None,
                tag: None,
                key_index: Some(input.key_index),
            });
        }

        let available = Amount::total(inputs.iter().map(|i| &i.balance))?;
        let remainder = available.minus(needed)?;
        if remainder.is_positive() {
            let address = self.remainder_target(app_state, inputs)?;
            debug!("sending remainder of {remainder} to {address}");
            entries.push(BundleEntry {
                kind: EntryKind::Remainder,
                address: address.without_checksum(),
                value: remainder,
                message: None,
                tag: None,
                key_index: None,
            });
        }

        let bundle = Bundle {
            entries,
            trytes: Vec::new(),
        };
        let balance = bundle.balance()?;
        if !balance.is_zero() {
            return Err(AppErrors::InvalidInput(format!(
                "bundle does not balance: off by {balance}"
            )));
        }
        Ok(bundle)
    }
}

impl Action for SendTransfer {
    type Output = SentTransfer;

    fn execute(&self, app_state: &AppState) -> AppResult<SentTransfer> {
        let mut steps = Vec::new();

        let needed = Amount::total(self.transfers.iter().map(|t| &t.value))
            .at_step(ActionStep::PrepareBundle)?;
        let inputs = self
            .resolve_inputs(app_state, &needed)
            .at_step(ActionStep::ResolveInputs)?;
        steps.push(ActionStep::ResolveInputs);
        debug!("resolved {} input(s) for {needed} iotas", inputs.len());

        let bundle = self
            .prepare_bundle(app_state, &needed, &inputs)
            .at_step(ActionStep::PrepareBundle)?;
        steps.push(ActionStep::PrepareBundle);

        let signed = app_state
            .crypto
            .sign(bundle, &self.seed, &inputs, self.hmac_key.as_deref())
            .at_step(ActionStep::Sign)?;
        steps.push(ActionStep::Sign);

        let attached = app_state
            .crypto
            .attach(
                signed,
                self.depth,
                self.min_weight_magnitude,
                self.reference.as_deref(),
            )
            .at_step(ActionStep::Attach)?;
        steps.push(ActionStep::Attach);

        let broadcast = BroadcastTransactionsCommand::new(attached.trytes.clone())
            .execute(app_state)
            .at_step(ActionStep::Broadcast)?;
        steps.push(ActionStep::Broadcast);

        let stored = StoreTransactionsCommand::new(attached.trytes.clone())
            .execute(app_state)
            .at_step(ActionStep::Store)?;
        steps.push(ActionStep::Store);

        info!(
            "sent {needed} iotas in {} transaction(s)",
            attached.trytes.len()
        );
        Ok(SentTransfer {
            bundle: attached,
            inputs,
            broadcast,
            stored,
            steps,
        })
    }
}
