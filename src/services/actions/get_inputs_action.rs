use crate::errors::{AppErrors, AppResult, StepContext};
use crate::models::action_step::ActionStep;
use crate::models::amount::Amount;
use crate::models::identifiers::{Address, KeyIndex, SecurityLevel, Seed};
use crate::models::transfer::Input;
use crate::services::actions::get_new_address_action::scan_addresses;
use crate::services::actions::traits::action_trait::Action;
use crate::services::commands::get_balances_command::GetBalancesCommand;
use crate::services::commands::traits::node_command_trait::NodeCommand;
use crate::state::AppState;
use log::{debug, info};

/// Collects the seed's addresses that hold funds.
///
/// Addresses come from `start..end` when `end` is set, otherwise from
/// scanning until the first unused address. When `threshold` is set, inputs
/// are taken in index order until it is covered.
#[derive(Debug, Clone)]
pub struct GetInputs {
    seed: Seed,
    start: KeyIndex,
    end: Option<KeyIndex>,
    security: Option<SecurityLevel>,
    threshold: Option<Amount>,
}

#[derive(Debug, Clone, Default)]
pub struct GetInputsBuilder {
    seed: Option<Seed>,
    start: KeyIndex,
    end: Option<KeyIndex>,
    security: Option<SecurityLevel>,
    threshold: Option<Amount>,
}

impl GetInputsBuilder {
    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn start(mut self, start: KeyIndex) -> Self {
        self.start = start;
        self
    }

    /// Exclusive upper bound of the index range.
    pub fn end(mut self, end: KeyIndex) -> Self {
        self.end = Some(end);
        self
    }

    pub fn security(mut self, security: SecurityLevel) -> Self {
        self.security = Some(security);
        self
    }

    pub fn threshold(mut self, threshold: Amount) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn build(self) -> AppResult<GetInputs> {
        let seed = self
            .seed
            .ok_or(AppErrors::IncompleteConfiguration("seed is required"))?;
        if let Some(end) = self.end.filter(|end| *end <= self.start) {
            return Err(AppErrors::InvalidInput(format!(
                "end index {end} must be greater than start index {}",
                self.start
            )));
        }
        if self.threshold.is_some_and(|t| t.is_negative()) {
            return Err(AppErrors::InvalidInput("threshold must not be negative".into()));
        }
        Ok(GetInputs {
            seed,
            start: self.start,
            end: self.end,
            security: self.security,
            threshold: self.threshold,
        })
    }
}

impl GetInputs {
    pub fn builder() -> GetInputsBuilder {
        GetInputsBuilder::default()
    }

    fn candidate_addresses(&self, app_state: &AppState) -> AppResult<Vec<(KeyIndex, Address)>> {
        match self.end {
            Some(end) => (self.start..end)
                .map(|i| {
                    app_state
                        .crypto
                        .derive_address(&self.seed, i, self.security)
                        .map(|a| (i, a))
                })
                .collect::<AppResult<Vec<_>>>()
                .at_step(ActionStep::DeriveAddress),
            None => Ok(scan_addresses(app_state, &self.seed, self.start, self.security)?.used),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Inputs {
    pub inputs: Vec<Input>,
    pub total_balance: Amount,
    /// Milestone the balances were confirmed against; `None` if no address
    /// needed to be queried.
    pub milestone_index: Option<u64>,
    pub steps: Vec<ActionStep>,
}

impl Action for GetInputs {
    type Output = Inputs;

    fn execute(&self, app_state: &AppState) -> AppResult<Inputs> {
        let mut steps = vec![ActionStep::DeriveAddress];
        let candidates = self.candidate_addresses(app_state)?;
        debug!("checking balances of {} address(es)", candidates.len());

        let mut inputs = Vec::new();
        let mut milestone_index = None;
        if !candidates.is_empty() {
            let cmd = GetBalancesCommand::new(candidates.iter().map(|(_, a)| a));
            let resp = cmd.execute(app_state).at_step(ActionStep::GetBalances)?;
            let balances = cmd.balances_for(&resp).at_step(ActionStep::GetBalances)?;
            milestone_index = Some(resp.milestone_index().at_step(ActionStep::GetBalances)?);
            steps.push(ActionStep::GetBalances);

            inputs = candidates
                .iter()
                .zip(balances)
                .filter(|(_, (_, balance))| balance.is_positive())
                .map(|((key_index, address), (_, balance))| Input {
                    address: address.clone(),
                    key_index: *key_index,
                    security: self.security,
                    balance,
                })
                .collect();
        }

        if let Some(threshold) = self.threshold {
            inputs = select_inputs(inputs, &threshold).at_step(ActionStep::ResolveInputs)?;
            steps.push(ActionStep::ResolveInputs);
        }

        let total_balance =
            Amount::total(inputs.iter().map(|i| &i.balance)).at_step(ActionStep::ResolveInputs)?;
        info!(
            "found {} input(s) holding {total_balance} iotas",
            inputs.len()
        );
        Ok(Inputs {
            inputs,
            total_balance,
            milestone_index,
            steps,
        })
    }
}

/// Takes inputs in order until `threshold` is covered.
fn select_inputs(candidates: Vec<Input>, threshold: &Amount) -> AppResult<Vec<Input>> {
    let mut selected = Vec::new();
    let mut collected = Amount::zero();
    for input in candidates {
        if collected.ge(threshold) {
            break;
        }
        collected = collected.plus(&input.balance)?;
        selected.push(input);
    }
    if collected.lt(threshold) {
        return Err(AppErrors::InsufficientBalance {
            needed: *threshold,
            available: collected,
        });
    }
    Ok(selected)
}
