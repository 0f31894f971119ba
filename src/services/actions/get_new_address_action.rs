use crate::errors::{AppErrors, AppResult, StepContext};
use crate::models::action_step::ActionStep;
use crate::models::identifiers::{Address, KeyIndex, SecurityLevel, Seed};
use crate::services::actions::traits::action_trait::Action;
use crate::services::commands::find_transactions_command::FindTransactionsCommand;
use crate::services::commands::traits::node_command_trait::NodeCommand;
use crate::state::AppState;
use log::{debug, info};

/// Addresses derived from `start` onward that already appear in transactions,
/// plus the first index whose address never did.
pub(crate) struct AddressScan {
    pub used: Vec<(KeyIndex, Address)>,
    pub unused: (KeyIndex, Address),
}

/// Walks the seed's addresses from `start`, asking the node about each one,
/// until it finds an address with no transactions.
pub(crate) fn scan_addresses(
    app_state: &AppState,
    seed: &Seed,
    start: KeyIndex,
    security: Option<SecurityLevel>,
) -> AppResult<AddressScan> {
    let mut used = Vec::new();
    let mut index = start;
    loop {
        let address = app_state
            .crypto
            .derive_address(seed, index, security)
            .at_step(ActionStep::DeriveAddress)?;
        let resp = FindTransactionsCommand::by_addresses([&address])
            .execute(app_state)
            .at_step(ActionStep::FindTransactions)?;
        if resp.hashes().at_step(ActionStep::FindTransactions)?.is_empty() {
            debug!("address at index {index} is unused");
            return Ok(AddressScan {
                used,
                unused: (index, address),
            });
        }
        used.push((index, address));
        index += 1;
    }
}

/// Derives fresh addresses from a seed.
///
/// With `total` set, exactly that many consecutive addresses are derived
/// locally. Without it, the node is consulted and the first address that
/// has never been used is returned.
#[derive(Debug, Clone)]
pub struct GetNewAddress {
    seed: Seed,
    index: KeyIndex,
    security: Option<SecurityLevel>,
    checksum: bool,
    total: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct GetNewAddressBuilder {
    seed: Option<Seed>,
    index: KeyIndex,
    security: Option<SecurityLevel>,
    checksum: bool,
    total: Option<u64>,
}

impl GetNewAddressBuilder {
    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn index(mut self, index: KeyIndex) -> Self {
        self.index = index;
        self
    }

    pub fn security(mut self, security: SecurityLevel) -> Self {
        self.security = Some(security);
        self
    }

    pub fn checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    pub fn total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn build(self) -> AppResult<GetNewAddress> {
        let seed = self
            .seed
            .ok_or(AppErrors::IncompleteConfiguration("seed is required"))?;
        if self.total == Some(0) {
            return Err(AppErrors::InvalidInput("total must be at least 1".into()));
        }
        Ok(GetNewAddress {
            seed,
            index: self.index,
            security: self.security,
            checksum: self.checksum,
            total: self.total,
        })
    }
}

impl GetNewAddress {
    pub fn builder() -> GetNewAddressBuilder {
        GetNewAddressBuilder::default()
    }
}

#[derive(Debug, Clone)]
pub struct NewAddresses {
    pub addresses: Vec<Address>,
    /// First index after the last returned address.
    pub next_index: KeyIndex,
    pub steps: Vec<ActionStep>,
}

impl Action for GetNewAddress {
    type Output = NewAddresses;

    fn execute(&self, app_state: &AppState) -> AppResult<NewAddresses> {
        let mut steps = Vec::new();

        let (mut addresses, next_index) = match self.total {
            Some(total) => {
                let end = self.index + total;
                let addresses = (self.index..end)
                    .map(|i| app_state.crypto.derive_address(&self.seed, i, self.security))
                    .collect::<AppResult<Vec<_>>>()
                    .at_step(ActionStep::DeriveAddress)?;
                steps.push(ActionStep::DeriveAddress);
                (addresses, end)
            }
            None => {
                let scan = scan_addresses(app_state, &self.seed, self.index, self.security)?;
                steps.push(ActionStep::DeriveAddress);
                steps.push(ActionStep::FindTransactions);
                let (index, address) = scan.unused;
                (vec![address], index + 1)
            }
        };

        if self.checksum {
            addresses = addresses
                .iter()
                .map(|a| app_state.crypto.add_checksum(a))
                .collect::<AppResult<Vec<_>>>()
                .at_step(ActionStep::DeriveAddress)?;
        }

        info!("derived {} new address(es), next index {next_index}", addresses.len());
        Ok(NewAddresses {
            addresses,
            next_index,
            steps,
        })
    }
}
