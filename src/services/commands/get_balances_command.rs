use crate::consts::{DEFAULT_BALANCE_THRESHOLD, MAX_BALANCE_THRESHOLD};
use crate::errors::{AppErrors, AppResult};
use crate::models::amount::Amount;
use crate::models::identifiers::Address;
use crate::services::commands::traits::node_command_trait::NodeCommand;
use crate::services::response::Response;
use serde::{Deserialize, Serialize, Serializer};

/// Confirmed balances of a set of addresses.
///
/// Addresses are kept without checksum since the node only understands
/// bare 81-tryte addresses. An unset `threshold` goes out as 100.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetBalancesCommand {
    addresses: Vec<Address>,
    #[serde(serialize_with = "threshold_or_default")]
    threshold: Option<u8>,
}

fn threshold_or_default<S>(threshold: &Option<u8>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(threshold.unwrap_or(DEFAULT_BALANCE_THRESHOLD))
}

impl GetBalancesCommand {
    pub fn new<'a>(addresses: impl IntoIterator<Item = &'a Address>) -> Self {
        Self {
            addresses: addresses.into_iter().map(Address::without_checksum).collect(),
            threshold: None,
        }
    }

    pub fn add_address(mut self, address: &Address) -> Self {
        self.addresses.push(address.without_checksum());
        self
    }

    /// Confirmation percentage the balances must reach, at most 100.
    pub fn with_threshold(mut self, threshold: u8) -> AppResult<Self> {
        if threshold > MAX_BALANCE_THRESHOLD {
            return Err(AppErrors::InvalidInput(format!(
                "threshold {threshold} exceeds {MAX_BALANCE_THRESHOLD}"
            )));
        }
        self.threshold = Some(threshold);
        Ok(self)
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Pairs each requested address with its balance, in request order.
    pub fn balances_for(&self, resp: &Response<Self>) -> AppResult<Vec<(Address, Amount)>> {
        let balances = resp.balances()?;
        if balances.len() != self.addresses.len() {
            return Err(AppErrors::MalformedResponse {
                command: Self::NAME,
                reason: format!(
                    "{} balances for {} addresses",
                    balances.len(),
                    self.addresses.len()
                ),
            });
        }
        Ok(self
            .addresses
            .iter()
            .cloned()
            .zip(balances.iter().copied())
            .collect())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balances {
    pub balances: Vec<Amount>,
    pub milestone: String,
    pub milestone_index: u64,
    #[serde(default)]
    pub duration: Option<u64>,
}

impl NodeCommand for GetBalancesCommand {
    const NAME: &'static str = "getBalances";
    type Payload = Balances;
}

impl Response<GetBalancesCommand> {
    pub fn balances(&self) -> AppResult<&[Amount]> {
        Ok(&self.payload()?.balances)
    }

    pub fn milestone(&self) -> AppResult<&str> {
        Ok(&self.payload()?.milestone)
    }

    pub fn milestone_index(&self) -> AppResult<u64> {
        Ok(self.payload()?.milestone_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{Harness, address_for};
    use serde_json::json;

    #[test]
    fn checksum_is_stripped_and_threshold_defaults_to_100() {
        // arrange
        let bare = "B".repeat(81);
        let with_checksum = Address::new(format!("{bare}ABCDEFGHI")).unwrap();

        // act
        let payload = GetBalancesCommand::new([&with_checksum])
            .serialize_command()
            .unwrap();

        // assert
        assert_eq!(
            serde_json::Value::Object(payload),
            json!({"command": "getBalances", "addresses": [bare], "threshold": 100})
        );
    }

    #[test]
    fn explicit_threshold_is_kept() {
        let cmd = GetBalancesCommand::default()
            .add_address(&address_for(1))
            .with_threshold(50)
            .unwrap();

        let payload = cmd.serialize_command().unwrap();

        assert_eq!(payload["threshold"], json!(50));
        assert_eq!(payload.keys().next().map(String::as_str), Some("command"));
    }

    #[test]
    fn threshold_above_100_is_rejected() {
        let res = GetBalancesCommand::new([&address_for(1)]).with_threshold(101);

        assert!(matches!(res, Err(AppErrors::InvalidInput(_))));
        assert!(
            GetBalancesCommand::new([&address_for(1)])
                .with_threshold(100)
                .is_ok()
        );
    }

    #[test]
    fn balances_pair_with_addresses_in_order() {
        // arrange
        let h = Harness::new();
        h.transport.reply(
            "getBalances",
            200,
            r#"{"balances":["5","0"],"milestone":"M9","milestoneIndex":7}"#,
        );
        let cmd = GetBalancesCommand::new([&address_for(0), &address_for(1)]);

        // act
        let resp = cmd.execute(&h.state()).unwrap();
        let pairs = cmd.balances_for(&resp).unwrap();

        // assert
        assert_eq!(resp.milestone().unwrap(), "M9");
        assert_eq!(resp.milestone_index().unwrap(), 7);
        assert_eq!(pairs[0], (address_for(0), Amount::new(5).unwrap()));
        assert_eq!(pairs[1], (address_for(1), Amount::zero()));
    }

    #[test]
    fn balance_count_mismatch_is_malformed() {
        let h = Harness::new();
        h.transport.reply(
            "getBalances",
            200,
            r#"{"balances":["5"],"milestone":"M9","milestoneIndex":7}"#,
        );
        let cmd = GetBalancesCommand::new([&address_for(0), &address_for(1)]);

        let resp = cmd.execute(&h.state()).unwrap();

        assert!(matches!(
            cmd.balances_for(&resp),
            Err(AppErrors::MalformedResponse { .. })
        ));
    }

    #[test]
    fn balance_above_supply_is_malformed() {
        let h = Harness::new();
        h.transport.reply(
            "getBalances",
            200,
            r#"{"balances":["2779530283277762"],"milestone":"M9","milestoneIndex":7}"#,
        );

        let res = GetBalancesCommand::new([&address_for(0)]).execute(&h.state());

        assert!(matches!(res, Err(AppErrors::MalformedResponse { .. })));
    }
}
