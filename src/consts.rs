/// Total number of iotas that can ever exist.
/// Every `Amount` is bounded by `-MAX_SUPPLY..=MAX_SUPPLY`.
pub const MAX_SUPPLY: i64 = 2_779_530_283_277_761;

/// Fractional digits kept when an amount is scaled down into a larger unit.
pub const UNIT_SCALE: u32 = 15;

/// Confirmation threshold sent with `getBalances` when the caller never set one.
pub const DEFAULT_BALANCE_THRESHOLD: u8 = 100;
/// Confirmation thresholds are percentages.
pub const MAX_BALANCE_THRESHOLD: u8 = 100;

/// IRI's API port, used when a node URL names none.
pub const DEFAULT_NODE_PORT: u16 = 14265;

pub const ADDRESS_LENGTH: usize = 81;
pub const ADDRESS_WITH_CHECKSUM_LENGTH: usize = 90;
