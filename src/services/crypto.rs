use crate::errors::AppResult;
use crate::models::identifiers::{Address, KeyIndex, SecurityLevel, Seed};
use crate::models::transfer::{Bundle, Input};

/// Hashing, signing and proof-of-work, used by actions as an opaque capability.
///
/// Optional arguments arrive as `None` when the caller never set them, so
/// implementors apply their own defaults.
pub trait CryptoCapability {
    fn derive_address(
        &self,
        seed: &Seed,
        index: KeyIndex,
        security: Option<SecurityLevel>,
    ) -> AppResult<Address>;

    fn add_checksum(&self, address: &Address) -> AppResult<Address>;

    /// Finalizes the bundle and fills `trytes` with signed transactions.
    fn sign(
        &self,
        bundle: Bundle,
        seed: &Seed,
        inputs: &[Input],
        hmac_key: Option<&str>,
    ) -> AppResult<Bundle>;

    /// Performs proof-of-work over the signed transactions.
    fn attach(
        &self,
        bundle: Bundle,
        depth: u32,
        min_weight_magnitude: u32,
        reference: Option<&str>,
    ) -> AppResult<Bundle>;
}
