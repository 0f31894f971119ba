//! Client-side access to a tangle node's command API.
//!
//! Single commands (`services::commands`) serialize to the node's JSON
//! payloads and come back as validated [`Response`]s. Actions
//! (`services::actions`) chain commands with the [`CryptoCapability`] into
//! one fail-fast operation. Both run against an [`AppState`] that supplies
//! the node, the [`Transport`] and the crypto capability.

pub mod consts;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;

pub use errors::{AmountError, AppErrors, AppResult};
pub use models::action_step::ActionStep;
pub use models::amount::{Amount, Unit};
pub use models::identifiers::{Address, KeyIndex, SecurityLevel, Seed, Trytes, TxHash};
pub use models::node::{Node, Protocol};
pub use models::transfer::{Bundle, BundleEntry, EntryKind, Input, Transfer};
pub use services::actions::traits::action_trait::Action;
pub use services::commands::traits::node_command_trait::NodeCommand;
pub use services::crypto::CryptoCapability;
pub use services::response::Response;
pub use services::transport::{RawResponse, Transport};
pub use state::AppState;
