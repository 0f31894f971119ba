use crate::models::node::Node;
use crate::services::crypto::CryptoCapability;
use crate::services::transport::Transport;

/// Everything a command or action needs from the outside world, passed
/// explicitly into each `execute` call.
///
/// Holds borrows only, so one node and one set of collaborators can back
/// any number of independent operations.
#[derive(Clone, Copy)]
pub struct AppState<'a> {
    /// The node all commands are sent to.
    pub node: &'a Node,

    /// Delivers serialized commands to `node`.
    pub transport: &'a dyn Transport,

    /// Address derivation, signing and proof-of-work.
    pub crypto: &'a dyn CryptoCapability,
}

impl<'a> AppState<'a> {
    pub fn new(
        node: &'a Node,
        transport: &'a dyn Transport,
        crypto: &'a dyn CryptoCapability,
    ) -> Self {
        Self {
            node,
            transport,
            crypto,
        }
    }
}
