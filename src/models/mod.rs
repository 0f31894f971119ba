pub mod action_step;
pub mod amount;
pub mod identifiers;
pub mod node;
pub mod transfer;
