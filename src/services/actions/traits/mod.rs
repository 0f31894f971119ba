pub mod action_trait;
