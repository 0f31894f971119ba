pub mod get_inputs_action;
pub mod get_new_address_action;
pub mod send_transfer_action;
pub mod store_and_broadcast_action;
pub mod traits;
