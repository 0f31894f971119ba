pub mod broadcast_transactions_command;
pub mod find_transactions_command;
pub mod get_balances_command;
pub mod get_node_info_command;
pub mod store_transactions_command;
pub mod traits;
