pub mod node_command_trait;
