pub mod actions;
pub mod commands;
pub mod crypto;
pub mod response;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;
