pub mod client;
pub mod v0;
