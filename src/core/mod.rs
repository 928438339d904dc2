pub mod config;
pub mod error;
pub mod gateway;
#[cfg(test)]
pub mod memory_store;
pub mod object_store;
pub mod s3_client;
pub mod transcoder;
pub mod validator;
