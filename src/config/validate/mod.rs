//! Configuration validation
//!
//! Validates training specifications for correctness before any data is
//! read or any network is built.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_config;
