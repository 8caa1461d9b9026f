//! Common types, protocol definitions, and errors shared across `content-protection-svc` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
