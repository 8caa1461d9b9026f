//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - **No key material, plaintext, or envelope contents** must appear in any
//!   log field. Records log their ids only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`).

pub mod init;

pub use init::init_telemetry;
