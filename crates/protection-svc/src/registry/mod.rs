//! Protection Policy Registry: maps protection-system ids to encryption-mode
//! descriptors.
//!
//! The registry is the only component the codec depends on indirectly — a
//! handler resolves an id to a [`ProtectionMode`](crate::crypto::ProtectionMode)
//! and passes the descriptor into the codec. The codec itself never touches
//! the registry.

pub mod store;

pub use store::{ProtectionRegistry, ProtectionSystem, RegistryError};
