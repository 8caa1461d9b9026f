//! Shared application state injected into every Axum handler.

use crate::registry::ProtectionRegistry;
use crate::store::{ContentStore, DeviceStore};

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable (`Arc`-backed) so that Axum can clone the
/// state for each request without copying data.
#[derive(Clone, Default)]
pub struct AppState {
    /// Lock-free registry of protection systems.
    pub registry: ProtectionRegistry,
    /// Store of encrypted content records.
    pub contents: ContentStore,
    /// Store of registered devices.
    pub devices: DeviceStore,
}

impl AppState {
    /// Create a new [`AppState`] with empty registry and stores.
    pub fn new() -> Self {
        Self::default()
    }
}
