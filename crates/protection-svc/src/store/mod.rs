//! In-memory stores for content records and devices.
//!
//! Persistence is an external collaborator of the protection core; these
//! stores keep the service self-contained by holding rows in `RwLock`-guarded
//! maps. Handlers only ever see the store APIs, so a database-backed
//! implementation can replace them without touching the codec or handlers.

pub mod contents;
pub mod devices;

pub use contents::{ContentRecord, ContentStore};
pub use devices::{DeviceRecord, DeviceStore};
