//! Session storage.
//!
//! Sessions are ephemeral: they live only as long as an encounter, expire
//! after a period of inactivity, and are never persisted.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::InMemorySessionStore;
pub use traits::SessionStore;
