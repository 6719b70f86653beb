//! # Storage Module
//!
//! Persistence for store state. Each store serializes its state to JSON and
//! hands it to a [`StateStorage`] under a namespaced key; on startup the
//! stores rehydrate from the same keys and fall back to seed data when a key
//! has never been written.
//!
//! - [`JsonFileStorage`]: one `<key>.json` file per store in a data directory
//! - [`MemoryStorage`]: in-process map, used by tests and ephemeral sessions

pub mod json_file;
pub mod memory;
pub mod traits;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use traits::{load_state, save_state, StateStorage};

/// Storage key of the family member store
pub const FAMILY_STORE_KEY: &str = "family-store";
/// Storage key of the calendar event store
pub const EVENTS_STORE_KEY: &str = "events-store";
/// Storage key of the photo gallery store
pub const GALLERY_STORE_KEY: &str = "gallery-store";
/// Storage key of the news store
pub const NEWS_STORE_KEY: &str = "news-store";
/// Storage key of the contact store
pub const CONTACT_STORE_KEY: &str = "contact-store";
