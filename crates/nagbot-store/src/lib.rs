//! # nagbot-store
//!
//! Persistence for nagbot settings. Supports two backends:
//!
//! - **memory**: process-local map, lost on restart
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//!
//! The backend is selected at runtime based on configuration. On top of the
//! raw [`KvStore`](nagbot_core::traits::KvStore) sits [`Settings`], which
//! validates and JSON-encodes each typed setting.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;
pub mod settings;

pub use keys::SettingKey;
pub use provider::StoreManager;
pub use settings::{SettingParseError, Settings};
