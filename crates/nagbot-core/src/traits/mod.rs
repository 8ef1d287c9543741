//! Collaborator traits defined in `nagbot-core` and implemented by other crates.

pub mod monitoring;
pub mod poster;
pub mod store;

pub use monitoring::{ArchiveRequest, MonitoringClient, MonitoringRequest};
pub use poster::MessagePoster;
pub use store::KvStore;
