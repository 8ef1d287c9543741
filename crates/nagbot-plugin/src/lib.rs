//! # nagbot-plugin
//!
//! Chat-facing layer of nagbot. Provides:
//!
//! - [`Command`] parsing with the exact user-facing usage replies
//! - [`CommandRouter`] dispatch that turns every outcome into one reply
//! - The registration table used for host command registration and help
//! - [`MonitoringPlugin`] activation and deactivation
//! - Console and webhook message sinks for report posts

pub mod command;
pub mod messages;
pub mod plugin;
pub mod poster;
pub mod registry;
pub mod router;

#[cfg(test)]
mod test_support;

pub use command::{Command, Topic};
pub use plugin::{MonitoringPlugin, Plugin, PluginInfo};
pub use registry::{CommandInfo, registered_commands};
pub use router::CommandRouter;
