//! Background report subscription for nagbot.
//!
//! This crate provides:
//! - A report job that fetches the monitoring status summary and posts it
//! - A subscription manager owning the single report polling task, with
//!   cancel-then-replace on duplicate subscribe and joined shutdown

pub mod report;
pub mod subscription;

#[cfg(test)]
mod test_support;

pub use report::ReportJob;
pub use subscription::SubscriptionManager;
