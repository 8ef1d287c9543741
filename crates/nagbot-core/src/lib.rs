//! # nagbot-core
//!
//! Core crate for nagbot. Contains the collaborator traits (key-value
//! store, monitoring client, message poster), configuration schemas,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other nagbot crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
