//! # filedesk-core
//!
//! Core crate for FileDesk. Contains the unified error system, configuration
//! schemas, typed identifiers and their sequences, domain events, and the
//! traits implemented by the storage and service crates.
//!
//! This crate has **no** internal dependencies on other FileDesk crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
