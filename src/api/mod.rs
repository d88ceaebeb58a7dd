//! # Backend API
//!
//! Wire types and the HTTP client for the generation service.
//!
//! The service owns everything interesting (models, quotas, billing). Muse only
//! posts the page transcript and reads back one message.

pub mod client;
pub mod types;

pub use client::{BackendError, GenerationBackend, HttpBackend};
pub use types::{GenerateRequest, Message, Role, UpgradeLink, Usage};
