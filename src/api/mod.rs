//! HTTP client and data models for the channel/queue service.

mod channel;
pub mod models;

pub use channel::*;
pub use models::*;
