//! Core library for uadm: configuration, the admin session, and the
//! backend API client.
//!
//! Nothing in this crate touches the terminal. The TUI and CLI crates build on
//! these types and inject a single [`session::SessionStore`] into every place
//! that needs the admin token.

pub mod api;
pub mod config;
pub mod logging;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use session::{SessionStore, SessionToken};
