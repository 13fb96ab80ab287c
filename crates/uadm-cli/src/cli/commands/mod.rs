//! CLI command handlers.

pub mod config;
pub mod health;
pub mod tui;
pub mod user_login;

use uadm_core::config::Config;
use uadm_core::{ApiClient, SessionStore};

/// Builds a client with a fresh, empty session.
fn client(config: &Config, base_url: String) -> ApiClient {
    ApiClient::new(base_url, SessionStore::new()).with_admin_login_path(&config.admin_login_path)
}
