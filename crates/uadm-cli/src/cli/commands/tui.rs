//! Interactive admin console.

use std::path::Path;

use anyhow::Result;
use uadm_core::config::Config;
use uadm_core::logging::LOG_FILE_NAME;

pub async fn run(config: &Config, base_url: String, log_dir: &Path) -> Result<()> {
    let api = super::client(config, base_url);
    uadm_tui::run_interactive(api, Some(&log_dir.join(LOG_FILE_NAME))).await
}
