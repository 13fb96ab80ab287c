//! Full-screen admin console for the user service.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};
use std::path::Path;

use anyhow::Result;
pub use features::{auth, users};
pub use runtime::{TuiRuntime, run_effect};
use uadm_core::ApiClient;

/// Runs the interactive admin console until the operator quits.
///
/// `log_file` is only echoed before the alternate screen takes over.
pub async fn run_interactive(api: ApiClient, log_file: Option<&Path>) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The admin console requires a terminal.\n\
             Use `uadm health` or `uadm user-login` for non-interactive checks."
        );
    }

    // Pre-TUI info, replaced by the alternate screen.
    let mut err = stderr();
    writeln!(err, "User Admin")?;
    writeln!(err, "API: {}", api.base_url())?;
    if let Some(path) = log_file {
        writeln!(err, "Log: {}", path.display())?;
    }
    err.flush()?;

    let mut runtime = TuiRuntime::new(api)?;
    runtime.run()?;
    drop(runtime);

    // Terminal is restored by now.
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
