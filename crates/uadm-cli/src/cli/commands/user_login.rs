//! End-user login check.

use std::io::{self, BufRead, IsTerminal, Write};
use std::iter;

use anyhow::{Context, Result, bail};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use uadm_core::api::Credentials;
use uadm_core::config::Config;

const CANCELLED_MESSAGE: &str = "Password entry cancelled";

pub async fn run(
    config: &Config,
    base_url: String,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };
    let credentials = Credentials::from_input(username, &password)
        .context("Username and password must not be empty")?;

    let api = super::client(config, base_url);
    let response = api
        .user_login(&credentials)
        .await
        .map_err(|e| anyhow::anyhow!("Login failed: {}", e.message_or("Unknown error")))?;

    println!("Welcome, {}!", response.username());
    if response.token().is_some() {
        println!("A session token was issued.");
    }
    Ok(())
}

/// Prompts on stderr. A terminal gets a hidden raw-mode read; piped stdin is
/// read as one line.
fn prompt_password() -> Result<String> {
    let mut err = io::stderr();
    write!(err, "Password: ")?;
    err.flush()?;

    if io::stdin().is_terminal() {
        return read_hidden();
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn read_hidden() -> Result<String> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let result = collect_password(iter::from_fn(|| Some(event::read())));
    let _ = terminal::disable_raw_mode();
    writeln!(io::stderr())?;
    result
}

/// Builds the password from key presses until Enter. Esc and Ctrl+C cancel.
fn collect_password(events: impl IntoIterator<Item = io::Result<Event>>) -> Result<String> {
    let mut password = String::new();
    for event in events {
        let Event::Key(key) = event.context("read key")? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(password),
            KeyCode::Esc => bail!(CANCELLED_MESSAGE),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                bail!(CANCELLED_MESSAGE)
            }
            KeyCode::Backspace => {
                password.pop();
            }
            KeyCode::Char(c) => password.push(c),
            _ => {}
        }
    }
    bail!("Password input ended before Enter")
}
