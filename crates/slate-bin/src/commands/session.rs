// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session commands: `login`, `whoami`, `chat`, `logout`.
//!
//! These drive the client session core against a running server. The
//! session persists in the configured session file, so a later invocation
//! rehydrates it without logging in again.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use slate_client::{ClientConfig, Credentials, FileSessionStore, SessionManager};
use slate_config::SlateConfig;

use crate::cli::{ChatArgs, LoginArgs};
use crate::error::BinResult;

/// Default session file, used when the configuration names none.
const DEFAULT_SESSION_FILE: &str = ".slate-session.json";

/// Builds a session manager from the client section of the configuration.
fn session_manager(config: &SlateConfig) -> BinResult<SessionManager> {
    let client = &config.client;

    let client_config = ClientConfig {
        base_url: client.base_url.clone(),
        timeout: std::time::Duration::from_secs(client.timeout_secs),
        chat_timeout: std::time::Duration::from_secs(client.chat_timeout_secs),
    };

    let session_file = client
        .session_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
    let store = Arc::new(FileSessionStore::new(session_file));

    Ok(SessionManager::new(client_config, store)?)
}

/// Logs in and persists the session.
pub async fn login(config_path: &Path, args: &LoginArgs) -> BinResult<()> {
    let config = slate_config::load_config(config_path)?;
    let manager = session_manager(&config)?;

    let profile = manager
        .login(&Credentials::new(&args.email, &args.password))
        .await?;

    match profile.role {
        Some(role) => println!("Logged in as {} ({})", profile.name, role),
        None => println!("Logged in as {} (no recognizable role)", profile.name),
    }
    Ok(())
}

/// Prints the logged-in user, rehydrated from the session file.
pub async fn whoami(config_path: &Path) -> BinResult<()> {
    let config = slate_config::load_config(config_path)?;
    let manager = session_manager(&config)?;

    match manager.user() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            match manager.role() {
                Some(role) => println!("role: {}", role),
                None => println!("role: unknown"),
            }
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

/// Sends one chat message and prints the assistant's reply.
pub async fn chat(config_path: &Path, args: &ChatArgs) -> BinResult<()> {
    let config = slate_config::load_config(config_path)?;
    let manager = session_manager(&config)?;

    let reply = manager.chat(&args.message).await?;
    println!("{}", reply);
    Ok(())
}

/// Clears the stored session.
pub async fn logout(config_path: &Path) -> BinResult<()> {
    let config = slate_config::load_config(config_path)?;
    let manager = session_manager(&config)?;

    manager.logout()?;
    println!("Logged out");
    Ok(())
}
