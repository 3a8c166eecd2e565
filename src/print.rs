// SPDX-License-Identifier: GPL-3.0-only

//! Opening decoded links and triggering the browser print dialog
//!
//! The decoded URL is handed to the default URL handler, and after a fixed
//! delay a Ctrl+P keystroke is sent to the foreground application. The delay
//! is a stand-in for a page-load signal the browser does not provide.

use crate::constants::timing;
use crate::errors::PrintError;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use tracing::info;

/// Open a URL in the default browser and trigger its print dialog
pub async fn open_and_print(url: String) -> Result<(), PrintError> {
    info!(url = %url, "Opening URL in default browser");
    open::that_detached(&url).map_err(|e| PrintError::OpenFailed(e.to_string()))?;

    tokio::time::sleep(timing::BROWSER_LOAD_DELAY).await;

    // Keystroke injection is blocking; keep it off the async runtime
    tokio::task::spawn_blocking(send_print_shortcut)
        .await
        .map_err(|e| PrintError::KeystrokeFailed(e.to_string()))?
}

/// Send Ctrl+P to the foreground application
fn send_print_shortcut() -> Result<(), PrintError> {
    let mut enigo = Enigo::new(&Settings::default())
        .map_err(|e| PrintError::KeystrokeFailed(e.to_string()))?;

    enigo
        .key(Key::Control, Direction::Press)
        .map_err(|e| PrintError::KeystrokeFailed(e.to_string()))?;
    enigo
        .key(Key::Unicode('p'), Direction::Click)
        .map_err(|e| PrintError::KeystrokeFailed(e.to_string()))?;
    enigo
        .key(Key::Control, Direction::Release)
        .map_err(|e| PrintError::KeystrokeFailed(e.to_string()))?;

    info!("Print shortcut sent");
    Ok(())
}
