//! Opening record video links.
//!
//! Links are handed to the platform opener (`xdg-open`, `open`, or `start`).
//! When no opener works the link is copied to the clipboard instead, using
//! the native clipboard or, failing that, an OSC 52 escape sequence.

use arboard::Clipboard;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Native clipboard handle, created on first use.
static CLIPBOARD: Mutex<Option<Clipboard>> = Mutex::new(None);

/// What happened to a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Handed to the platform opener.
    Opened,
    /// Copied to the clipboard.
    Copied,
}

impl LinkOutcome {
    /// Short message for a toast.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Opened => "Opening video in browser",
            Self::Copied => "Video link copied to clipboard",
        }
    }
}

/// Link handling errors.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Not a web link: {0}")]
    InvalidLink(String),
    #[error("Failed to copy link: {0}")]
    Copy(String),
}

/// Accepts only absolute http(s) links.
pub fn validate_link(link: &str) -> Result<Url, LinkError> {
    let url = Url::parse(link).map_err(|_| LinkError::InvalidLink(link.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(LinkError::InvalidLink(link.to_string())),
    }
}

/// Command that opens `url` on this platform.
fn opener(url: &Url) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(url.as_str());
        cmd
    }
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url.as_str()]);
        cmd
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url.as_str());
        cmd
    }
}

/// Opens `link`, falling back to copying it.
pub fn open(link: &str) -> Result<LinkOutcome, LinkError> {
    let url = validate_link(link)?;

    let spawned = opener(&url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match spawned {
        Ok(_) => {
            debug!(%url, "Link handed to opener");
            Ok(LinkOutcome::Opened)
        }
        Err(e) => {
            warn!("No link opener available, copying instead: {e}");
            copy(url.as_str())?;
            Ok(LinkOutcome::Copied)
        }
    }
}

/// Copies text to the clipboard.
pub fn copy(text: &str) -> Result<(), LinkError> {
    match copy_native(text) {
        Ok(()) => Ok(()),
        Err(e) => {
            debug!("Native clipboard unavailable, using OSC 52: {e}");
            copy_osc52(text)
        }
    }
}

fn copy_native(text: &str) -> Result<(), LinkError> {
    let mut guard = CLIPBOARD
        .lock()
        .map_err(|_| LinkError::Copy("clipboard lock poisoned".to_string()))?;
    if guard.is_none() {
        *guard = Some(Clipboard::new().map_err(|e| LinkError::Copy(e.to_string()))?);
    }
    let clipboard = guard
        .as_mut()
        .ok_or_else(|| LinkError::Copy("clipboard not initialized".to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| LinkError::Copy(e.to_string()))
}

/// Builds the OSC 52 sequence that asks the terminal to set the clipboard.
pub fn osc52_sequence(text: &str) -> String {
    use base64::{engine::general_purpose::STANDARD, Engine};

    // ESC ] 52 ; c ; <base64-data> ESC \
    format!("\x1b]52;c;{}\x1b\\", STANDARD.encode(text))
}

fn copy_osc52(text: &str) -> Result<(), LinkError> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(osc52_sequence(text).as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| LinkError::Copy(format!("Failed to write OSC 52: {e}")))
}
