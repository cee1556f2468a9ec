//! Captures the output of an external command as if it ran on an interactive
//! terminal.
//!
//! The command runs under a pseudo-terminal so it colors its output the way
//! it would for a person; the raw bytes are then cleaned of cursor-motion
//! artifacts (carriage-return overwrites, backspaces, erased lines) before
//! they reach the converter. If the pseudo-terminal cannot be set up the
//! capture falls back to plain redirection into a temporary file.

mod cleanup;

use std::io::Read;

use portable_pty::{CommandBuilder, PtySize, native_pty_system};
use tracing::{Level, event};

pub(crate) use cleanup::clean_terminal_output;

/// A failure while capturing an external command's output.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum CaptureError {
    #[error("No command given to capture.")]
    #[diagnostic(help("Pass the program and its arguments after the options."))]
    EmptyCommand,
    #[error("Failed to run the command under a pseudo-terminal: {0}")]
    Pty(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Runs `command` under a terminal-emulating wrapper and returns its cleaned
/// output.
///
/// Blocks until the command finishes; a command that exits nonzero still
/// yields whatever it printed, since that output is usually the point of
/// capturing it.
///
/// # Errors
/// Returns [`CaptureError`] when the command is empty or when both the
/// pseudo-terminal path and the temporary-file fallback fail to run it.
pub fn capture(command: &[String]) -> Result<String, CaptureError> {
    if command.is_empty() {
        return Err(CaptureError::EmptyCommand);
    }
    let raw = match capture_pty(command) {
        Ok(raw) => raw,
        Err(err) => {
            event!(Level::WARN, %err, "pty capture failed, using file fallback");
            capture_file(command)?
        }
    };
    let mut text = String::from_utf8_lossy(&raw).into_owned();
    // Some wrappers echo a ^D marker when standard input is /dev/null.
    if let Some(stripped) = text.strip_prefix("^D") {
        text = stripped.to_owned();
    }
    Ok(clean_terminal_output(&text))
}

fn capture_pty(command: &[String]) -> Result<Vec<u8>, CaptureError> {
    let (program, args) = command.split_first().expect("Checked by capture");
    let pty = native_pty_system();
    let pair = pty
        .openpty(PtySize {
            rows: 24,
            cols: 80,
            pixel_width: 0,
            pixel_height: 0,
        })
        .map_err(|e| CaptureError::Pty(e.to_string()))?;

    let mut cmd = CommandBuilder::new(program);
    cmd.args(args);
    cmd.env("TERM", "xterm-256color");
    let mut child = pair
        .slave
        .spawn_command(cmd)
        .map_err(|e| CaptureError::Pty(e.to_string()))?;
    // The master only sees end-of-output once every slave handle is gone.
    drop(pair.slave);

    let mut reader = pair
        .master
        .try_clone_reader()
        .map_err(|e| CaptureError::Pty(e.to_string()))?;
    let mut output = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => output.extend_from_slice(&chunk[..n]),
            // Linux reports an I/O error on the master when the child hangs
            // up; treat it as end-of-output.
            Err(_) => break,
        }
    }
    let status = child.wait().map_err(CaptureError::Io)?;
    if !status.success() {
        event!(Level::DEBUG, code = status.exit_code(), "captured command exited nonzero");
    }
    Ok(output)
}

fn capture_file(command: &[String]) -> Result<Vec<u8>, CaptureError> {
    let (program, args) = command.split_first().expect("Checked by capture");
    // The temp file unlinks when this handle drops, success or not.
    let file = tempfile::NamedTempFile::new()?;
    let status = std::process::Command::new(program)
        .args(args)
        .stdin(std::process::Stdio::null())
        .stdout(file.reopen()?)
        .stderr(file.reopen()?)
        .status()?;
    if !status.success() {
        event!(Level::DEBUG, code = status.code(), "captured command exited nonzero");
    }
    Ok(std::fs::read(file.path())?)
}
