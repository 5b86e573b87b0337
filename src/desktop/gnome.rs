//! zenity / notify-send backend
//!
//! Both helpers are spawned with an argv list; nothing goes through a shell,
//! so clipboard-derived names cannot inject commands.

use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{debug, error};

use crate::constants::desktop;
use crate::desktop::backend::Desktop;

#[derive(Debug, Default, Clone, Copy)]
pub struct GnomeDesktop;

fn dialog_args(suggested: &str) -> Vec<String> {
    vec![
        "--entry".to_string(),
        format!("--title={}", desktop::DIALOG_TITLE),
        format!("--text={}", desktop::DIALOG_TEXT),
        "--entry-text".to_string(),
        suggested.to_string(),
        format!("--width={}", desktop::DIALOG_WIDTH),
    ]
}

fn notify_args(title: &str, body: &str, expire: Duration) -> Vec<String> {
    vec![
        title.to_string(),
        body.to_string(),
        "-t".to_string(),
        expire.as_millis().to_string(),
    ]
}

/// Entered name, or `None` when the dialog was dismissed or left blank
fn parse_dialog_output(accepted: bool, stdout: &[u8]) -> Option<String> {
    if !accepted {
        return None;
    }
    let name = String::from_utf8_lossy(stdout).trim().to_string();
    (!name.is_empty()).then_some(name)
}

impl Desktop for GnomeDesktop {
    fn prompt_filename(&self, suggested: &str) -> Option<String> {
        let output = Command::new(desktop::DIALOG_BIN)
            .args(dialog_args(suggested))
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) => parse_dialog_output(output.status.success(), &output.stdout),
            Err(e) => {
                error!(binary = desktop::DIALOG_BIN, error = %e, "Error showing filename dialog");
                None
            }
        }
    }

    fn notify(&self, title: &str, body: &str, expire: Duration) {
        let result = Command::new(desktop::NOTIFY_BIN)
            .args(notify_args(title, body, expire))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        if let Err(e) = result {
            debug!(binary = desktop::NOTIFY_BIN, error = %e, "Notification not sent");
        }
    }
}
