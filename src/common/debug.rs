use std::process::Command;
use tracing::debug;

/// Graphical session variables that decide which clipboard backend works
const SESSION_VARS: &[&str] = &[
    "XDG_SESSION_TYPE",
    "XDG_CURRENT_DESKTOP",
    "WAYLAND_DISPLAY",
    "DISPLAY",
];

/// Log session information for debugging clipboard and dialog failures
pub fn log_session_info() {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    debug!("=== Session Information ===");

    if let Ok(kernel) = get_command_output("uname", &["-sr"]) {
        debug!("Kernel: {}", kernel);
    }

    for var in SESSION_VARS {
        match std::env::var(var) {
            Ok(value) => debug!("{}: {}", var, value),
            Err(_) => debug!("{}: <unset>", var),
        }
    }

    for binary in [
        crate::constants::desktop::DIALOG_BIN,
        crate::constants::desktop::NOTIFY_BIN,
    ] {
        let found = get_command_output("which", &[binary])
            .map(|p| !p.is_empty())
            .unwrap_or(false);
        debug!("{} available: {}", binary, found);
    }

    debug!("===========================");
}

fn get_command_output(cmd: &str, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new(cmd).args(args).output()?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
