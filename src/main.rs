#![deny(unsafe_code)]

mod common;
mod config;
mod constants;
mod desktop;
mod report;
mod saver;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::config::Config;
use crate::desktop::{GnomeDesktop, SystemClipboard};
use crate::report::ConfigSummary;
use crate::saver::{ClipboardSaver, SaveMode};

#[derive(Parser, Debug)]
#[command(name = "clipboard-saver")]
#[command(version)]
#[command(about = "Clipboard Saver - save clipboard content to files with desktop hotkeys", long_about = None)]
#[command(after_help = "Configure hotkeys in your desktop settings (GNOME: Settings → Keyboard → Custom Shortcuts)")]
struct Cli {
    /// Path to custom config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// List recent saves (optional: number of files to show)
    #[arg(
        short,
        long,
        value_name = "COUNT",
        num_args = 0..=1,
        default_missing_value = "10"
    )]
    list: Option<usize>,

    /// Show configuration information
    #[arg(short, long)]
    info: bool,

    /// Create default configuration file
    #[arg(long)]
    init_config: bool,

    /// Open dialog to enter custom filename
    #[arg(short, long)]
    custom: bool,

    /// Quick save using template (default behavior)
    // Accepted so hotkey commands can be explicit; quick save is the fallthrough
    #[allow(dead_code)]
    #[arg(short, long)]
    quick: bool,

    /// Save with specific filename
    #[arg(short, long, value_name = "NAME")]
    filename: Option<String>,
}

/// The single action a process performs
#[derive(Debug, PartialEq, Eq)]
enum Action {
    InitConfig,
    List(usize),
    Info,
    Save(SaveMode),
}

impl Cli {
    fn action(&self) -> Action {
        if self.init_config {
            Action::InitConfig
        } else if let Some(count) = self.list {
            Action::List(count)
        } else if self.info {
            Action::Info
        } else if let Some(name) = self.filename.as_ref().filter(|n| !n.is_empty()) {
            Action::Save(SaveMode::Named(name.clone()))
        } else if self.custom {
            Action::Save(SaveMode::Prompt)
        } else {
            Action::Save(SaveMode::Quick)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    #[cfg(unix)]
    if let Err(e) = install_interrupt_handler() {
        eprintln!("Failed to install signal handler: {}", e);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let action = cli.action();
    let load_config = || {
        let config = Config::load(cli.config.as_deref());
        common::logging::init(config.tracing_level());
        common::debug::log_session_info();
        debug!(?action, "Dispatching");
        config
    };

    match action {
        Action::InitConfig => {
            let path = Config::init_default()?;
            println!("Default configuration created: {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Action::List(count) => {
            let config = load_config();
            let saves = report::list_saves(&config.save_dir_path(), count)?;
            println!("{}", report::render_listing(&saves));
            Ok(ExitCode::SUCCESS)
        }
        Action::Info => {
            let config = load_config();
            println!("{}", ConfigSummary::collect(&config)?);
            Ok(ExitCode::SUCCESS)
        }
        Action::Save(ref mode) => {
            let config = load_config();
            let mut saver = ClipboardSaver::new(config, SystemClipboard, GnomeDesktop);
            Ok(match saver.save(mode.clone()) {
                Ok(_) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            })
        }
    }
}

/// Exit with status 1 on SIGINT/SIGTERM instead of dying mid-write
#[cfg(unix)]
fn install_interrupt_handler() -> std::io::Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    std::thread::spawn(move || {
        if signals.forever().next().is_some() {
            eprintln!("\nOperation cancelled by user.");
            std::process::exit(1);
        }
    });
    Ok(())
}
