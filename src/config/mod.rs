//! Configuration management
//!
//! Flat JSON settings merged over built-in defaults, loaded once per
//! process and passed down explicitly.

pub mod hotkeys;
pub mod settings;

pub use hotkeys::HotkeyLabels;
pub use settings::Config;
