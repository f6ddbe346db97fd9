//! Engine configuration
//!
//! Supports:
//! - `.jsonform/config.toml` - Engine-wide settings (debug mode, theme,
//!   validation messages, control labels)

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings, parse_settings, save_settings};
pub use types::*;
