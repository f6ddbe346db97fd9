//! Loading and saving `.jsonform/config.toml`

use std::path::Path;

use jsonform_core::prelude::*;

use super::types::EngineSettings;

const JSONFORM_DIR: &str = ".jsonform";
const CONFIG_FILENAME: &str = "config.toml";

/// Load settings from `.jsonform/config.toml`
///
/// Missing or unreadable files fall back to defaults.
pub fn load_settings(project_path: &Path) -> EngineSettings {
    let config_path = project_path.join(JSONFORM_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return EngineSettings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match parse_settings(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                EngineSettings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            EngineSettings::default()
        }
    }
}

/// Parse settings from TOML text
pub fn parse_settings(content: &str) -> Result<EngineSettings> {
    Ok(toml::from_str(content)?)
}

/// Create `.jsonform/config.toml` with commented defaults, unless it exists
pub fn init_config_dir(project_path: &Path) -> Result<()> {
    let dir = project_path.join(JSONFORM_DIR);

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::config(format!("Failed to create .jsonform dir: {}", e)))?;
    }

    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# jsonform Configuration

[engine]
debug = false           # Show diagnostic blocks for broken fields
theme = "bootstrap4"    # Any registered theme name

[validation]
hide_validation = true  # Only annotate invalid fields

[validation.messages]
text = "Please fill out this field."
choice = "Please select an option."
check = "Please check this box."
file = "Please upload a file."
list = "Please add at least one entry."

[controls]
submit_text = "Submit"
add_text = "Add"
remove_text = "Remove"
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created {:?}", config_path);
    }

    Ok(())
}

/// Save settings to `.jsonform/config.toml`
///
/// Writes to a temp file first, then renames it over the old file.
pub fn save_settings(project_path: &Path, settings: &EngineSettings) -> Result<()> {
    let dir = project_path.join(JSONFORM_DIR);

    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| Error::config(format!("Failed to create .jsonform dir: {}", e)))?;
    }

    let config_path = dir.join(CONFIG_FILENAME);
    let temp_path = dir.join(".config.toml.tmp");

    let content = toml::to_string_pretty(settings)?;
    let full_content = format!("# jsonform Configuration\n\n{}", content);

    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;
    std::fs::rename(&temp_path, &config_path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    debug!("Saved settings to {:?}", config_path);
    Ok(())
}
