use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Theme overrides, keyed by theme slot name (e.g. `background = "#000000"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Initial swatch of the tag combobox, `#RRGGBB`
    #[serde(default = "default_tag_color")]
    pub default_tag_color: String,
    /// Kitty keyboard protocol: true = force on, false = force off, absent = on.
    /// Needed for Ctrl+M to arrive as a distinct key.
    #[serde(default)]
    pub kitty_keyboard: Option<bool>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
            default_tag_color: default_tag_color(),
            kitty_keyboard: None,
        }
    }
}

/// Settings for the local host process integration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Where library.json, .state.json and the log file live
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Program + args used to open folders and links; the target is appended
    #[serde(default)]
    pub open_command: Option<Vec<String>>,
    /// Program + args that print a chosen directory on stdout
    #[serde(default)]
    pub folder_picker: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// One of error, warn, info, debug, trace
    #[serde(default)]
    pub level: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_tag_color() -> String {
    "#000000".to_string()
}
