pub mod gameplay;
pub mod loader;

use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fruits: gameplay::FruitsConfig,
    pub dropper: gameplay::DropperConfig,
    pub merge: gameplay::MergeConfig,
    pub viewport: gameplay::ViewportConfig,
}

impl Config {
    // Snapshot of the global configuration
    #[must_use]
    pub fn current() -> Self {
        match CONFIG.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    // Force reload the configuration from file
    pub fn force_reload() -> bool {
        match loader::load_config_from_file() {
            Ok(new_config) => {
                Self::install(new_config);
                true
            }
            Err(e) => {
                warn!("Config reload failed, keeping previous values: {e}");
                false
            }
        }
    }

    // Replace the global configuration
    pub fn install(config: Self) {
        match CONFIG.write() {
            Ok(mut current) => *current = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }
}
