// SPDX-License-Identifier: GPL-3.0-only

use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Ask before opening and printing a decoded link
    pub confirm_before_print: bool,
    /// Last used camera device path
    pub last_camera_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            confirm_before_print: true,
            last_camera_path: None,
        }
    }
}
