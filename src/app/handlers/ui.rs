// SPDX-License-Identifier: GPL-3.0-only

//! UI and configuration handlers

use crate::app::state::{AppModel, ContextPage, Message};
use crate::config::Config;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use tracing::error;

impl AppModel {
    /// Toggle a context drawer page open or closed
    pub fn handle_toggle_context_page(
        &mut self,
        page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    /// Flip the confirm-before-print setting and persist it
    pub fn handle_toggle_confirm_before_print(
        &mut self,
        enabled: bool,
    ) -> Task<cosmic::Action<Message>> {
        self.config.confirm_before_print = enabled;
        if let Some(handler) = &self.config_handler
            && let Err(e) = self.config.write_entry(handler)
        {
            error!(error = %e, "Failed to save config");
        }
        Task::none()
    }

    /// Configuration changed on disk
    pub fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        self.config = config;
        Task::none()
    }

    /// Open a URL from the about page
    pub fn handle_launch_url(&mut self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(e) = open::that_detached(&url) {
            error!(error = %e, url = %url, "Failed to open URL");
        }
        Task::none()
    }
}
