// SPDX-License-Identifier: GPL-3.0-only

//! Decode result handlers: dialog, open-and-print

use crate::app::frame_processor::QrAction;
use crate::app::state::{AppModel, Message, Status};
use crate::fl;
use crate::print;
use cosmic::Task;
use std::time::Instant;
use tracing::{error, info};

impl AppModel {
    /// A decode attempt finished
    pub fn handle_qr_detections_updated(
        &mut self,
        detections: Vec<QrAction>,
    ) -> Task<cosmic::Action<Message>> {
        self.last_decode_time = Some(Instant::now());

        if !self.scan.is_scanning() {
            return Task::none();
        }

        let Some(action) = detections.into_iter().next() else {
            return Task::none();
        };

        // First hit wins; capture stops so the same code is not decoded twice
        info!(content = %action.content(), "QR code decoded");
        self.stop_capture();
        self.status = Status::decoded(action.content());

        match &action {
            QrAction::Url(url) => {
                if self.config.confirm_before_print {
                    self.result_dialog = Some(action);
                    Task::none()
                } else {
                    self.start_open_and_print(url.clone())
                }
            }
            QrAction::Text(_) => {
                self.result_dialog = Some(action);
                Task::none()
            }
        }
    }

    /// User confirmed the result dialog
    pub fn handle_dialog_confirm(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(action) = self.result_dialog.take() else {
            return Task::none();
        };

        match action {
            QrAction::Url(url) => self.start_open_and_print(url),
            QrAction::Text(_) => Task::none(),
        }
    }

    /// User dismissed the result dialog
    pub fn handle_dialog_dismiss(&mut self) -> Task<cosmic::Action<Message>> {
        self.result_dialog = None;
        self.status = Status::info(fl!("status-idle"));
        Task::none()
    }

    /// The open-and-print flow finished
    pub fn handle_print_finished(
        &mut self,
        result: Result<(), String>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(()) => {
                info!("Print shortcut delivered");
                self.status = Status::success(fl!("status-print-triggered"));
            }
            Err(e) => {
                error!(error = %e, "Open-and-print failed");
                self.status = Status::error(fl!("status-open-failed"));
            }
        }
        Task::none()
    }

    /// Kick off the browser-open plus delayed print shortcut
    fn start_open_and_print(&mut self, url: String) -> Task<cosmic::Action<Message>> {
        self.status = Status::info(fl!("status-opening"));
        Task::perform(
            async move { print::open_and_print(url).await.map_err(|e| e.to_string()) },
            |result| cosmic::Action::App(Message::PrintFinished(result)),
        )
    }
}
