// SPDX-License-Identifier: GPL-3.0-only

//! Message dispatch

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Route a message to its handler
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            Message::StartScan => self.handle_start_scan(),
            Message::StopScan => self.handle_stop_scan(),
            Message::CamerasEnumerated(result) => self.handle_cameras_enumerated(result),
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),
            Message::CaptureFailed(error) => self.handle_capture_failed(error),
            Message::QrDetectionsUpdated(detections) => {
                self.handle_qr_detections_updated(detections)
            }
            Message::DialogConfirm => self.handle_dialog_confirm(),
            Message::DialogDismiss => self.handle_dialog_dismiss(),
            Message::PrintFinished(result) => self.handle_print_finished(result),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::ToggleConfirmBeforePrint(enabled) => {
                self.handle_toggle_confirm_before_print(enabled)
            }
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::LaunchUrl(url) => self.handle_launch_url(url),
        }
    }
}
