// SPDX-License-Identifier: GPL-3.0-only

//! Camera lifecycle handlers

use crate::app::state::{AppModel, Message, ScanState, Status};
use crate::backends::camera::{self, CameraDevice, CameraFrame};
use crate::fl;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::widget;
use std::sync::Arc;
use tracing::{error, info, warn};

impl AppModel {
    /// Begin a scan: enumerate cameras off the UI thread
    pub fn handle_start_scan(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.scan.is_idle() {
            return Task::none();
        }

        info!("Starting scan");
        self.scan = ScanState::Starting;
        self.status = Status::info(fl!("status-starting"));
        self.result_dialog = None;

        Task::perform(
            async {
                // Enumeration shells out to pw-cli; keep it off the runtime
                tokio::task::spawn_blocking(camera::enumerate_cameras)
                    .await
                    .map_err(|e| e.to_string())
            },
            |result| cosmic::Action::App(Message::CamerasEnumerated(result)),
        )
    }

    /// Pick a camera from the enumeration result and start capture
    pub fn handle_cameras_enumerated(
        &mut self,
        result: Result<Vec<CameraDevice>, String>,
    ) -> Task<cosmic::Action<Message>> {
        if self.scan != ScanState::Starting {
            // Scan was cancelled while enumeration ran
            return Task::none();
        }

        let cameras = match result {
            Ok(cameras) => cameras,
            Err(e) => {
                error!(error = %e, "Camera enumeration failed");
                self.scan = ScanState::Idle;
                self.status = Status::error(fl!("status-start-failed"));
                return Task::none();
            }
        };

        if cameras.is_empty() {
            warn!("No cameras found");
            self.scan = ScanState::Idle;
            self.status = Status::error(fl!("status-no-camera"));
            return Task::none();
        }

        // Restore the last used camera when it is still present
        let device = self
            .config
            .last_camera_path
            .as_ref()
            .and_then(|last| cameras.iter().find(|cam| &cam.path == last))
            .unwrap_or(&cameras[0])
            .clone();

        info!(name = %device.name, path = %device.path, "Selected camera");
        self.remember_camera(&device.path);

        self.scan_generation += 1;
        self.scan = ScanState::Scanning { device };
        self.status = Status::info(fl!("status-scanning"));
        self.last_decode_time = None;

        Task::none()
    }

    /// Stop scanning at the user's request
    pub fn handle_stop_scan(&mut self) -> Task<cosmic::Action<Message>> {
        if self.scan.is_idle() {
            return Task::none();
        }

        info!("Stopping scan");
        self.stop_capture();
        self.status = Status::info(fl!("status-stopped"));
        Task::none()
    }

    /// Tear down capture state; the subscription drops the pipeline
    pub fn stop_capture(&mut self) {
        self.scan = ScanState::Idle;
        self.current_frame = None;
        self.preview = None;
        self.last_decode_time = None;
    }

    /// Store a new frame and rebuild the preview handle
    pub fn handle_camera_frame(&mut self, frame: Arc<CameraFrame>) -> Task<cosmic::Action<Message>> {
        if !self.scan.is_scanning() {
            // Frame from a pipeline that is already being torn down
            return Task::none();
        }

        self.preview = Some(widget::image::Handle::from_rgba(
            frame.width,
            frame.height,
            frame.rgba_bytes(),
        ));
        self.current_frame = Some(frame);
        Task::none()
    }

    /// Capture pipeline failed to start or died mid-scan
    pub fn handle_capture_failed(&mut self, error: String) -> Task<cosmic::Action<Message>> {
        error!(error = %error, "Capture failed");
        self.stop_capture();
        self.status = Status::error(fl!("status-frame-error"));
        Task::none()
    }

    /// Persist the selected camera path
    fn remember_camera(&mut self, path: &str) {
        if self.config.last_camera_path.as_deref() == Some(path) {
            return;
        }
        if let Some(handler) = &self.config_handler {
            let mut config = self.config.clone();
            config.last_camera_path = Some(path.to_string());
            if let Err(e) = config.write_entry(handler) {
                error!(error = %e, "Failed to save camera path");
            }
        }
    }
}
