// SPDX-License-Identifier: GPL-3.0-only

//! Main application module
//!
//! This module contains the application state, message handling, UI
//! rendering, and the scan lifecycle.
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, ScanState, etc.)
//! - `frame_processor`: QR detection and decoding on captured frames
//! - `handlers`: Message handlers, grouped by concern
//! - `view`: Main view rendering
//! - `update`: Message dispatch

pub mod frame_processor;
mod handlers;
mod state;
mod update;
mod view;

use crate::backends::camera::ScanPipeline;
use crate::config::Config;
use crate::fl;
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use state::{AppModel, ContextPage, Message, ScanState, Status};
use std::sync::Arc;
use tracing::{error, info};

const REPOSITORY: &str = "https://github.com/cosmic-utils/scanprint";

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.cosmic-utils.scanprint";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        // Initialize GStreamer early (required before any GStreamer calls)
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            scan: ScanState::default(),
            scan_generation: 0,
            status: Status::info(fl!("status-idle")),
            current_frame: None,
            preview: None,
            last_decode_time: None,
            result_dialog: None,
        };

        (app, Task::none())
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Confirmation dialog for a decoded QR code.
    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        let action = self.result_dialog.as_ref()?;

        let dialog = match action {
            frame_processor::QrAction::Url(url) => widget::dialog()
                .title(fl!("dialog-url-title"))
                .body(fl!("dialog-url-body"))
                .control(widget::text(url.clone()))
                .primary_action(
                    widget::button::suggested(fl!("dialog-open-print"))
                        .on_press(Message::DialogConfirm),
                )
                .secondary_action(
                    widget::button::standard(fl!("dialog-cancel"))
                        .on_press(Message::DialogDismiss),
                ),
            frame_processor::QrAction::Text(text) => widget::dialog()
                .title(fl!("dialog-text-title"))
                .control(widget::text(text.clone()))
                .primary_action(
                    widget::button::standard(fl!("dialog-close")).on_press(Message::DialogDismiss),
                ),
        };

        Some(dialog.into())
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::{SinkExt, StreamExt};

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // Capture subscription, keyed on the scan generation. Stopping a
        // scan changes the key, which drops the stream and with it the
        // pipeline.
        let camera_sub = match &self.scan {
            ScanState::Scanning { device } => {
                let device = device.clone();
                let generation = self.scan_generation;
                Subscription::run_with_id(
                    ("camera", generation),
                    cosmic::iced::stream::channel(
                        crate::constants::pipeline::CHANNEL_CAPACITY,
                        move |mut output| async move {
                            info!(generation, name = %device.name, "Camera subscription started");

                            let (sender, mut receiver) =
                                cosmic::iced::futures::channel::mpsc::channel(
                                    crate::constants::pipeline::CHANNEL_CAPACITY,
                                );

                            let pipeline = match ScanPipeline::new(&device, sender) {
                                Ok(pipeline) => pipeline,
                                Err(e) => {
                                    error!(error = %e, "Failed to initialize pipeline");
                                    let _ = output
                                        .send(Message::CaptureFailed(e.to_string()))
                                        .await;
                                    return;
                                }
                            };

                            loop {
                                if output.is_closed() {
                                    info!("Output channel closed, stopping capture");
                                    break;
                                }

                                // Poll with a timeout to periodically check
                                // for cancellation
                                match tokio::time::timeout(
                                    crate::constants::timing::FRAME_POLL_TIMEOUT,
                                    receiver.next(),
                                )
                                .await
                                {
                                    Ok(Some(frame)) => {
                                        // Drop frames when the UI is behind;
                                        // only the latest matters for preview
                                        if let Err(e) = output
                                            .try_send(Message::CameraFrame(Arc::new(frame)))
                                            && e.is_disconnected()
                                        {
                                            info!("Output channel disconnected");
                                            break;
                                        }
                                    }
                                    Ok(None) => {
                                        info!("Frame stream ended");
                                        let _ = output
                                            .send(Message::CaptureFailed(
                                                "Frame stream ended".to_string(),
                                            ))
                                            .await;
                                        break;
                                    }
                                    Err(_) => continue,
                                }
                            }

                            // Dropping the pipeline releases the camera
                            drop(pipeline);
                            info!(generation, "Camera subscription finished");
                        },
                    ),
                )
            }
            _ => Subscription::none(),
        };

        // Decode subscription, throttled to the decode interval and keyed
        // on the frame timestamp so each frame is analyzed at most once
        let should_decode = self.scan.is_scanning()
            && self
                .last_decode_time
                .map(|t| t.elapsed() >= crate::constants::timing::DECODE_INTERVAL)
                .unwrap_or(true);

        let decode_sub = match (should_decode, &self.current_frame) {
            (true, Some(frame)) => {
                let frame = frame.clone();
                Subscription::run_with_id(
                    ("qr-decode", frame.captured_at),
                    cosmic::iced::stream::channel(1, move |mut output| async move {
                        let detector = frame_processor::QrDetector::new();
                        let detections = detector.detect(frame).await;
                        let _ = output.send(Message::QrDetectionsUpdated(detections)).await;
                    }),
                )
            }
            _ => Subscription::none(),
        };

        Subscription::batch([config_sub, camera_sub, decode_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
