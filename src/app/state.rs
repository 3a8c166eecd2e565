// SPDX-License-Identifier: GPL-3.0-only

//! Application state types

use crate::app::frame_processor::QrAction;
use crate::backends::camera::{CameraDevice, CameraFrame};
use crate::config::Config;
use crate::fl;
use cosmic::cosmic_config;
use cosmic::widget::{self, about::About};
use std::sync::Arc;
use std::time::Instant;

/// Main application state
pub struct AppModel {
    /// COSMIC runtime core
    pub core: cosmic::Core,
    /// Currently displayed context page
    pub context_page: ContextPage,
    /// About widget data
    pub about: About,
    /// Application configuration
    pub config: Config,
    /// Config write handler
    pub config_handler: Option<cosmic_config::Config>,
    /// Current scanning state
    pub scan: ScanState,
    /// Bumped on every scan start; keys the capture subscription
    pub scan_generation: u64,
    /// Status banner content
    pub status: Status,
    /// Latest frame from the camera
    pub current_frame: Option<Arc<CameraFrame>>,
    /// Preview image handle built from the latest frame
    pub preview: Option<widget::image::Handle>,
    /// When the last QR decode attempt finished
    pub last_decode_time: Option<Instant>,
    /// Decode result awaiting user confirmation
    pub result_dialog: Option<QrAction>,
}

/// Scanning lifecycle
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScanState {
    /// No capture running
    #[default]
    Idle,
    /// Enumerating devices and starting the pipeline
    Starting,
    /// Live capture and decoding
    Scanning { device: CameraDevice },
}

impl ScanState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ScanState::Idle)
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self, ScanState::Scanning { .. })
    }
}

/// Severity of the status banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
    Highlight,
}

impl StatusKind {
    /// Banner text color for this severity
    pub fn color(&self) -> cosmic::iced::Color {
        match self {
            StatusKind::Info => cosmic::iced::Color::from_rgb(0.29, 0.56, 0.89),
            StatusKind::Success => cosmic::iced::Color::from_rgb(0.30, 0.69, 0.31),
            StatusKind::Warning => cosmic::iced::Color::from_rgb(0.90, 0.49, 0.13),
            StatusKind::Error => cosmic::iced::Color::from_rgb(0.96, 0.26, 0.21),
            StatusKind::Highlight => cosmic::iced::Color::from_rgb(0.61, 0.35, 0.71),
        }
    }
}

/// Status banner content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn info(text: String) -> Self {
        Self {
            text,
            kind: StatusKind::Info,
        }
    }

    pub fn success(text: String) -> Self {
        Self {
            text,
            kind: StatusKind::Success,
        }
    }

    pub fn warning(text: String) -> Self {
        Self {
            text,
            kind: StatusKind::Warning,
        }
    }

    pub fn error(text: String) -> Self {
        Self {
            text,
            kind: StatusKind::Error,
        }
    }

    pub fn highlight(text: String) -> Self {
        Self {
            text,
            kind: StatusKind::Highlight,
        }
    }

    /// Banner shown when a QR code has been decoded; includes the content
    pub fn decoded(content: &str) -> Self {
        Self::highlight(fl!("status-decoded", content = content))
    }
}

/// Context drawer pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// All user interactions and system events
#[derive(Debug, Clone)]
pub enum Message {
    /// Start scanning (enumerate cameras first)
    StartScan,
    /// Stop scanning
    StopScan,
    /// Camera enumeration finished
    CamerasEnumerated(Result<Vec<CameraDevice>, String>),
    /// New frame from the capture pipeline
    CameraFrame(Arc<CameraFrame>),
    /// Capture pipeline failed to start or died
    CaptureFailed(String),
    /// QR decode attempt finished
    QrDetectionsUpdated(Vec<QrAction>),
    /// User confirmed the open-and-print dialog
    DialogConfirm,
    /// User dismissed the result dialog
    DialogDismiss,
    /// Open-and-print flow finished
    PrintFinished(Result<(), String>),
    /// Toggle a context drawer page
    ToggleContextPage(ContextPage),
    /// Toggle the confirm-before-print setting
    ToggleConfirmBeforePrint(bool),
    /// Configuration changed on disk
    UpdateConfig(Config),
    /// Open a URL from the about page
    LaunchUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_state_default_is_idle() {
        let state = ScanState::default();
        assert!(state.is_idle());
        assert!(!state.is_scanning());
    }

    #[test]
    fn scan_state_scanning() {
        let state = ScanState::Scanning {
            device: CameraDevice {
                name: "Webcam".to_string(),
                path: "pipewire-serial-1".to_string(),
            },
        };
        assert!(state.is_scanning());
        assert!(!state.is_idle());
    }

    #[test]
    fn status_constructors_set_kind() {
        assert_eq!(Status::info("a".into()).kind, StatusKind::Info);
        assert_eq!(Status::success("b".into()).kind, StatusKind::Success);
        assert_eq!(Status::warning("c".into()).kind, StatusKind::Warning);
        assert_eq!(Status::error("d".into()).kind, StatusKind::Error);
        assert_eq!(Status::highlight("e".into()).kind, StatusKind::Highlight);
    }

    #[test]
    fn decoded_status_shows_the_content() {
        let status = Status::decoded("https://example.com/doc");
        assert!(status.text.contains("https://example.com/doc"));
        assert_eq!(status.kind, StatusKind::Highlight);
    }

    #[test]
    fn status_kinds_have_distinct_colors() {
        let kinds = [
            StatusKind::Info,
            StatusKind::Success,
            StatusKind::Warning,
            StatusKind::Error,
            StatusKind::Highlight,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.color(), b.color());
            }
        }
    }
}
