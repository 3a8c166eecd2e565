// SPDX-License-Identifier: GPL-3.0-only

//! QR Scan & Print - a QR code scanner for the COSMIC desktop
//!
//! Captures live video from a webcam, decodes QR codes in the frames and,
//! when the decoded content is a web link, opens it in the default browser
//! and triggers the browser's print dialog.
//!
//! # Architecture
//!
//! - [`app`]: Main application logic and UI
//! - [`backends`]: Camera capture backend (GStreamer/PipeWire)
//! - [`print`]: URL opening and print-shortcut injection
//! - [`config`]: User configuration handling

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod print;

// Re-export commonly used types
pub use app::frame_processor::QrAction;
pub use app::{AppModel, Message};
pub use config::Config;
