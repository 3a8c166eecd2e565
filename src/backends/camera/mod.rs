// SPDX-License-Identifier: GPL-3.0-only

//! Camera capture backend built on PipeWire and GStreamer

mod enumeration;
mod pipeline;
pub mod types;

pub use pipeline::ScanPipeline;
pub use types::{CameraDevice, CameraFrame, FrameSender};

use tracing::info;

/// Enumerate available camera devices
pub fn enumerate_cameras() -> Vec<CameraDevice> {
    let cameras = enumeration::enumerate_pipewire_cameras().unwrap_or_default();
    info!(count = cameras.len(), "Camera enumeration complete");
    cameras
}
