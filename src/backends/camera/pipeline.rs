// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire GStreamer pipeline for camera capture
//!
//! The pipeline converts whatever the camera delivers into RGBA frames and
//! hands them to the app through a bounded channel. Pixel data is copied out
//! of the GStreamer buffer when the frame is received, so frames own their
//! bytes.

use super::types::{CameraDevice, CameraFrame, FrameSender};
use crate::constants::{pipeline, timing};
use crate::errors::CameraError;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// PipeWire camera capture pipeline
///
/// Starts in `new()` and releases the device when dropped, so teardown
/// follows ownership rather than an explicit stop call.
pub struct ScanPipeline {
    pipeline: gstreamer::Pipeline,
    _appsink: AppSink,
}

impl ScanPipeline {
    /// Create and start a capture pipeline for the given device
    pub fn new(device: &CameraDevice, frame_sender: FrameSender) -> Result<Self, CameraError> {
        info!(device = %device.name, "Creating capture pipeline");

        gstreamer::init().map_err(|e| CameraError::InitializationFailed(e.to_string()))?;

        let pipeline_desc = build_pipeline_description(&device.path);
        debug!(pipeline = %pipeline_desc, "Launching pipeline");

        let pipeline = gstreamer::parse::launch(&pipeline_desc)
            .map_err(|e| CameraError::InitializationFailed(e.to_string()))?
            .dynamic_cast::<gstreamer::Pipeline>()
            .map_err(|_| {
                CameraError::InitializationFailed("Parsed element is not a pipeline".to_string())
            })?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| {
                CameraError::InitializationFailed("Failed to get appsink".to_string())
            })?
            .dynamic_cast::<AppSink>()
            .map_err(|_| CameraError::InitializationFailed("Failed to cast appsink".to_string()))?;

        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", pipeline::MAX_BUFFERS);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let captured_at = Instant::now();
                    let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);

                    let sample = appsink.pull_sample().map_err(|e| {
                        if frame_num % 30 == 0 {
                            error!(frame = frame_num, error = ?e, "Failed to pull sample");
                        }
                        gstreamer::FlowError::Eos
                    })?;

                    let buffer = sample.buffer().ok_or_else(|| {
                        if frame_num % 30 == 0 {
                            error!(frame = frame_num, "No buffer in sample");
                        }
                        gstreamer::FlowError::Error
                    })?;

                    let caps = sample.caps().ok_or_else(|| {
                        if frame_num % 30 == 0 {
                            error!(frame = frame_num, "No caps in sample");
                        }
                        gstreamer::FlowError::Error
                    })?;

                    let video_info = VideoInfo::from_caps(caps).map_err(|e| {
                        if frame_num % 30 == 0 {
                            error!(frame = frame_num, error = ?e, "Failed to get video info");
                        }
                        gstreamer::FlowError::Error
                    })?;

                    let map = buffer.map_readable().map_err(|e| {
                        if frame_num % 30 == 0 {
                            error!(frame = frame_num, error = ?e, "Failed to map buffer");
                        }
                        gstreamer::FlowError::Error
                    })?;

                    let frame = CameraFrame {
                        width: video_info.width(),
                        height: video_info.height(),
                        stride: video_info.stride()[0] as u32,
                        data: Arc::from(map.as_slice()),
                        captured_at,
                    };

                    // Non-blocking send; drop the frame if the app is behind
                    let mut sender = frame_sender.clone();
                    if let Err(e) = sender.try_send(frame) {
                        if e.is_disconnected() {
                            debug!(frame = frame_num, "Frame channel closed, stopping");
                            return Err(gstreamer::FlowError::Eos);
                        }
                        if frame_num % 30 == 0 {
                            debug!(frame = frame_num, "Frame dropped (channel full)");
                        }
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline.set_state(gstreamer::State::Playing).map_err(|e| {
            CameraError::InitializationFailed(format!("Failed to start pipeline: {}", e))
        })?;

        // Wait for the state change to complete
        let (result, state, pending) = pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::PIPELINE_START_TIMEOUT_SECS,
        ));
        debug!(result = ?result, state = ?state, pending = ?pending, "Pipeline state");
        if state != gstreamer::State::Playing {
            warn!("Pipeline is not in PLAYING state");
        }

        info!("Capture pipeline started");

        Ok(Self {
            pipeline,
            _appsink: appsink,
        })
    }
}

impl Drop for ScanPipeline {
    fn drop(&mut self) {
        info!("Stopping capture pipeline");
        // Clear callbacks first to release the frame sender
        self._appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        let _ = self.pipeline.set_state(gstreamer::State::Null);
        let (result, state, _) = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::PIPELINE_STOP_TIMEOUT_SECS,
        ));
        match result {
            Ok(_) => info!(state = ?state, "Capture pipeline stopped"),
            Err(e) => debug!(error = ?e, state = ?state, "Pipeline state change had issues"),
        }
    }
}

/// Build the GStreamer pipeline description for a device path
///
/// Device paths follow the enumeration convention: `pipewire-serial-N`
/// carries an object.serial, `pipewire-N` a node ID, and an empty path lets
/// PipeWire pick the default camera.
fn build_pipeline_description(device_path: &str) -> String {
    let target = if let Some(serial) = device_path.strip_prefix("pipewire-serial-") {
        format!("target-object={} ", serial)
    } else if let Some(node_id) = device_path.strip_prefix("pipewire-") {
        format!("target-object={} ", node_id)
    } else {
        String::new()
    };

    format!(
        "pipewiresrc {}do-timestamp=true ! \
         queue max-size-buffers={} leaky=downstream ! \
         videoconvert ! video/x-raw,format=RGBA ! \
         appsink name=sink",
        target,
        pipeline::MAX_BUFFERS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_description_uses_serial() {
        let desc = build_pipeline_description("pipewire-serial-2146");
        assert!(desc.contains("target-object=2146 "));
        assert!(desc.contains("format=RGBA"));
        assert!(desc.contains("appsink name=sink"));
    }

    #[test]
    fn pipeline_description_uses_node_id() {
        let desc = build_pipeline_description("pipewire-76");
        assert!(desc.contains("target-object=76 "));
    }

    #[test]
    fn pipeline_description_auto_selects_on_empty_path() {
        let desc = build_pipeline_description("");
        assert!(!desc.contains("target-object"));
        assert!(desc.starts_with("pipewiresrc do-timestamp=true"));
    }
}
