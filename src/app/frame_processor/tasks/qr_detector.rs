// SPDX-License-Identifier: GPL-3.0-only

//! QR code detection task
//!
//! This module implements QR code detection using the rqrr crate.
//! It converts camera frames to grayscale and searches for QR codes,
//! returning their decoded content.

use crate::app::frame_processor::types::QrAction;
use crate::backends::camera::types::CameraFrame;
use crate::constants::decode;
use image::GrayImage;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// QR code detector
///
/// Analyzes camera frames to detect and decode QR codes.
/// Optimized for real-time processing with frame downscaling.
pub struct QrDetector {
    /// Maximum dimension for processing (frames are downscaled to this)
    max_dimension: u32,
}

impl Default for QrDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl QrDetector {
    /// Create a new QR detector with default settings
    pub fn new() -> Self {
        Self {
            max_dimension: decode::MAX_DIMENSION,
        }
    }

    /// Create a QR detector with custom max dimension
    #[cfg(test)]
    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    /// Detect QR codes in a camera frame
    ///
    /// CPU-intensive work runs in a blocking task so the async runtime
    /// stays responsive.
    pub async fn detect(&self, frame: Arc<CameraFrame>) -> Vec<QrAction> {
        let max_dim = self.max_dimension;

        tokio::task::spawn_blocking(move || detect_sync(&frame, max_dim))
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "QR detection task panicked");
                Vec::new()
            })
    }
}

/// Synchronous QR detection (runs in blocking task)
fn detect_sync(frame: &CameraFrame, max_dimension: u32) -> Vec<QrAction> {
    let start = std::time::Instant::now();

    let width = frame.width;
    let height = frame.height;

    // Convert to grayscale, downscaling when the frame exceeds the
    // processing dimension
    let (luma, proc_width, proc_height) = if width > max_dimension || height > max_dimension {
        let scale = (width as f32 / max_dimension as f32).max(height as f32 / max_dimension as f32);
        let new_width = (width as f32 / scale) as u32;
        let new_height = (height as f32 / scale) as u32;

        let full = luma_without_stride(frame);
        let downscaled = downscale_luma(&full, width, height, new_width, new_height);
        (downscaled, new_width, new_height)
    } else {
        (luma_without_stride(frame), width, height)
    };

    let Some(gray) = GrayImage::from_raw(proc_width, proc_height, luma) else {
        warn!(proc_width, proc_height, "Grayscale buffer size mismatch");
        return Vec::new();
    };

    let conversion_time = start.elapsed();
    trace!(
        proc_width,
        proc_height,
        conversion_ms = conversion_time.as_millis(),
        "Prepared grayscale image for processing"
    );

    let mut prepared = rqrr::PreparedImage::prepare(gray);
    let grids = prepared.detect_grids();

    let detection_time = start.elapsed() - conversion_time;
    trace!(
        count = grids.len(),
        detection_ms = detection_time.as_millis(),
        "QR detection complete"
    );

    let mut detections = Vec::with_capacity(grids.len());

    for grid in grids {
        let content = match grid.decode() {
            Ok((_meta, content)) => content,
            Err(e) => {
                debug!(error = %e, "Failed to decode QR code");
                continue;
            }
        };

        debug!(content = %content, "Detected QR code");
        detections.push(QrAction::from_content(&content));
    }

    let total_time = start.elapsed();
    if !detections.is_empty() {
        debug!(
            count = detections.len(),
            total_ms = total_time.as_millis(),
            "QR detection found codes"
        );
    }

    detections
}

/// Convert RGBA frame data to grayscale, skipping stride padding
fn luma_without_stride(frame: &CameraFrame) -> Vec<u8> {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let stride = frame.stride as usize;

    let mut result = Vec::with_capacity(width * height);

    for y in 0..height {
        let row_start = y * stride;
        for x in 0..width {
            let offset = row_start + x * 4;
            if offset + 3 <= frame.data.len() {
                let r = frame.data[offset] as u32;
                let g = frame.data[offset + 1] as u32;
                let b = frame.data[offset + 2] as u32;
                // ITU-R BT.601 luma, fixed point
                result.push(((r * 77 + g * 150 + b * 29) >> 8) as u8);
            } else {
                result.push(0);
            }
        }
    }

    result
}

/// Downscale a grayscale buffer using bilinear interpolation
fn downscale_luma(
    src: &[u8],
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
) -> Vec<u8> {
    let src_width = src_width as usize;
    let src_height = src_height as usize;

    let mut result = Vec::with_capacity((dst_width * dst_height) as usize);

    let x_ratio = src_width as f32 / dst_width as f32;
    let y_ratio = src_height as f32 / dst_height as f32;

    for y in 0..dst_height {
        for x in 0..dst_width {
            let src_x = x as f32 * x_ratio;
            let src_y = y as f32 * y_ratio;

            let x0 = src_x as usize;
            let y0 = src_y as usize;
            let x1 = (x0 + 1).min(src_width - 1);
            let y1 = (y0 + 1).min(src_height - 1);

            let x_frac = src_x - x0 as f32;
            let y_frac = src_y - y0 as f32;

            let get = |px: usize, py: usize| -> f32 {
                src.get(py * src_width + px).copied().unwrap_or(0) as f32
            };

            let p00 = get(x0, y0);
            let p01 = get(x1, y0);
            let p10 = get(x0, y1);
            let p11 = get(x1, y1);

            let value = p00 * (1.0 - x_frac) * (1.0 - y_frac)
                + p01 * x_frac * (1.0 - y_frac)
                + p10 * (1.0 - x_frac) * y_frac
                + p11 * x_frac * y_frac;

            result.push(value as u8);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn frame(width: u32, height: u32, stride: u32, data: Vec<u8>) -> CameraFrame {
        CameraFrame {
            width,
            height,
            stride,
            data: Arc::from(data),
            captured_at: Instant::now(),
        }
    }

    #[test]
    fn test_luma_without_stride() {
        // 2x2 RGBA frame with 2 bytes of stride padding per row
        let data: Vec<u8> = vec![
            255, 255, 255, 255, // white
            0, 0, 0, 255, // black
            0, 0, // padding
            255, 0, 0, 255, // red
            0, 255, 0, 255, // green
            0, 0, // padding
        ];
        let f = frame(2, 2, 10, data);

        let luma = luma_without_stride(&f);
        assert_eq!(luma.len(), 4);
        assert!(luma[0] > 250); // white
        assert_eq!(luma[1], 0); // black
        assert!(luma[2] > 50 && luma[2] < 100); // red weight ~0.30
        assert!(luma[3] > 120 && luma[3] < 170); // green weight ~0.59
    }

    #[test]
    fn test_downscale_luma() {
        // 4x2 gradient
        let src: Vec<u8> = vec![0, 85, 170, 255, 0, 85, 170, 255];
        let result = downscale_luma(&src, 4, 2, 2, 1);

        assert_eq!(result.len(), 2);
        assert!(result[0] < 100); // near start of gradient
        assert!(result[1] > 150); // near end of gradient
    }

    #[test]
    fn detect_sync_empty_frame_finds_nothing() {
        let f = frame(8, 8, 32, vec![255; 8 * 8 * 4]);
        let detections = detect_sync(&f, decode::MAX_DIMENSION);
        assert!(detections.is_empty());
    }

    #[tokio::test]
    async fn detector_handles_blank_frame() {
        let f = Arc::new(frame(16, 16, 64, vec![0; 16 * 16 * 4]));
        let detector = QrDetector::with_max_dimension(8);
        let detections = detector.detect(f).await;
        assert!(detections.is_empty());
    }
}
