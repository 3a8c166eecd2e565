// SPDX-License-Identifier: GPL-3.0-only

//! Shared camera types

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// A camera device discovered on the system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    /// Human-readable device name
    pub name: String,
    /// Backend path, e.g. `pipewire-serial-42`; empty means auto-select
    pub path: String,
}

/// A single captured RGBA frame.
///
/// The pixel data is copied out of the backend buffer when the frame is
/// received, so the frame owns its bytes and can outlive the pipeline.
#[derive(Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Row stride in bytes; may exceed `width * 4` for aligned buffers
    pub stride: u32,
    pub data: Arc<[u8]>,
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Tightly packed RGBA bytes with any row padding stripped
    ///
    /// Always returns `width * height * 4` bytes; rows missing from a
    /// short buffer come out black.
    pub fn rgba_bytes(&self) -> Vec<u8> {
        let row_len = (self.width * 4) as usize;
        let stride = self.stride as usize;
        if stride == row_len && self.data.len() == row_len * self.height as usize {
            return self.data.to_vec();
        }

        let mut packed = Vec::with_capacity(row_len * self.height as usize);
        for row in 0..self.height as usize {
            let start = row * stride;
            let end = (start + row_len).min(self.data.len());
            if start < end {
                packed.extend_from_slice(&self.data[start..end]);
            }
            packed.resize((row + 1) * row_len, 0);
        }
        packed
    }
}

impl fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("data_len", &self.data.len())
            .field("captured_at", &self.captured_at)
            .finish()
    }
}

/// Channel sender used by the capture pipeline to deliver frames
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

#[cfg(test)]
mod tests {
    use super::*;

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
    fn rgba_bytes_passthrough_when_packed() {
        let data: Vec<u8> = (0..2 * 2 * 4).map(|i| i as u8).collect();
        let f = frame(2, 2, 8, data.clone());
        assert_eq!(f.rgba_bytes(), data);
    }

    #[test]
    fn rgba_bytes_strips_row_padding() {
        // 2x2 frame with 4 bytes of padding per row
        let mut data = Vec::new();
        for row in 0..2u8 {
            for px in 0..8u8 {
                data.push(row * 10 + px);
            }
            data.extend_from_slice(&[0xFF; 4]);
        }
        let f = frame(2, 2, 12, data);

        let packed = f.rgba_bytes();
        assert_eq!(packed.len(), 16);
        assert_eq!(&packed[0..8], &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(&packed[8..16], &[10, 11, 12, 13, 14, 15, 16, 17]);
    }

    #[test]
    fn rgba_bytes_tolerates_short_buffer() {
        // Claims 2x2 with stride 12 but only carries one full row
        let f = frame(2, 2, 12, vec![7; 10]);

        let packed = f.rgba_bytes();
        assert_eq!(packed.len(), 16);
        assert_eq!(&packed[0..8], &[7; 8]);
        assert_eq!(&packed[8..16], &[0; 8]);
    }

    #[test]
    fn rgba_bytes_pads_truncated_packed_buffer() {
        // Packed stride but the buffer is one row short
        let f = frame(2, 2, 8, vec![9; 8]);

        let packed = f.rgba_bytes();
        assert_eq!(packed.len(), 16);
        assert_eq!(&packed[0..8], &[9; 8]);
        assert_eq!(&packed[8..16], &[0; 8]);
    }
}
