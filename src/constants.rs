// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Timing constants
pub mod timing {
    use std::time::Duration;

    /// Delay between opening a decoded URL and sending the print shortcut.
    ///
    /// The browser gives no signal when the page has loaded, so a fixed
    /// delay stands in for one.
    pub const BROWSER_LOAD_DELAY: Duration = Duration::from_millis(1800);

    /// Minimum interval between QR decode attempts on live frames
    pub const DECODE_INTERVAL: Duration = Duration::from_millis(250);

    /// Poll timeout while waiting for the next frame (~60 fps)
    pub const FRAME_POLL_TIMEOUT: Duration = Duration::from_millis(16);

    /// Timeout for the capture pipeline to reach the Playing state
    pub const PIPELINE_START_TIMEOUT_SECS: u64 = 5;

    /// Timeout for the capture pipeline to reach the Null state on teardown
    pub const PIPELINE_STOP_TIMEOUT_SECS: u64 = 2;
}

/// QR decoding constants
pub mod decode {
    /// Maximum dimension for decode processing (frames are downscaled to this)
    ///
    /// QR codes are typically large enough to be detected at this resolution.
    pub const MAX_DIMENSION: u32 = 640;
}

/// GStreamer pipeline constants
pub mod pipeline {
    /// Maximum buffers queued in the appsink before old frames are dropped
    pub const MAX_BUFFERS: u32 = 2;

    /// Capacity of the frame channel between the appsink and the UI
    pub const CHANNEL_CAPACITY: usize = 100;
}

/// UI constants
pub mod ui {
    /// Minimum window width
    pub const MIN_WINDOW_WIDTH: f32 = 480.0;

    /// Minimum window height
    pub const MIN_WINDOW_HEIGHT: f32 = 360.0;

    /// Status banner text size
    pub const STATUS_TEXT_SIZE: u16 = 14;

    /// Hint caption text size
    pub const HINT_TEXT_SIZE: u16 = 12;
}
