// SPDX-License-Identifier: GPL-3.0-only

//! Frame analysis: QR code detection and decoding

pub mod tasks;
pub mod types;

pub use tasks::QrDetector;
pub use types::QrAction;
