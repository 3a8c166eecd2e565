// SPDX-License-Identifier: GPL-3.0-only

//! Sanity checks on timing and processing constants

use scanprint::constants::{decode, pipeline, timing};
use std::time::Duration;

#[test]
fn browser_load_delay_is_fixed() {
    assert_eq!(timing::BROWSER_LOAD_DELAY, Duration::from_millis(1800));
}

#[test]
fn decode_interval_is_shorter_than_load_delay() {
    assert!(timing::DECODE_INTERVAL < timing::BROWSER_LOAD_DELAY);
}

#[test]
fn frame_poll_timeout_allows_sixty_fps() {
    assert!(timing::FRAME_POLL_TIMEOUT <= Duration::from_millis(17));
}

#[test]
fn decode_dimension_is_reasonable() {
    assert!(decode::MAX_DIMENSION >= 320);
    assert!(decode::MAX_DIMENSION <= 1920);
}

#[test]
fn pipeline_buffers_are_bounded() {
    assert!(pipeline::MAX_BUFFERS >= 1);
    assert!(pipeline::CHANNEL_CAPACITY >= pipeline::MAX_BUFFERS as usize);
}
