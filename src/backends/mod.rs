// SPDX-License-Identifier: GPL-3.0-only

//! Capture backends

pub mod camera;
