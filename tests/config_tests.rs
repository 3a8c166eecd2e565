// SPDX-License-Identifier: GPL-3.0-only

//! Configuration defaults

use scanprint::Config;

#[test]
fn default_config_asks_before_printing() {
    let config = Config::default();
    assert!(config.confirm_before_print);
}

#[test]
fn default_config_has_no_saved_camera() {
    let config = Config::default();
    assert!(config.last_camera_path.is_none());
}

#[test]
fn config_equality() {
    let a = Config::default();
    let mut b = Config::default();
    assert_eq!(a, b);

    b.last_camera_path = Some("pipewire-serial-1".to_string());
    assert_ne!(a, b);
}
