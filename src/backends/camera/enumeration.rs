// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera enumeration
//!
//! Camera discovery goes through PipeWire. PipeWire handles device access
//! and format negotiation internally, so discovery only needs names and
//! node identities.

use super::types::CameraDevice;
use tracing::{debug, info, warn};

/// Enumerate cameras using PipeWire
///
/// Returns the discovered video sources, or a single auto-select entry
/// when discovery is unavailable but PipeWire itself is.
pub fn enumerate_pipewire_cameras() -> Option<Vec<CameraDevice>> {
    debug!("Attempting to enumerate cameras via PipeWire");

    if gstreamer::init().is_err() {
        warn!("GStreamer init failed");
        return None;
    }

    if gstreamer::ElementFactory::make("pipewiresrc")
        .build()
        .is_err()
    {
        debug!("pipewiresrc not available");
        return None;
    }

    if let Some(cameras) = try_enumerate_with_pw_cli() {
        debug!(count = cameras.len(), "Found PipeWire cameras");
        return Some(cameras);
    }

    // Fallback: let PipeWire use its default camera
    info!("Using PipeWire auto-selection (default camera)");
    Some(vec![CameraDevice {
        name: "Default Camera (PipeWire)".to_string(),
        path: String::new(), // Empty path = PipeWire auto-selects
    }])
}

/// Try to enumerate cameras using the pw-cli command
fn try_enumerate_with_pw_cli() -> Option<Vec<CameraDevice>> {
    debug!("Trying pw-cli for camera enumeration");

    let output = std::process::Command::new("pw-cli")
        .args(["ls", "Node"])
        .output()
        .ok()?;

    if !output.status.success() {
        debug!("pw-cli command failed");
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let cameras = parse_pw_cli_nodes(&stdout);

    if cameras.is_empty() {
        debug!("No cameras found via pw-cli");
        None
    } else {
        debug!(count = cameras.len(), "Enumerated cameras via pw-cli");
        Some(cameras)
    }
}

/// Parse `pw-cli ls Node` output into camera devices
fn parse_pw_cli_nodes(stdout: &str) -> Vec<CameraDevice> {
    let mut cameras = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_serial: Option<String> = None;
    let mut current_name: Option<String> = None;
    let mut is_video_source = false;

    let flush = |id: &Option<String>,
                 serial: &Option<String>,
                 name: &Option<String>,
                 is_video: bool,
                 cameras: &mut Vec<CameraDevice>| {
        if is_video && let (Some(id), Some(name)) = (id.as_ref(), name.as_ref()) {
            // Prefer object.serial for target-object, fall back to the node ID
            let path = if let Some(serial) = serial.as_ref() {
                format!("pipewire-serial-{}", serial)
            } else {
                format!("pipewire-{}", id)
            };
            debug!(id = %id, serial = ?serial, name = %name, path = %path, "Found video camera");
            cameras.push(CameraDevice {
                name: name.clone(),
                path,
            });
        }
    };

    for line in stdout.lines() {
        let trimmed = line.trim();

        // Node header, format: "id 76, type PipeWire:Interface:Node/3"
        if trimmed.starts_with("id ") && trimmed.contains("type PipeWire:Interface:Node") {
            flush(
                &current_id,
                &current_serial,
                &current_name,
                is_video_source,
                &mut cameras,
            );

            if let Some(id_str) = trimmed.strip_prefix("id ")
                && let Some(id_num) = id_str.split(',').next()
            {
                current_id = Some(id_num.trim().to_string());
                current_serial = None;
                current_name = None;
                is_video_source = false;
            }
        }

        // Format: media.class = "Video/Source"
        if trimmed.contains("media.class") && trimmed.contains("\"Video/Source\"") {
            is_video_source = true;
        }

        // Format: object.serial = "2146"
        if trimmed.contains("object.serial")
            && let Some(value) = extract_quoted_value(trimmed)
        {
            current_serial = Some(value);
        }

        // Format: node.description = "Laptop Webcam Module (2nd Gen) (V4L2)"
        if trimmed.contains("node.description")
            && let Some(value) = extract_quoted_value(trimmed)
        {
            current_name = Some(value);
        }
    }

    flush(
        &current_id,
        &current_serial,
        &current_name,
        is_video_source,
        &mut cameras,
    );

    cameras
}

/// Extract quoted value from a property line (e.g., 'property = "value"' -> "value")
fn extract_quoted_value(line: &str) -> Option<String> {
    let start = line.find('"')?;
    let end = line[start + 1..].find('"')?;
    Some(line[start + 1..start + 1 + end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_quoted_value() {
        assert_eq!(
            extract_quoted_value("object.serial = \"2146\""),
            Some("2146".to_string())
        );
        assert_eq!(extract_quoted_value("no quotes here"), None);
        assert_eq!(extract_quoted_value("dangling = \"open"), None);
    }

    #[test]
    fn parses_video_source_nodes() {
        let output = r#"
	id 42, type PipeWire:Interface:Node/3
 		media.class = "Audio/Source"
 		node.description = "Built-in Microphone"
	id 76, type PipeWire:Interface:Node/3
 		object.serial = "2146"
 		media.class = "Video/Source"
 		node.description = "Integrated Webcam"
"#;
        let cameras = parse_pw_cli_nodes(output);
        assert_eq!(cameras.len(), 1);
        assert_eq!(cameras[0].name, "Integrated Webcam");
        assert_eq!(cameras[0].path, "pipewire-serial-2146");
    }

    #[test]
    fn falls_back_to_node_id_without_serial() {
        let output = r#"
	id 76, type PipeWire:Interface:Node/3
 		media.class = "Video/Source"
 		node.description = "Integrated Webcam"
"#;
        let cameras = parse_pw_cli_nodes(output);
        assert_eq!(cameras.len(), 1);
        assert_eq!(cameras[0].path, "pipewire-76");
    }

    #[test]
    fn ignores_non_video_nodes() {
        let output = r#"
	id 10, type PipeWire:Interface:Node/3
 		media.class = "Audio/Sink"
 		node.description = "Speakers"
"#;
        assert!(parse_pw_cli_nodes(output).is_empty());
    }
}
