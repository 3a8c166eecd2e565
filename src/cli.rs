// SPDX-License-Identifier: GPL-3.0-only

//! Terminal commands that run without the GUI

use scanprint::backends::camera::enumerate_cameras;

/// Print the available cameras to stdout
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    let cameras = enumerate_cameras();

    if cameras.is_empty() {
        println!("No cameras found");
        return Ok(());
    }

    println!("Available cameras:");
    for (index, camera) in cameras.iter().enumerate() {
        let target = if camera.path.is_empty() {
            "auto-select"
        } else {
            camera.path.as_str()
        };
        println!("  {}: {} ({})", index, camera.name, target);
    }

    Ok(())
}
