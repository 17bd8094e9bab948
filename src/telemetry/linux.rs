// Linux sysfs readers for metrics sysinfo does not cover (GPU, SoC thermal zone).

#[cfg(target_os = "linux")]
fn drm_device_dirs() -> Vec<std::path::PathBuf> {
    let Ok(entries) = std::fs::read_dir("/sys/class/drm") else {
        return Vec::new();
    };
    let mut dirs: Vec<_> = entries
        .flatten()
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            // card0, card1 ... but not connectors like card0-HDMI-A-1
            name.starts_with("card") && !name.contains('-')
        })
        .map(|e| e.path().join("device"))
        .collect();
    dirs.sort();
    dirs
}

/// GPU busy percent from the first DRM card exposing `gpu_busy_percent` (amdgpu and similar).
pub(super) fn read_gpu_usage() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        for dir in drm_device_dirs() {
            if let Ok(content) = std::fs::read_to_string(dir.join("gpu_busy_percent"))
                && let Ok(v) = content.trim().parse::<f64>()
            {
                return Some(v);
            }
        }
    }
    None
}

/// GPU temperature in °C from the first DRM card's hwmon `temp1_input` (millidegrees).
pub(super) fn read_gpu_temperature() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        for dir in drm_device_dirs() {
            let Ok(hwmons) = std::fs::read_dir(dir.join("hwmon")) else {
                continue;
            };
            for hwmon in hwmons.flatten() {
                if let Some(t) = read_millidegrees(&hwmon.path().join("temp1_input")) {
                    return Some(t);
                }
            }
        }
    }
    None
}

/// SoC temperature from thermal_zone0; used when sysinfo lists no CPU sensor (e.g. Raspberry Pi).
pub(super) fn read_thermal_zone_temperature() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        read_millidegrees(std::path::Path::new("/sys/class/thermal/thermal_zone0/temp"))
    }
    #[cfg(not(target_os = "linux"))]
    None
}

#[cfg(target_os = "linux")]
fn read_millidegrees(path: &std::path::Path) -> Option<f64> {
    let content = std::fs::read_to_string(path).ok()?;
    let milli = content.trim().parse::<i64>().ok()?;
    Some(milli as f64 / 1000.0)
}
