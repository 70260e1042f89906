//! Environment metadata attached to benchmark results.
//!
//! The engine treats the tag as opaque pass-through data: it is collected
//! once per run (or injected by the caller) and cloned onto every result so
//! numbers from different machines can be told apart. Nothing here affects
//! measurement.

use serde::{Deserialize, Serialize};

/// Descriptive metadata for the machine a suite ran on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentTag {
    /// Human-readable one-line description.
    pub description: String,
    /// CPU model string, when the platform exposes one.
    pub cpu_model: Option<String>,
    /// Logical CPU count.
    pub logical_cpus: Option<usize>,
    /// Target architecture (compile-time constant).
    pub arch: String,
    /// Operating system (compile-time constant).
    pub os: String,
}

impl EnvironmentTag {
    /// Probe the current machine.
    ///
    /// Probing is best-effort: fields the platform does not expose stay
    /// `None` and the description falls back to arch/os.
    pub fn detect() -> Self {
        let cpu_model = detect_cpu_model();
        let logical_cpus = std::thread::available_parallelism().ok().map(|n| n.get());
        let arch = std::env::consts::ARCH.to_string();
        let os = std::env::consts::OS.to_string();

        let mut description = cpu_model.clone().unwrap_or_else(|| format!("{arch} cpu"));
        if let Some(n) = logical_cpus {
            description.push_str(&format!(" ({n} logical cpus, {os})"));
        } else {
            description.push_str(&format!(" ({os})"));
        }

        Self {
            description,
            cpu_model,
            logical_cpus,
            arch,
            os,
        }
    }

    /// Build a fixed tag, bypassing detection.
    ///
    /// Intended for tests and for callers that inject their own
    /// system-introspection layer.
    pub fn custom(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            cpu_model: None,
            logical_cpus: None,
            arch: std::env::consts::ARCH.to_string(),
            os: std::env::consts::OS.to_string(),
        }
    }
}

impl std::fmt::Display for EnvironmentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description)
    }
}

#[cfg(target_os = "linux")]
fn detect_cpu_model() -> Option<String> {
    let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    cpuinfo
        .lines()
        .find(|line| line.starts_with("model name"))
        .and_then(|line| line.split(':').nth(1))
        .map(|model| model.trim().to_string())
}

#[cfg(target_os = "macos")]
fn detect_cpu_model() -> Option<String> {
    let output = std::process::Command::new("sysctl")
        .args(["-n", "machdep.cpu.brand_string"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let model = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!model.is_empty()).then_some(model)
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn detect_cpu_model() -> Option<String> {
    None
}
