use std::path::{Path, PathBuf};

use crate::exec::CommandRunner;

/// Well-known install locations, checked after the env override and the
/// automation library's own detection.
pub const WELL_KNOWN_PATHS: &[&str] = &[
    "/usr/bin/chromium-browser",
    "/usr/bin/chromium",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/google-chrome",
    "/snap/bin/chromium",
];

/// Binary names tried through `which` as the last resort.
pub const SHELL_NAMES: &[&str] = &[
    "chromium-browser",
    "chromium",
    "google-chrome-stable",
    "google-chrome",
];

/// Capability query for the automation library's bundled/detected browser.
/// Two implementations: `ChromiumDetection` (library-backed) and
/// `NoDetection` (always declines).
pub trait BrowserDetection {
    fn detect(&self) -> Option<PathBuf>;
}

/// Ask chromiumoxide where it would find a Chromium-family executable.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChromiumDetection;

impl BrowserDetection for ChromiumDetection {
    fn detect(&self) -> Option<PathBuf> {
        let options = chromiumoxide::detection::DetectionOptions::default();
        chromiumoxide::detection::default_executable(options).ok()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoDetection;

impl BrowserDetection for NoDetection {
    fn detect(&self) -> Option<PathBuf> {
        None
    }
}

/// Finds a usable browser executable. Priority chain, first hit wins:
/// env override, automation-library detection, well-known paths, `which`.
pub struct BrowserLocator<'a> {
    env_override: Option<PathBuf>,
    detection: &'a dyn BrowserDetection,
    runner: &'a dyn CommandRunner,
    well_known: &'a [&'a str],
    shell_names: &'a [&'a str],
}

impl<'a> BrowserLocator<'a> {
    /// Locator with the override read from `CHROME_PATH` / `CHROMIUM_PATH`.
    pub fn from_env(detection: &'a dyn BrowserDetection, runner: &'a dyn CommandRunner) -> Self {
        let env_override = std::env::var_os("CHROME_PATH")
            .or_else(|| std::env::var_os("CHROMIUM_PATH"))
            .map(PathBuf::from);
        Self::with_parts(env_override, detection, runner, WELL_KNOWN_PATHS, SHELL_NAMES)
    }

    pub fn with_parts(
        env_override: Option<PathBuf>,
        detection: &'a dyn BrowserDetection,
        runner: &'a dyn CommandRunner,
        well_known: &'a [&'a str],
        shell_names: &'a [&'a str],
    ) -> Self {
        Self {
            env_override,
            detection,
            runner,
            well_known,
            shell_names,
        }
    }

    pub fn locate(&self) -> Option<PathBuf> {
        if let Some(path) = &self.env_override {
            if path.exists() {
                tracing::debug!(path = %path.display(), "using browser from environment override");
                return Some(path.clone());
            }
            tracing::warn!(path = %path.display(), "environment browser override does not exist, ignoring");
        }

        if let Some(path) = self.detection.detect() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "using browser reported by automation library");
                return Some(path);
            }
        }

        for candidate in self.well_known {
            let path = Path::new(candidate);
            if path.exists() {
                tracing::debug!(path = %path.display(), "using browser from well-known path");
                return Some(path.to_path_buf());
            }
        }

        for name in self.shell_names.iter().copied() {
            let Ok(out) = self.runner.run("which", &[name]) else {
                continue;
            };
            if !out.success() {
                continue;
            }
            let path = PathBuf::from(out.stdout.trim());
            if !path.as_os_str().is_empty() && path.exists() {
                tracing::debug!(path = %path.display(), "using browser found via which");
                return Some(path);
            }
        }

        None
    }
}
