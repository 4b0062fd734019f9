use std::path::Path;

use crate::{
    error::{SlidecastError, SlidecastResult},
    paths::RunContext,
};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PresentationConfig {
    #[serde(default)]
    pub slides: Vec<RawSlide>,
    pub viewport: Option<Viewport>,
    pub fps: Option<u32>,
    pub audio: Option<String>, // filename under audio/
    pub output: Option<OutputConfig>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct RawSlide {
    pub id: Option<String>,
    pub src: Option<String>,
    pub duration: Option<f64>,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct OutputConfig {
    pub filename: String,
}

impl PresentationConfig {
    pub fn viewport(&self) -> Viewport {
        self.viewport.unwrap_or_default()
    }

    pub fn fps(&self) -> u32 {
        self.fps.unwrap_or(30)
    }

    pub fn output_filename(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.filename.as_str())
    }
}

/// Load a config file, treating "absent" and "unparseable" identically: both
/// yield `None` so the caller falls through to the next candidate. Parse
/// failures are logged, never propagated.
pub fn load(path: &Path) -> Option<PresentationConfig> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "failed to parse config, treating as absent");
            None
        }
    }
}

/// Try `configs/<name>.json` first, then the root-level default config.
pub fn load_with_fallback(ctx: &RunContext) -> SlidecastResult<PresentationConfig> {
    let specific = ctx.config_path();
    if let Some(config) = load(&specific) {
        tracing::info!(path = %specific.display(), "loaded presentation config");
        return Ok(config);
    }

    let default = ctx.default_config_path();
    if let Some(config) = load(&default) {
        tracing::info!(path = %default.display(), "no config at '{}', using default", specific.display());
        return Ok(config);
    }

    Err(SlidecastError::NoConfig { specific, default })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: PresentationConfig = serde_json::from_str("{}").unwrap();
        assert!(config.slides.is_empty());
        assert_eq!(config.fps(), 30);
        assert_eq!(config.viewport().width, 1920);
        assert_eq!(config.viewport().height, 1080);
        assert!(config.output_filename().is_none());
    }

    #[test]
    fn full_config_round_trips() {
        let raw = r#"{
            "slides": [{"id": "intro", "src": "frames/demo/intro.svg", "duration": 2.5}],
            "viewport": {"width": 1280, "height": 720},
            "fps": 24,
            "audio": "track.mp3",
            "output": {"filename": "demo.mp4"}
        }"#;
        let config: PresentationConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.slides.len(), 1);
        assert_eq!(config.slides[0].id.as_deref(), Some("intro"));
        assert_eq!(config.slides[0].duration, Some(2.5));
        assert_eq!(config.fps(), 24);
        assert_eq!(config.viewport().width, 1280);
        assert_eq!(config.audio.as_deref(), Some("track.mp3"));
        assert_eq!(config.output_filename(), Some("demo.mp4"));
    }
}
