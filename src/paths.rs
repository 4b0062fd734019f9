use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::error::SlidecastResult;

pub const DEFAULT_CONFIG_FILE: &str = "presentation.config.json";
pub const DEFAULT_VIDEO_FILE: &str = "video.mp4";

/// All derived paths for one named presentation, computed once at startup
/// and passed by reference to every component.
#[derive(Clone, Debug)]
pub struct RunContext {
    pub project_root: PathBuf,
    pub presentation: String,
    pub frames_dir: PathBuf,   // frames/<name>/ (SVG inputs)
    pub configs_dir: PathBuf,  // configs/
    pub audio_dir: PathBuf,    // audio/
    pub output_root: PathBuf,  // output/<name>/
    pub frames_out_dir: PathBuf, // output/<name>/frames/
}

impl RunContext {
    pub fn new(project_root: impl Into<PathBuf>, presentation: impl Into<String>) -> Self {
        let project_root = project_root.into();
        let presentation = presentation.into();
        let output_root = project_root.join("output").join(&presentation);
        Self {
            frames_dir: project_root.join("frames").join(&presentation),
            configs_dir: project_root.join("configs"),
            audio_dir: project_root.join("audio"),
            frames_out_dir: output_root.join("frames"),
            output_root,
            project_root,
            presentation,
        }
    }

    /// `configs/<name>.json`, tried before the default config.
    pub fn config_path(&self) -> PathBuf {
        self.configs_dir.join(format!("{}.json", self.presentation))
    }

    /// Root-level `presentation.config.json`, the fallback config.
    pub fn default_config_path(&self) -> PathBuf {
        self.project_root.join(DEFAULT_CONFIG_FILE)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_root.join("diagnostics.md")
    }

    pub fn video_path(&self, filename: Option<&str>) -> PathBuf {
        self.output_root.join(filename.unwrap_or(DEFAULT_VIDEO_FILE))
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.frames_out_dir.join(frame_file_name(index))
    }

    /// Bootstrap the run directories. Creating the input dirs when absent is
    /// a no-op for the pipeline but gives the user the expected skeleton.
    pub fn ensure_dirs(&self) -> SlidecastResult<()> {
        for dir in [
            &self.frames_dir,
            &self.configs_dir,
            &self.audio_dir,
            &self.frames_out_dir,
        ] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory '{}'", dir.display()))?;
        }
        Ok(())
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

/// `frame-0001.png`, `frame-0002.png`, ... The assembler addresses frames by
/// the matching `frame-%04d.png` pattern, so indices must be 1-based and
/// gapless.
pub fn frame_file_name(index: usize) -> String {
    format!("frame-{index:04}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_are_scoped_to_presentation() {
        let ctx = RunContext::new("/proj", "demo");
        assert_eq!(ctx.frames_dir, PathBuf::from("/proj/frames/demo"));
        assert_eq!(ctx.config_path(), PathBuf::from("/proj/configs/demo.json"));
        assert_eq!(
            ctx.default_config_path(),
            PathBuf::from("/proj/presentation.config.json")
        );
        assert_eq!(
            ctx.frames_out_dir,
            PathBuf::from("/proj/output/demo/frames")
        );
        assert_eq!(
            ctx.report_path(),
            PathBuf::from("/proj/output/demo/diagnostics.md")
        );
        assert_eq!(ctx.video_path(None), PathBuf::from("/proj/output/demo/video.mp4"));
        assert_eq!(
            ctx.video_path(Some("final.mp4")),
            PathBuf::from("/proj/output/demo/final.mp4")
        );
    }

    #[test]
    fn frame_names_are_zero_padded() {
        assert_eq!(frame_file_name(1), "frame-0001.png");
        assert_eq!(frame_file_name(42), "frame-0042.png");
        assert_eq!(frame_file_name(12345), "frame-12345.png");
    }

    #[test]
    fn resolve_leaves_absolute_paths_alone() {
        let ctx = RunContext::new("/proj", "demo");
        assert_eq!(ctx.resolve(Path::new("/abs/a.svg")), PathBuf::from("/abs/a.svg"));
        assert_eq!(ctx.resolve(Path::new("rel/a.svg")), PathBuf::from("/proj/rel/a.svg"));
    }
}
