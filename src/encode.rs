use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    error::{SlidecastError, SlidecastResult},
    exec::CommandRunner,
};

pub const FRAME_PATTERN: &str = "frame-%04d.png";

/// One video assembly: a gapless `frame-%04d.png` sequence, an optional
/// audio track, and the encoding parameters for the system ffmpeg.
#[derive(Clone, Debug)]
pub struct EncodeJob {
    pub frames_dir: PathBuf,
    pub fps: u32,
    pub audio: Option<PathBuf>,
    pub out_path: PathBuf,
}

impl EncodeJob {
    pub fn validate(&self) -> SlidecastResult<()> {
        if self.fps == 0 {
            return Err(SlidecastError::encode_failed("fps must be non-zero"));
        }
        Ok(())
    }
}

/// Probe `ffmpeg -version` before attempting assembly. We use the system
/// binary rather than linking FFmpeg to avoid native dev header/lib
/// requirements.
pub fn is_ffmpeg_available(runner: &dyn CommandRunner) -> bool {
    runner
        .run("ffmpeg", &["-version"])
        .map(|out| out.success())
        .unwrap_or(false)
}

/// The full ffmpeg argument list for a job. Pure, so the command shape is
/// unit-testable without spawning anything. Audio flags appear only when
/// the audio file actually exists; a configured-but-missing track degrades
/// to video-only with a warning.
pub fn ffmpeg_args(job: &EncodeJob) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-r".to_string(),
        job.fps.to_string(),
        "-i".to_string(),
        job.frames_dir.join(FRAME_PATTERN).display().to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-profile:v".to_string(),
        "high".to_string(),
        "-preset:v".to_string(),
        "slow".to_string(),
        "-crf".to_string(),
        "18".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
    ];

    match &job.audio {
        Some(audio) if audio.exists() => {
            args.push("-i".to_string());
            args.push(audio.display().to_string());
            args.push("-c:a".to_string());
            args.push("aac".to_string());
            args.push("-b:a".to_string());
            args.push("128k".to_string());
            args.push("-shortest".to_string());
        }
        Some(audio) => {
            tracing::warn!(audio = %audio.display(), "audio file not found, producing video without audio");
        }
        None => {}
    }

    args.push(job.out_path.display().to_string());
    args
}

/// Invoke ffmpeg over the frame sequence. The caller is expected to have
/// probed availability first; a non-zero exit surfaces ffmpeg's stderr
/// verbatim, no retry.
pub fn assemble(job: &EncodeJob, runner: &dyn CommandRunner) -> SlidecastResult<()> {
    job.validate()?;
    if let Some(parent) = job.out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }

    let args = ffmpeg_args(job);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

    tracing::info!(out = %job.out_path.display(), fps = job.fps, "assembling video");
    let output = runner
        .run("ffmpeg", &arg_refs)
        .map_err(|e| SlidecastError::encode_failed(format!("failed to invoke ffmpeg: {e}")))?;

    if !output.success() {
        return Err(SlidecastError::encode_failed(format!(
            "ffmpeg exited with status {}: {}",
            output
                .status
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string()),
            output.stderr.trim()
        )));
    }

    Ok(())
}

/// Resolve the configured audio filename against the audio directory.
pub fn audio_path(audio_dir: &Path, configured: Option<&str>) -> Option<PathBuf> {
    configured.map(|name| audio_dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(audio: Option<PathBuf>) -> EncodeJob {
        EncodeJob {
            frames_dir: PathBuf::from("output/demo/frames"),
            fps: 30,
            audio,
            out_path: PathBuf::from("output/demo/video.mp4"),
        }
    }

    #[test]
    fn args_address_frames_by_fixed_width_pattern() {
        let args = ffmpeg_args(&job(None));
        assert_eq!(args[0], "-y");
        assert_eq!(args[1..3], ["-r".to_string(), "30".to_string()]);
        assert!(args[4].ends_with("frame-%04d.png"));
        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"yuv420p".to_string()));
        assert_eq!(args.last().unwrap(), "output/demo/video.mp4");
    }

    #[test]
    fn missing_audio_file_omits_audio_flags() {
        let args = ffmpeg_args(&job(Some(PathBuf::from("audio/not-there.mp3"))));
        assert!(!args.contains(&"-c:a".to_string()));
        assert!(!args.contains(&"-shortest".to_string()));
    }

    #[test]
    fn existing_audio_file_adds_audio_flags() {
        let dir = PathBuf::from("target").join("encode_unit");
        std::fs::create_dir_all(&dir).unwrap();
        let audio = dir.join("track.mp3");
        std::fs::write(&audio, b"notreallyaudio").unwrap();

        let args = ffmpeg_args(&job(Some(audio.clone())));
        assert!(args.contains(&"-c:a".to_string()));
        assert!(args.contains(&"aac".to_string()));
        assert!(args.contains(&"-shortest".to_string()));
        assert!(args.contains(&audio.display().to_string()));
        // Audio input comes after the video flags, before the output path.
        assert_eq!(args.last().unwrap(), "output/demo/video.mp4");
    }

    #[test]
    fn zero_fps_fails_validation() {
        let mut bad = job(None);
        bad.fps = 0;
        assert!(bad.validate().is_err());
    }
}
