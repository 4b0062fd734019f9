use std::path::PathBuf;

pub type SlidecastResult<T> = Result<T, SlidecastError>;

#[derive(thiserror::Error, Debug)]
pub enum SlidecastError {
    #[error("no configuration found (looked for '{specific}' and '{default}')")]
    NoConfig { specific: PathBuf, default: PathBuf },

    #[error("no slides resolved: nothing usable in the config and no SVG files in '{frames_dir}'")]
    NoSlides { frames_dir: PathBuf },

    #[error("no Chromium/Chrome executable found")]
    NoBrowser,

    #[error("browser session error: {0}")]
    BrowserSession(String),

    #[error("ffmpeg not found on PATH (required for video assembly)")]
    FfmpegMissing,

    #[error("ffmpeg failed: {0}")]
    EncodeFailed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidecastError {
    pub fn browser_session(msg: impl Into<String>) -> Self {
        Self::BrowserSession(msg.into())
    }

    pub fn encode_failed(msg: impl Into<String>) -> Self {
        Self::EncodeFailed(msg.into())
    }

    /// Stable process exit code for this failure, part of the CLI contract.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoConfig { .. } => 1,
            Self::NoSlides { .. } => 2,
            Self::NoBrowser => 3,
            Self::BrowserSession(_) => 4,
            Self::FfmpegMissing => 5,
            Self::EncodeFailed(_) => 6,
            Self::Other(_) => 99,
        }
    }

    /// A hint printed after the error message for the missing-input cases.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::NoConfig { .. } => {
                Some("create one of the listed config files (see README for the schema)")
            }
            Self::NoSlides { .. } => {
                Some("add SVG files under frames/<presentation>/ or list slides in the config")
            }
            Self::NoBrowser => Some(
                "set CHROME_PATH to a browser binary, or install one:\n  \
                 sudo apt update && sudo apt install -y chromium-browser",
            ),
            Self::FfmpegMissing => Some("sudo apt update && sudo apt install -y ffmpeg"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        let no_config = SlidecastError::NoConfig {
            specific: PathBuf::from("configs/x.json"),
            default: PathBuf::from("presentation.config.json"),
        };
        assert_eq!(no_config.exit_code(), 1);
        assert_eq!(
            SlidecastError::NoSlides {
                frames_dir: PathBuf::from("frames/x")
            }
            .exit_code(),
            2
        );
        assert_eq!(SlidecastError::NoBrowser.exit_code(), 3);
        assert_eq!(SlidecastError::browser_session("x").exit_code(), 4);
        assert_eq!(SlidecastError::FfmpegMissing.exit_code(), 5);
        assert_eq!(SlidecastError::encode_failed("x").exit_code(), 6);
        assert_eq!(
            SlidecastError::Other(anyhow::anyhow!("boom")).exit_code(),
            99
        );
    }

    #[test]
    fn missing_input_errors_carry_remediation() {
        assert!(SlidecastError::NoBrowser.remediation().is_some());
        assert!(SlidecastError::FfmpegMissing.remediation().is_some());
        assert!(SlidecastError::encode_failed("x").remediation().is_none());
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SlidecastError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
