#![forbid(unsafe_code)]

pub mod browser;
pub mod config;
pub mod diagnostics;
pub mod encode;
pub mod error;
pub mod exec;
pub mod paths;
pub mod pipeline;
pub mod render;
pub mod slides;

pub use browser::{BrowserDetection, BrowserLocator, ChromiumDetection, NoDetection};
pub use config::{PresentationConfig, Viewport};
pub use error::{SlidecastError, SlidecastResult};
pub use exec::{CommandOutput, CommandRunner, SystemRunner};
pub use paths::RunContext;
pub use pipeline::PipelineOptions;
pub use slides::Slide;
