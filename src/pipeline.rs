use crate::{
    browser::BrowserLocator,
    config,
    encode::{self, EncodeJob},
    error::{SlidecastError, SlidecastResult},
    exec::CommandRunner,
    paths::RunContext,
    render::{self, RenderOptions},
    slides,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineOptions {
    /// Fast-validation mode: at most 3 slides, shorter settle delay.
    pub short_run: bool,
}

impl PipelineOptions {
    pub fn slide_limit(&self) -> Option<usize> {
        self.short_run.then_some(3)
    }
}

/// The whole run, strictly sequential, single pass: config resolution,
/// slide resolution, browser discovery, frame rendering, ffmpeg probe,
/// video assembly. Halts at the first fatal condition; no partial-success
/// mode.
pub fn run(
    ctx: &RunContext,
    opts: PipelineOptions,
    locator: &BrowserLocator<'_>,
    runner: &dyn CommandRunner,
) -> SlidecastResult<()> {
    ctx.ensure_dirs()?;

    let config = config::load_with_fallback(ctx)?;
    let slides = slides::resolve(&config, ctx, opts.slide_limit())?;
    tracing::info!(count = slides.len(), "resolved slides");

    let browser_exe = locator.locate().ok_or(SlidecastError::NoBrowser)?;

    let mut render_opts = RenderOptions::new(config.viewport());
    if opts.short_run {
        render_opts = render_opts.short_run();
    }
    let frames = render::render_frames(&slides, &browser_exe, ctx, &render_opts)?;

    if !encode::is_ffmpeg_available(runner) {
        return Err(SlidecastError::FfmpegMissing);
    }

    let job = EncodeJob {
        frames_dir: ctx.frames_out_dir.clone(),
        fps: config.fps(),
        audio: encode::audio_path(&ctx.audio_dir, config.audio.as_deref()),
        out_path: ctx.video_path(config.output_filename()),
    };
    encode::assemble(&job, runner)?;

    let viewport = config.viewport();
    let resolution = format!("{}x{}", viewport.width, viewport.height);
    tracing::info!(
        frames,
        fps = job.fps,
        resolution = %resolution,
        audio = job.audio.as_ref().is_some_and(|a| a.exists()),
        out = %job.out_path.display(),
        "done"
    );
    Ok(())
}
