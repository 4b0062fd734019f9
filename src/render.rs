use std::{path::Path, time::Duration};

use anyhow::Context as _;
use chromiumoxide::{
    browser::{Browser, BrowserConfig},
    cdp::browser_protocol::page::CaptureScreenshotFormat,
    page::ScreenshotParams,
};
use futures_util::StreamExt as _;

use crate::{
    config::Viewport,
    error::{SlidecastError, SlidecastResult},
    paths::RunContext,
    slides::Slide,
};

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub viewport: Viewport,
    pub settle: Duration, // fixed pause for fonts/images, not event-driven
    pub load_timeout: Duration,
}

impl RenderOptions {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            settle: Duration::from_millis(150),
            load_timeout: Duration::from_secs(60),
        }
    }

    /// Shorter settle delay for fast-validation runs.
    pub fn short_run(mut self) -> Self {
        self.settle = Duration::from_millis(50);
        self
    }
}

/// Wrap raw SVG text in a minimal page so the image fills the viewport
/// exactly, on a transparent background.
pub fn wrap_svg_html(svg: &str) -> String {
    format!(
        "<!doctype html>\n\
         <html>\n\
           <head>\n\
             <meta charset=\"utf-8\" />\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
             <style>html,body{{margin:0;padding:0;background:transparent;height:100%;}} \
             svg{{display:block;width:100%;height:100%;}}</style>\n\
           </head>\n\
           <body>\n{svg}\n</body>\n\
         </html>"
    )
}

/// Render every slide to a PNG frame, in order, through one long-lived
/// headless browser session. Frames land in `ctx.frames_out_dir` as
/// `frame-0001.png` onward, gapless. Any per-slide failure aborts the run;
/// the browser is closed exactly once, on both paths.
pub fn render_frames(
    slides: &[Slide],
    browser_exe: &Path,
    ctx: &RunContext,
    opts: &RenderOptions,
) -> SlidecastResult<usize> {
    // chromiumoxide is async; confine the runtime here so the rest of the
    // pipeline stays synchronous.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime for the browser session")?;

    runtime.block_on(render_session(slides, browser_exe, ctx, opts))
}

async fn render_session(
    slides: &[Slide],
    browser_exe: &Path,
    ctx: &RunContext,
    opts: &RenderOptions,
) -> SlidecastResult<usize> {
    let config = BrowserConfig::builder()
        .chrome_executable(browser_exe)
        .window_size(opts.viewport.width, opts.viewport.height)
        .no_sandbox()
        .arg("--disable-setuid-sandbox")
        .build()
        .map_err(SlidecastError::BrowserSession)?;

    tracing::info!(browser = %browser_exe.display(), "launching browser");
    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| SlidecastError::browser_session(format!("failed to launch browser: {e}")))?;

    // The handler stream must be polled for the session to make progress.
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    let result = render_all(&browser, slides, ctx, opts).await;

    // Close exactly once, success or not.
    if let Err(err) = browser.close().await {
        tracing::warn!(%err, "failed to close browser cleanly");
    }
    let _ = browser.wait().await;
    handler_task.abort();

    result
}

async fn render_all(
    browser: &Browser,
    slides: &[Slide],
    ctx: &RunContext,
    opts: &RenderOptions,
) -> SlidecastResult<usize> {
    for (index, slide) in slides.iter().enumerate() {
        let svg = std::fs::read_to_string(&slide.src)
            .with_context(|| format!("failed to read slide source '{}'", slide.src.display()))?;
        let html = wrap_svg_html(&svg);

        // Fresh page per slide, closed after capture, so a long deck does
        // not accumulate page contexts in the shared browser.
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SlidecastError::browser_session(format!("failed to open page: {e}")))?;

        match tokio::time::timeout(opts.load_timeout, page.set_content(html)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(SlidecastError::browser_session(format!(
                    "failed to load slide '{}': {e}",
                    slide.id
                )));
            }
            Err(_) => {
                return Err(SlidecastError::browser_session(format!(
                    "timed out loading slide '{}' after {:?}",
                    slide.id, opts.load_timeout
                )));
            }
        }

        tokio::time::sleep(opts.settle).await;

        let out_path = ctx.frame_path(index + 1);
        let screenshot = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(false)
            .omit_background(false)
            .build();
        let png = page.screenshot(screenshot).await.map_err(|e| {
            SlidecastError::browser_session(format!("failed to capture slide '{}': {e}", slide.id))
        })?;
        std::fs::write(&out_path, png)
            .with_context(|| format!("failed to write frame '{}'", out_path.display()))?;
        tracing::info!(slide = %slide.id, frame = %out_path.display(), "wrote frame");

        if let Err(err) = page.close().await {
            tracing::warn!(slide = %slide.id, %err, "failed to close page");
        }
    }

    Ok(slides.len())
}
