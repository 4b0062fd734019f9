use std::io;
use std::path::PathBuf;

use slidecast::{
    pipeline, BrowserLocator, CommandOutput, CommandRunner, NoDetection, PipelineOptions,
    RunContext, SlidecastError,
};

/// Fails every shell lookup; good enough for stages before rendering.
struct DeadRunner;

impl CommandRunner for DeadRunner {
    fn run(&self, _program: &str, _args: &[&str]) -> io::Result<CommandOutput> {
        Ok(CommandOutput {
            status: Some(1),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

fn scratch(name: &str) -> RunContext {
    let root = PathBuf::from("target").join("pipeline").join(name);
    RunContext::new(&root, "demo")
}

fn empty_locator<'a>(runner: &'a DeadRunner) -> BrowserLocator<'a> {
    BrowserLocator::with_parts(None, &NoDetection, runner, &[], &[])
}

#[test]
fn run_without_any_config_exits_one_and_bootstraps_dirs() {
    let ctx = scratch("no_config");
    let runner = DeadRunner;

    let err = pipeline::run(&ctx, PipelineOptions::default(), &empty_locator(&runner), &runner)
        .unwrap_err();
    assert!(matches!(err, SlidecastError::NoConfig { .. }));
    assert_eq!(err.exit_code(), 1);
    // The directory skeleton is created even when the run fails early.
    assert!(ctx.frames_dir.is_dir());
    assert!(ctx.configs_dir.is_dir());
    assert!(ctx.frames_out_dir.is_dir());
}

#[test]
fn default_config_fallback_carries_the_run_to_browser_discovery() {
    let ctx = scratch("fallback_reaches_browser");
    std::fs::create_dir_all(&ctx.frames_dir).unwrap();
    std::fs::write(
        ctx.frames_dir.join("slide.svg"),
        "<svg xmlns=\"http://www.w3.org/2000/svg\"/>",
    )
    .unwrap();
    // No configs/demo.json; only the root-level default.
    std::fs::write(
        ctx.default_config_path(),
        r#"{"slides": [{"id": "intro", "src": "frames/demo/slide.svg"}]}"#,
    )
    .unwrap();

    let runner = DeadRunner;
    let err = pipeline::run(&ctx, PipelineOptions::default(), &empty_locator(&runner), &runner)
        .unwrap_err();
    // Config fallback and slide resolution succeeded; the run died at the
    // first stage we starved.
    assert!(matches!(err, SlidecastError::NoBrowser));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn config_without_usable_slides_exits_two() {
    let ctx = scratch("no_slides");
    std::fs::create_dir_all(ctx.default_config_path().parent().unwrap()).unwrap();
    std::fs::write(
        ctx.default_config_path(),
        r#"{"slides": [{"id": "ghost", "src": "frames/demo/missing.svg"}]}"#,
    )
    .unwrap();

    let runner = DeadRunner;
    let err = pipeline::run(&ctx, PipelineOptions::default(), &empty_locator(&runner), &runner)
        .unwrap_err();
    assert!(matches!(err, SlidecastError::NoSlides { .. }));
    assert_eq!(err.exit_code(), 2);
}
