use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slidecast::{
    diagnostics, pipeline, BrowserLocator, ChromiumDetection, PipelineOptions, RunContext,
    SystemRunner,
};

#[derive(Parser, Debug)]
#[command(name = "slidecast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the presentation to a video (requires a browser and `ffmpeg`).
    Render(RenderArgs),
    /// Write a diagnostics report for the presentation.
    Report(ReportArgs),
    /// Check the environment (browser discovery, ffmpeg).
    Doctor(DoctorArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Presentation name (selects frames/<name>/ and configs/<name>.json).
    #[arg(default_value = "default")]
    presentation: String,

    /// Project root directory.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Fast validation: at most 3 slides, shorter settle delay.
    /// Also enabled by SHORT_RUN=1.
    #[arg(long, default_value_t = false)]
    short_run: bool,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Presentation name.
    #[arg(default_value = "default")]
    presentation: String,

    /// Project root directory.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

#[derive(Parser, Debug)]
struct DoctorArgs {
    /// Project root directory.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Report(args) => cmd_report(args),
        Command::Doctor(args) => cmd_doctor(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        if let Some(hint) = err.remediation() {
            eprintln!("{hint}");
        }
        std::process::exit(err.exit_code());
    }
}

fn cmd_render(args: RenderArgs) -> slidecast::SlidecastResult<()> {
    let ctx = RunContext::new(args.root, args.presentation);
    let opts = PipelineOptions {
        short_run: args.short_run || std::env::var("SHORT_RUN").as_deref() == Ok("1"),
    };
    let locator = BrowserLocator::from_env(&ChromiumDetection, &SystemRunner);
    pipeline::run(&ctx, opts, &locator, &SystemRunner)
}

fn cmd_report(args: ReportArgs) -> slidecast::SlidecastResult<()> {
    let ctx = RunContext::new(args.root, args.presentation);
    let report = diagnostics::write_report(&ctx)?;
    println!("report written to {}", report.display());
    Ok(())
}

fn cmd_doctor(args: DoctorArgs) -> slidecast::SlidecastResult<()> {
    let ctx = RunContext::new(args.root, "default");
    println!("{}", diagnostics::doctor(&ctx, &ChromiumDetection, &SystemRunner));
    Ok(())
}
