use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    browser::{BrowserDetection, BrowserLocator},
    config,
    error::SlidecastResult,
    exec::CommandRunner,
    paths::RunContext,
    slides,
};

/// Write `output/<name>/diagnostics.md`, overwriting any previous report.
/// Read-only over the run layout except for bootstrapping the frames output
/// directory when it does not exist yet.
pub fn write_report(ctx: &RunContext) -> SlidecastResult<PathBuf> {
    let report_path = ctx.report_path();
    std::fs::create_dir_all(&ctx.output_root).with_context(|| {
        format!(
            "failed to create output directory '{}'",
            ctx.output_root.display()
        )
    })?;

    let mut lines = vec![
        "# Presentation diagnostics".to_string(),
        String::new(),
        format!("**Presentation:** {}", ctx.presentation),
        format!("**Generated:** {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")),
        String::new(),
        "## Config".to_string(),
        check_config(ctx),
        String::new(),
        "## SVG integrity".to_string(),
        check_svgs(ctx),
        String::new(),
        "## Rendered frames".to_string(),
        check_frames_out(ctx)?,
        String::new(),
        "## Directory structure".to_string(),
        "```".to_string(),
        format!("frames/{}/", ctx.presentation),
        list_dir(&ctx.frames_dir),
        String::new(),
        "audio/".to_string(),
        list_dir(&ctx.audio_dir),
        String::new(),
        "output/".to_string(),
        list_dir(&ctx.output_root),
        "```".to_string(),
    ];
    lines.push(String::new());

    std::fs::write(&report_path, lines.join("\n"))
        .with_context(|| format!("failed to write report '{}'", report_path.display()))?;
    tracing::info!(report = %report_path.display(), "wrote diagnostics report");
    Ok(report_path)
}

fn check_config(ctx: &RunContext) -> String {
    let specific = ctx.config_path();
    if specific.exists() {
        return match config::load(&specific) {
            Some(cfg) => {
                let audio_ok = cfg
                    .audio
                    .as_deref()
                    .map(|a| ctx.audio_dir.join(a).exists());
                let audio = match audio_ok {
                    Some(true) => "present",
                    Some(false) => "missing",
                    None => "none configured",
                };
                format!(
                    "OK: loaded `{}`. Slides: {}, audio: {}.",
                    file_name(&specific),
                    cfg.slides.len(),
                    audio
                )
            }
            None => format!("ERROR: `{}` exists but is not valid JSON.", file_name(&specific)),
        };
    }

    let default = ctx.default_config_path();
    if default.exists() {
        return match config::load(&default) {
            Some(cfg) => format!(
                "WARN: no `{}`, falling back to the default config. Slides: {}.",
                file_name(&specific),
                cfg.slides.len()
            ),
            None => "ERROR: the default config exists but is not valid JSON.".to_string(),
        };
    }

    "ERROR: no configuration found.".to_string()
}

/// Shallow well-formedness check: every SVG source should at least carry an
/// `<svg` tag. Not a parse.
fn check_svgs(ctx: &RunContext) -> String {
    if !ctx.frames_dir.exists() {
        return format!("ERROR: `{}` does not exist.", ctx.frames_dir.display());
    }
    let files = slides::svg_files(&ctx.frames_dir);
    if files.is_empty() {
        return "WARN: no SVG files found.".to_string();
    }

    let broken: Vec<String> = files
        .iter()
        .filter(|f| {
            !std::fs::read_to_string(f)
                .map(|content| content.contains("<svg"))
                .unwrap_or(false)
        })
        .map(|f| file_name(f))
        .collect();

    if broken.is_empty() {
        format!("OK: {} SVG file(s), none broken.", files.len())
    } else {
        format!(
            "WARN: {} SVG file(s), {} without an `<svg` tag: {}.",
            files.len(),
            broken.len(),
            broken.join(", ")
        )
    }
}

fn check_frames_out(ctx: &RunContext) -> SlidecastResult<String> {
    if !ctx.frames_out_dir.exists() {
        std::fs::create_dir_all(&ctx.frames_out_dir).with_context(|| {
            format!(
                "failed to create frames directory '{}'",
                ctx.frames_out_dir.display()
            )
        })?;
        return Ok("OK: frames directory created.".to_string());
    }

    let count = png_count(&ctx.frames_out_dir);
    if count == 0 {
        Ok("WARN: no frames rendered yet.".to_string())
    } else {
        Ok(format!("OK: {count} frame(s) rendered."))
    }
}

fn png_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| {
                    e.path()
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
                })
                .count()
        })
        .unwrap_or(0)
}

fn list_dir(dir: &Path) -> String {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return "  (empty)".to_string();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .map(|e| format!("  {}", e.file_name().to_string_lossy()))
        .collect();
    if names.is_empty() {
        return "  (empty)".to_string();
    }
    names.sort();
    names.join("\n")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Environment check for the `doctor` command: reports what each browser
/// discovery stage finds and whether ffmpeg responds to a version probe,
/// with remediation commands for anything missing. Read-only.
pub fn doctor(
    ctx: &RunContext,
    detection: &dyn BrowserDetection,
    runner: &dyn CommandRunner,
) -> String {
    let mut out = Vec::new();
    out.push(format!("project root: {}", ctx.project_root.display()));

    let env_override = std::env::var_os("CHROME_PATH")
        .or_else(|| std::env::var_os("CHROMIUM_PATH"))
        .map(PathBuf::from);
    out.push(format!(
        "CHROME_PATH/CHROMIUM_PATH: {}",
        env_override
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "unset".to_string())
    ));
    out.push(format!(
        "automation-library detection: {}",
        detection
            .detect()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    ));

    let browser = BrowserLocator::from_env(detection, runner).locate();
    out.push(format!(
        "resolved browser: {}",
        browser
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    ));

    let ffmpeg = crate::encode::is_ffmpeg_available(runner);
    out.push(format!(
        "ffmpeg: {}",
        if ffmpeg { "available" } else { "not found" }
    ));

    if browser.is_none() || !ffmpeg {
        out.push(String::new());
        out.push("recommended fixes:".to_string());
        if browser.is_none() {
            out.push(
                "  sudo apt update && sudo apt install -y chromium-browser  # or set CHROME_PATH"
                    .to_string(),
            );
        }
        if !ffmpeg {
            out.push("  sudo apt update && sudo apt install -y ffmpeg".to_string());
        }
    }

    out.join("\n")
}
