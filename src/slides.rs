use std::path::{Path, PathBuf};

use crate::{
    config::PresentationConfig,
    error::{SlidecastError, SlidecastResult},
    paths::RunContext,
};

/// One unit of presentation content: a source SVG and a display duration.
/// Immutable once resolved; consumed once by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Slide {
    pub id: String,
    pub src: PathBuf,
    pub duration: f64,
}

/// Resolve the slide list for a run.
///
/// Config slides win when present: each descriptor is normalized (index as
/// id fallback, duration defaulting to 1), source-less slides are assigned
/// SVGs from the frames directory sequentially, relative paths resolve
/// against the project root, and slides whose source is missing on disk are
/// dropped. Without config slides the frames directory itself is
/// enumerated. `limit` truncates the result for fast-validation runs.
pub fn resolve(
    config: &PresentationConfig,
    ctx: &RunContext,
    limit: Option<usize>,
) -> SlidecastResult<Vec<Slide>> {
    let mut slides = if config.slides.is_empty() {
        enumerate_frames_dir(&ctx.frames_dir)
    } else {
        resolve_config_slides(config, ctx)
    };

    if slides.is_empty() {
        return Err(SlidecastError::NoSlides {
            frames_dir: ctx.frames_dir.clone(),
        });
    }

    if let Some(limit) = limit {
        slides.truncate(limit);
        tracing::info!(count = slides.len(), "short run, truncated slide list");
    }

    Ok(slides)
}

fn resolve_config_slides(config: &PresentationConfig, ctx: &RunContext) -> Vec<Slide> {
    // Source-less slides draw from the frames dir in order: the k-th slide
    // without an explicit src gets the k-th SVG. Slides left without a file
    // are dropped below, like any other missing source.
    let mut fallback = svg_files(&ctx.frames_dir).into_iter();

    let mut slides = Vec::with_capacity(config.slides.len());
    for (index, raw) in config.slides.iter().enumerate() {
        let id = raw
            .id
            .clone()
            .unwrap_or_else(|| index.to_string());
        let src = match &raw.src {
            Some(src) => Some(ctx.resolve(Path::new(src))),
            None => fallback.next(),
        };

        let Some(src) = src else {
            tracing::warn!(%id, "slide has no source and no fallback SVG remains, skipping");
            continue;
        };
        if !src.exists() {
            tracing::warn!(%id, src = %src.display(), "slide source does not exist, skipping");
            continue;
        }

        slides.push(Slide {
            id,
            src,
            duration: raw.duration.unwrap_or(1.0),
        });
    }
    slides
}

fn enumerate_frames_dir(frames_dir: &Path) -> Vec<Slide> {
    svg_files(frames_dir)
        .into_iter()
        .map(|src| Slide {
            id: src
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            src,
            duration: 1.0,
        })
        .collect()
}

/// SVG files in a directory, sorted by file name. Raw `read_dir` order is
/// filesystem-dependent; sorting keeps slide order stable across machines.
pub fn svg_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
        })
        .collect();
    files.sort();
    files
}
