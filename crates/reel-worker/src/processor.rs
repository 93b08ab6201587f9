//! Job processing: assembly, music, render handoff, cleanup.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::Instrument;

use reel_media::{AudioEncoder, DurationProbe};
use reel_models::RenderManifest;
use reel_providers::{
    FootageFetcher, FootageProvider, ProviderRegistry, Renderer, TranscriptionProvider,
};
use reel_queue::{JobRunner, QueuedJob};

use crate::assembler;
use crate::config::WorkerConfig;
use crate::error::WorkerResult;
use crate::ledger::TempFileLedger;
use crate::logging::JobLogger;
use crate::music::MusicSelector;

/// Everything a job needs to run: configuration plus the pluggable
/// engines behind each pipeline step. Built once at startup and shared
/// across jobs.
pub struct ProcessingContext {
    pub config: WorkerConfig,
    pub registry: Arc<ProviderRegistry>,
    pub transcriber: Arc<dyn TranscriptionProvider>,
    pub footage: Arc<dyn FootageProvider>,
    pub fetcher: Arc<dyn FootageFetcher>,
    pub encoder: Arc<dyn AudioEncoder>,
    pub durations: Arc<dyn DurationProbe>,
    pub music: MusicSelector,
    pub renderer: Arc<dyn Renderer>,
}

/// Adapts the pipeline to the queue's [`JobRunner`] contract.
pub struct PipelineRunner {
    ctx: Arc<ProcessingContext>,
}

impl PipelineRunner {
    pub fn new(ctx: Arc<ProcessingContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl JobRunner for PipelineRunner {
    async fn run(&self, job: &QueuedJob) -> anyhow::Result<()> {
        process_job(&self.ctx, job).await?;
        Ok(())
    }
}

/// Run one job end to end. Scratch files are released at this single
/// wrap-up point whatever the outcome; only the rendered video survives.
pub async fn process_job(ctx: &ProcessingContext, job: &QueuedJob) -> WorkerResult<()> {
    let logger = JobLogger::new(&job.id, "video_assembly");
    logger.log_start(&format!("{} scenes", job.scenes.len()));

    let work_dir = PathBuf::from(&ctx.config.work_dir).join(job.id.as_str());
    tokio::fs::create_dir_all(&work_dir).await?;

    let mut ledger = TempFileLedger::new();
    let result = run_pipeline(ctx, job, &work_dir, &mut ledger, &logger)
        .instrument(logger.create_span())
        .await;

    ledger.release_all().await;
    // Only removed when the job left nothing unregistered behind.
    let _ = tokio::fs::remove_dir(&work_dir).await;

    match &result {
        Ok(()) => logger.log_completion("Video rendered"),
        Err(e) => logger.log_error(&e.to_string()),
    }
    result
}

async fn run_pipeline(
    ctx: &ProcessingContext,
    job: &QueuedJob,
    work_dir: &std::path::Path,
    ledger: &mut TempFileLedger,
    logger: &JobLogger,
) -> WorkerResult<()> {
    let assembled = assembler::assemble(ctx, job, work_dir, ledger).await?;
    logger.log_progress(&format!(
        "Assembled {} scenes, {:.1}s total",
        assembled.scenes.len(),
        assembled.total_duration_seconds
    ));

    let music = ctx
        .music
        .select(assembled.total_duration_seconds, job.config.music_mood)?;
    logger.log_progress(&format!("Selected music track {}", music.file));

    let manifest = RenderManifest {
        scenes: assembled.scenes,
        music: Some(music),
        duration_ms: (assembled.total_duration_seconds * 1000.0).round() as u64,
        padding_back_ms: job.config.padding_back_ms,
        caption_position: job.config.caption_position,
        music_volume: job.config.music_volume,
    };

    ctx.renderer
        .render(&manifest, &job.id, job.config.orientation)
        .await?;
    Ok(())
}
