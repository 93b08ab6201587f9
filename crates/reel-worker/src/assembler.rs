//! Scene-by-scene assembly: speech, captions, timing, footage.

use std::path::Path;

use tracing::{debug, info, warn};

use reel_media::reconcile_duration;
use reel_models::AssembledScene;
use reel_providers::{find_with_fallback, CatalogSource, ProviderError};
use reel_queue::QueuedJob;

use crate::error::{WorkerError, WorkerResult};
use crate::ledger::TempFileLedger;
use crate::processor::ProcessingContext;

/// The assembled scenes of one job plus their summed duration, padding
/// included. Scenes are immutable once pushed; downstream steps only read.
#[derive(Debug, Clone)]
pub struct AssembledVideo {
    pub scenes: Vec<AssembledScene>,
    pub total_duration_seconds: f64,
}

/// Assemble every scene of `job` in order. Scratch files land in
/// `work_dir` and are registered with `ledger` before the producing
/// operation runs. The first failing scene aborts the job.
pub async fn assemble(
    ctx: &ProcessingContext,
    job: &QueuedJob,
    work_dir: &Path,
    ledger: &mut TempFileLedger,
) -> WorkerResult<AssembledVideo> {
    let speech = ctx
        .registry
        .resolve_speech(job.config.speech_provider.as_deref())?;

    // Pin one voice for the whole job so narration stays consistent even
    // when the requested voice has to be substituted.
    let catalog = speech.list_voices().await?;
    if catalog.source == CatalogSource::Fallback {
        debug!(provider = speech.name(), "Using fallback voice catalog");
    }
    let voice = match &job.config.voice {
        Some(requested) if catalog.supports(requested) => requested.clone(),
        requested => {
            let substitute = catalog
                .default_voice()
                .ok_or_else(|| WorkerError::NoVoices(speech.name().to_string()))?
                .to_string();
            if let Some(requested) = requested {
                warn!(
                    requested,
                    substitute,
                    provider = speech.name(),
                    "Requested voice not supported, substituting"
                );
            }
            substitute
        }
    };

    let mut scenes = Vec::with_capacity(job.scenes.len());
    let mut exclude_ids: Vec<String> = Vec::new();
    let mut total_duration_seconds = 0.0;
    let scene_count = job.scenes.len();

    for (index, scene) in job.scenes.iter().enumerate() {
        let is_last = index + 1 == scene_count;
        info!(
            job_id = %job.id,
            scene = index,
            terms = ?scene.search_terms,
            "Assembling scene"
        );

        let audio = speech.generate(&scene.text, &voice).await?;
        if audio.audio.is_empty() {
            return Err(ProviderError::EmptyAudio.into());
        }

        let wav_path = work_dir.join(format!("scene_{index}.wav"));
        let mp3_path = work_dir.join(format!("scene_{index}.mp3"));
        ledger.register(&wav_path);
        ledger.register(&mp3_path);
        ctx.encoder.normalize(&audio.audio, &wav_path).await?;
        ctx.encoder.compress(&wav_path, &mp3_path).await?;

        let captions = ctx.transcriber.create_captions(&wav_path).await?;

        let measured = ctx.durations.measure(&mp3_path).await;
        let mut duration_seconds =
            reconcile_duration(audio.estimated_duration_seconds, measured);
        if is_last {
            duration_seconds += job.config.padding_back_ms as f64 / 1000.0;
        }

        let hit = find_with_fallback(
            ctx.footage.as_ref(),
            &scene.search_terms,
            duration_seconds,
            &exclude_ids,
            job.config.orientation,
        )
        .await?;
        exclude_ids.push(hit.id.clone());

        let video_path = work_dir.join(format!("scene_{index}.mp4"));
        ledger.register(&video_path);
        ctx.fetcher.fetch(&hit.url, &video_path).await?;

        total_duration_seconds += duration_seconds;
        scenes.push(AssembledScene {
            captions,
            footage_ref: video_path.to_string_lossy().to_string(),
            audio_ref: mp3_path.to_string_lossy().to_string(),
            audio_duration_seconds: duration_seconds,
        });
    }

    Ok(AssembledVideo {
        scenes,
        total_duration_seconds,
    })
}
