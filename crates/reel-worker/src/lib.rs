//! Per-job scene-assembly pipeline.
//!
//! Drives the speech, transcription, and footage providers scene by scene,
//! reconciles timing, attaches music, and hands the manifest to the
//! rendering engine. Plugged into the queue via [`PipelineRunner`].

pub mod assembler;
pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod music;
pub mod processor;

pub use assembler::AssembledVideo;
pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use ledger::TempFileLedger;
pub use logging::JobLogger;
pub use music::MusicSelector;
pub use processor::{process_job, PipelineRunner, ProcessingContext};
