//! In-process job queue for the ReelSmith pipeline.
//!
//! A single worker task drains a FIFO pending list, running one job to
//! completion at a time. Completed videos are plain files in an output
//! directory; that directory is the only durable record of finished work.

pub mod error;
pub mod job;
pub mod queue;
pub mod store;

pub use error::{QueueError, QueueResult};
pub use job::QueuedJob;
pub use queue::{
    ClearStuckReport, JobListing, JobRunner, PendingJobInfo, QueueConfig, QueueSnapshot,
    VideoQueue,
};
pub use store::VideoStore;
