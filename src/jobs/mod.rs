//! Background cooking jobs

pub mod cooking;
pub mod queue;

pub use cooking::{CookingJob, CookingJobRunner, DEFAULT_COOKING_TIME, JobError, QUEUE_NAME};
pub use queue::{JobQueue, RecordingJobQueue, TokioJobQueue};
