mod scheduler;

pub use scheduler::{FetchBatch, FetchOutcome, MergeSummary, RefreshScheduler, RefreshTrigger};
