pub mod job;
pub mod lease;
pub mod loaders;

pub use job::{ExtractionJob, JobOutcome, JobState};
pub use lease::{LeaseRecord, LEASE_FIELDS, LEASE_FIELD_COUNT};
pub use loaders::pdf_loader::load_pdf_jobs;
