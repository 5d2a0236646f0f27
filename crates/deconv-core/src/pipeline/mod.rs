pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{process_frame, run_pipeline, run_pipeline_reported};
pub use types::{
    ImageRun, PipelineReport, PipelineStage, ProgressReporter, Restoration, Route,
};
