pub mod logger;
pub mod tracking_pipeline;
