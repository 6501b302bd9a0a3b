pub mod display;
pub mod logging;
pub mod pipeline;

pub use pipeline::{ExportReport, IngestReport, Pipeline};
