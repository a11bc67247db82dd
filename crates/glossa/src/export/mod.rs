//! Export backend: the background snapshot worker and the download stream.

mod download;
mod job;
mod worker;

pub use download::{open_export, ExportStream};
pub use job::ExportJob;
pub use worker::ExportWorker;
