//! Traits connecting the core to its collaborators.

mod advisor;
mod handler;

pub use advisor::Advisor;
pub use handler::{NullHandler, ReportHandler};
