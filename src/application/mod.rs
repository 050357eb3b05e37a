mod dispatch;
mod monitoring;

pub use dispatch::dispatch;
pub use monitoring::{DiskSpaceService, RunError};
