pub mod alert;
pub mod bytes;
pub mod disk;
pub mod threshold;

pub use alert::{AlertMessage, Delivery};
pub use bytes::format_bytes;
pub use disk::{DiskState, UNKNOWN_HOST};
pub use threshold::{breached, MountThreshold, ThresholdError, ThresholdSpec};
