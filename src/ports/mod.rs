pub mod disk_source;
pub mod messenger;

pub use disk_source::{DiskSource, StatError};
pub use messenger::{Messenger, SendError};
