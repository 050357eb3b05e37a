pub mod slack;
pub mod statvfs;

pub use slack::SlackMessenger;
pub use statvfs::StatvfsDiskSource;
