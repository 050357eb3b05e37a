use std::ffi::OsString;

use nix::sys::statvfs::statvfs;
use nix::unistd::gethostname;
use tracing::{debug, warn};

use crate::domain::{DiskState, UNKNOWN_HOST};
use crate::ports::{DiskSource, StatError};

/// Disk source backed by statvfs(2)
#[derive(Debug, Clone, Default)]
pub struct StatvfsDiskSource;

impl StatvfsDiskSource {
    pub fn new() -> Self {
        Self
    }
}

/// Hostname from a gethostname(2) result, or `UNKNOWN_HOST` with a warning
fn host_or_unknown(result: nix::Result<OsString>) -> String {
    match result.map(|name| name.into_string()) {
        Ok(Ok(name)) => name,
        Ok(Err(raw)) => {
            warn!("Hostname {:?} is not valid UTF-8. Using `{}`.", raw, UNKNOWN_HOST);
            UNKNOWN_HOST.to_string()
        }
        Err(e) => {
            warn!("Unable to get hostname: {}. Using `{}`.", e, UNKNOWN_HOST);
            UNKNOWN_HOST.to_string()
        }
    }
}

/// Turn raw block counts into a snapshot; `unit` is the size of one block in bytes
fn snapshot(
    path: &str,
    host: String,
    blocks: u64,
    available: u64,
    unit: u64,
) -> Result<DiskState, StatError> {
    let total = blocks.saturating_mul(unit);
    let free = available.saturating_mul(unit);

    debug!(path, total, free, "statvfs");

    DiskState::new(host, path.to_string(), total, free).ok_or_else(|| {
        StatError::EmptyFilesystem {
            path: path.to_string(),
        }
    })
}

impl DiskSource for StatvfsDiskSource {
    fn inspect(&self, path: &str) -> Result<DiskState, StatError> {
        let stat = statvfs(path).map_err(|source| StatError::Stat {
            path: path.to_string(),
            source,
        })?;

        // f_blocks is counted in fragments; some filesystems leave f_frsize unset
        let unit = match stat.fragment_size() as u64 {
            0 => stat.block_size() as u64,
            size => size,
        };

        snapshot(
            path,
            host_or_unknown(gethostname()),
            stat.blocks() as u64,
            stat.blocks_available() as u64,
            unit,
        )
    }
}
