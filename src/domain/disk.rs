/// Hostname used when the machine name cannot be resolved
pub const UNKNOWN_HOST: &str = "Unknown";

/// Usage snapshot of a single mount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskState {
    pub host: String,
    pub name: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub free_percentage: u64,
}

impl DiskState {
    /// Build a snapshot from raw totals. Returns `None` when `total` is zero.
    ///
    /// `free` is clamped to `total`, so `used + free == total` always holds.
    pub fn new(host: String, name: String, total: u64, free: u64) -> Option<Self> {
        if total == 0 {
            return None;
        }

        let free = free.min(total);
        let free_percentage = (free as u128 * 100 / total as u128) as u64;

        Some(Self {
            host,
            name,
            total,
            used: total - free,
            free,
            free_percentage,
        })
    }
}
