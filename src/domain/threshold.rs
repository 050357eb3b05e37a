use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use super::DiskState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("--disk and --threshold need the same amount of values (got {disks} disks, {thresholds} thresholds)")]
    CountMismatch { disks: usize, thresholds: usize },

    #[error("Invalid threshold value: {value:?}")]
    InvalidThreshold { value: String },

    #[error("Mount {path} is listed more than once")]
    DuplicateMount { path: String },

    #[error("No mounts configured")]
    Empty,
}

/// A mount and the minimum free percentage it must keep
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MountThreshold {
    pub path: String,
    pub threshold: u64,
}

impl MountThreshold {
    pub fn new(path: impl Into<String>, threshold: u64) -> Self {
        Self {
            path: path.into(),
            threshold,
        }
    }
}

/// Validated, ordered list of mounts to check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdSpec {
    mounts: Vec<MountThreshold>,
}

impl ThresholdSpec {
    /// Build a spec from already paired entries, keeping input order.
    pub fn new(mounts: Vec<MountThreshold>) -> Result<Self, ThresholdError> {
        if mounts.is_empty() {
            return Err(ThresholdError::Empty);
        }

        let mut seen = HashSet::new();
        for mount in &mounts {
            if !seen.insert(mount.path.as_str()) {
                return Err(ThresholdError::DuplicateMount {
                    path: mount.path.clone(),
                });
            }
        }

        Ok(Self { mounts })
    }

    /// Pair two parallel lists, e.g. the words of `--disk` and `--threshold`.
    pub fn from_lists<P, T>(paths: &[P], thresholds: &[T]) -> Result<Self, ThresholdError>
    where
        P: AsRef<str>,
        T: AsRef<str>,
    {
        if paths.len() != thresholds.len() {
            return Err(ThresholdError::CountMismatch {
                disks: paths.len(),
                thresholds: thresholds.len(),
            });
        }

        let mounts = paths
            .iter()
            .zip(thresholds)
            .map(|(path, raw)| {
                let raw = raw.as_ref();
                raw.parse::<u64>()
                    .map(|threshold| MountThreshold::new(path.as_ref(), threshold))
                    .map_err(|_| ThresholdError::InvalidThreshold {
                        value: raw.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(mounts)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MountThreshold> {
        self.mounts.iter()
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    /// Always false for a spec built through `new` or `from_lists`
    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}

/// True when the free percentage is strictly below the threshold
pub fn breached(state: &DiskState, threshold: u64) -> bool {
    state.free_percentage < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(free_percentage: u64) -> DiskState {
        DiskState::new("box".to_string(), "/".to_string(), 100, free_percentage).unwrap()
    }

    #[test]
    fn test_breach_is_strict() {
        let state = state_with(10);
        assert!(breached(&state, 11));
        assert!(!breached(&state, 10));
        assert!(!breached(&state, 9));
        assert!(!breached(&state, 0));
    }

    #[test]
    fn test_from_lists_keeps_order() {
        let spec = ThresholdSpec::from_lists(&["/tmp", "/", "/var"], &["5", "10", "20"]).unwrap();
        assert_eq!(spec.len(), 3);
        assert!(!spec.is_empty());
        let mounts: Vec<_> = spec.iter().cloned().collect();
        assert_eq!(
            mounts,
            vec![
                MountThreshold::new("/tmp", 5),
                MountThreshold::new("/", 10),
                MountThreshold::new("/var", 20),
            ]
        );
    }

    #[test]
    fn test_count_mismatch() {
        let err = ThresholdSpec::from_lists(&["/", "/tmp"], &["10"]).unwrap_err();
        assert_eq!(err, ThresholdError::CountMismatch { disks: 2, thresholds: 1 });
    }

    #[test]
    fn test_non_numeric_threshold() {
        let err = ThresholdSpec::from_lists(&["/"], &["ten"]).unwrap_err();
        assert_eq!(err, ThresholdError::InvalidThreshold { value: "ten".to_string() });

        let err = ThresholdSpec::from_lists(&["/"], &["-5"]).unwrap_err();
        assert_eq!(err, ThresholdError::InvalidThreshold { value: "-5".to_string() });
    }

    #[test]
    fn test_duplicate_mount_is_rejected() {
        let err = ThresholdSpec::from_lists(&["/", "/tmp", "/"], &["10", "10", "5"]).unwrap_err();
        assert_eq!(err, ThresholdError::DuplicateMount { path: "/".to_string() });
    }

    #[test]
    fn test_empty_spec() {
        let empty: [&str; 0] = [];
        assert_eq!(ThresholdSpec::from_lists(&empty, &empty).unwrap_err(), ThresholdError::Empty);
    }
}
