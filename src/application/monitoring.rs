use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::domain::{breached, Delivery, DiskState, ThresholdSpec};
use crate::ports::{DiskSource, Messenger, SendError, StatError};

use super::dispatch;

/// An alert that reached the messaging service
#[derive(Debug, Clone)]
pub struct SentAlert {
    pub mount: String,
    pub delivery: Delivery,
}

/// An alert that could not be delivered
#[derive(Debug)]
pub struct DispatchFailure {
    pub mount: String,
    pub error: SendError,
}

/// Outcome of a run where every alert went out
#[derive(Debug, Default)]
pub struct RunReport {
    pub inspected: usize,
    /// Delivered alerts in completion order
    pub delivered: Vec<SentAlert>,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Stat(#[from] StatError),

    #[error("{}", describe(.delivered, .failures))]
    Dispatch {
        delivered: Vec<SentAlert>,
        failures: Vec<DispatchFailure>,
    },
}

fn describe(delivered: &[SentAlert], failures: &[DispatchFailure]) -> String {
    let mounts = failures
        .iter()
        .map(|f| format!("{} ({})", f.mount, f.error))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} of {} alerts failed: {}",
        failures.len(),
        failures.len() + delivered.len(),
        mounts
    )
}

/// Checks every configured mount and alerts on the ones running low
pub struct DiskSpaceService {
    disk_source: Arc<dyn DiskSource>,
    messenger: Arc<dyn Messenger>,
    timeout: Option<Duration>,
}

impl DiskSpaceService {
    pub fn new(disk_source: Arc<dyn DiskSource>, messenger: Arc<dyn Messenger>) -> Self {
        Self {
            disk_source,
            messenger,
            timeout: None,
        }
    }

    /// Give up on a single alert after `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Inspect every mount in `spec`, then send one alert per breach concurrently.
    ///
    /// Any inspection failure aborts the run before an alert is sent. Alerts
    /// are independent: a failed send does not stop the others, and this
    /// only returns once every launched send has finished.
    pub async fn run(&self, spec: &ThresholdSpec, target: &str) -> Result<RunReport, RunError> {
        let breaches = self.inspect_all(spec).inspect_err(|e| {
            error!("Inspection of {} failed, no alerts will be sent", e.path());
        })?;
        let inspected = spec.len();

        let mut tasks = JoinSet::new();
        let mut launched = HashMap::new();

        for (state, threshold) in breaches {
            let mount = state.name.clone();
            let messenger = Arc::clone(&self.messenger);
            let target = target.to_string();
            let timeout = self.timeout;

            let handle = tasks.spawn(async move {
                let send = dispatch(messenger.as_ref(), &state, threshold, &target);
                let result = match timeout {
                    Some(limit) => tokio::time::timeout(limit, send)
                        .await
                        .unwrap_or(Err(SendError::Timeout(limit))),
                    None => send.await,
                };
                (state.name, result)
            });
            launched.insert(handle.id(), mount);
        }

        info!("Waiting for {} alert(s)", launched.len());

        let mut delivered = Vec::new();
        let mut failures = Vec::new();

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, (mount, Ok(delivery)))) => delivered.push(SentAlert { mount, delivery }),
                Ok((_, (mount, Err(error)))) => {
                    error!("Failed to send alert for {}: {}", mount, error);
                    failures.push(DispatchFailure { mount, error });
                }
                Err(join_error) => {
                    let mount = launched
                        .remove(&join_error.id())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    error!("Alert task for {} died: {}", mount, join_error);
                    failures.push(DispatchFailure {
                        mount,
                        error: SendError::TaskFailed(join_error.to_string()),
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(RunReport {
                inspected,
                delivered,
            })
        } else {
            Err(RunError::Dispatch {
                delivered,
                failures,
            })
        }
    }

    fn inspect_all(&self, spec: &ThresholdSpec) -> Result<Vec<(DiskState, u64)>, StatError> {
        let mut breaches = Vec::new();

        for mount in spec.iter() {
            let state = self.disk_source.inspect(&mount.path)?;

            if breached(&state, mount.threshold) {
                warn!(
                    "{} on {} has {}% free, below threshold {}%",
                    state.name, state.host, state.free_percentage, mount.threshold
                );
                breaches.push((state, mount.threshold));
            } else {
                info!(
                    "{} has {}% free (threshold {}%)",
                    state.name, state.free_percentage, mount.threshold
                );
            }
        }

        Ok(breaches)
    }
}
