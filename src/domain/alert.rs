use chrono::{DateTime, Utc};

use super::{format_bytes, DiskState};

/// Low disk space warning for one mount
#[derive(Debug, Clone)]
pub struct AlertMessage<'a> {
    pub state: &'a DiskState,
    pub threshold: u64,
}

impl<'a> AlertMessage<'a> {
    pub fn new(state: &'a DiskState, threshold: u64) -> Self {
        Self { state, threshold }
    }

    pub fn render(&self) -> String {
        let state = self.state;
        [
            "*WARNING!*".to_string(),
            format!("LOW DISK SPACE ON `{}`", state.name),
            format!("MACHINE `{}`", state.host),
            format!("TOTAL: {}", format_bytes(state.total)),
            format!("FREE: {}", format_bytes(state.free)),
            format!("USED: {}", format_bytes(state.used)),
            format!("Free space in percentage: {}%", state.free_percentage),
            format!("Using threshold {}%", self.threshold),
        ]
        .join("\n")
    }
}

/// Receipt for a message accepted by the messaging service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Server-assigned message timestamp, e.g. `1503435956.000247`
    pub timestamp: String,
    /// Channel the message landed in
    pub destination: String,
}

impl Delivery {
    pub fn new(timestamp: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            destination: destination.into(),
        }
    }

    /// Wall clock time encoded in a Slack-style `seconds.micros` timestamp
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        let (secs, frac) = self
            .timestamp
            .split_once('.')
            .unwrap_or((self.timestamp.as_str(), "0"));
        let secs: i64 = secs.parse().ok()?;
        let micros: u32 = format!("{:0<6}", frac).get(..6)?.parse().ok()?;
        DateTime::from_timestamp(secs, micros * 1_000)
    }
}
