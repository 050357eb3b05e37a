use tracing::info;

use crate::domain::{AlertMessage, Delivery, DiskState};
use crate::ports::{Messenger, SendError};

/// Format a low disk space alert for `state` and post it to `target`
pub async fn dispatch(
    messenger: &dyn Messenger,
    state: &DiskState,
    threshold: u64,
    target: &str,
) -> Result<Delivery, SendError> {
    let text = AlertMessage::new(state, threshold).render();
    let delivery = messenger.post_message(target, &text).await?;

    info!(
        mount = %state.name,
        timestamp = %delivery.timestamp,
        sent_at = ?delivery.sent_at(),
        destination = %delivery.destination,
        "Alert delivered"
    );

    Ok(delivery)
}
