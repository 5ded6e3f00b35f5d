//! Background jobs run alongside the request loop.

use std::sync::Arc;
use std::time::Duration;

use battlescore_core::provider::AudioProvider;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Periodically refresh the audio provider credential, starting with an
/// immediate refresh. Runs for the life of the process, decoupled from
/// request handling; a failed refresh is logged and retried on the next
/// tick.
pub fn spawn_credential_refresh(
    provider: Arc<dyn AudioProvider>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match provider.refresh_credential().await {
                Ok(()) => info!("audio provider credential refreshed"),
                Err(err) => warn!(error = %err, "credential refresh failed"),
            }
        }
    })
}
