//! Bounded polling for a sign-in payload.

use std::future;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::wallet::error::{WalletError, WalletResult};
use crate::wallet::session::{SessionStore, ACCOUNT_KEY};
use crate::wallet::signing::SigningClient;
use crate::wallet::types::{CreatedPayload, PayloadState};
use crate::xrpl;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Terminal result of a connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Signed { account: String },
    Expired,
    TimedOut,
}

pub struct WalletConnector {
    client: SigningClient,
    session: SessionStore,
    poll_interval: Duration,
    timeout: Duration,
}

impl WalletConnector {
    pub fn new(client: SigningClient, session: SessionStore) -> Self {
        Self {
            client,
            session,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Create a sign-in payload and wait for it to resolve.
    ///
    /// `on_created` runs once the payload exists, before the first poll.
    /// A failure to create the payload is returned immediately; failures
    /// while polling are logged and retried on the next tick.
    pub async fn connect<F>(
        &self,
        on_created: F,
        mut shutdown: broadcast::Receiver<()>,
    ) -> WalletResult<ConnectOutcome>
    where
        F: FnOnce(&CreatedPayload),
    {
        let payload = self.client.create_sign_in().await?;
        info!(uuid = %payload.uuid, "Sign-in payload created");
        on_created(&payload);

        let polling = tokio::time::timeout(self.timeout, self.poll_until_resolved(payload.uuid));
        tokio::select! {
            result = polling => match result {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(uuid = %payload.uuid, timeout_secs = self.timeout.as_secs(), "Wallet connection timed out");
                    Ok(ConnectOutcome::TimedOut)
                }
            },
            _ = wait_for_shutdown(&mut shutdown) => {
                info!(uuid = %payload.uuid, "Wallet connection cancelled");
                Err(WalletError::Cancelled)
            }
        }
    }

    async fn poll_until_resolved(&self, uuid: Uuid) -> WalletResult<ConnectOutcome> {
        let mut attempt: u64 = 0;
        loop {
            tokio::time::sleep(self.poll_interval).await;
            attempt += 1;

            let status = match self.client.status(uuid).await {
                Ok(status) => status,
                Err(e) => {
                    warn!(uuid = %uuid, attempt, error = %e, "Payload status check failed");
                    continue;
                }
            };

            match status.state() {
                PayloadState::Pending => {
                    debug!(uuid = %uuid, attempt, "Payload pending");
                }
                PayloadState::Expired => {
                    info!(uuid = %uuid, cancelled = status.meta.cancelled, "Payload expired");
                    return Ok(ConnectOutcome::Expired);
                }
                PayloadState::Signed => {
                    let account = status.response.account.unwrap_or_default();
                    xrpl::validate_classic_address(&account)?;
                    self.session.set(ACCOUNT_KEY, account.clone());
                    self.session.save()?;
                    info!(uuid = %uuid, account = %account, "Wallet connected");
                    return Ok(ConnectOutcome::Signed { account });
                }
            }
        }
    }
}

/// Resolves on a shutdown broadcast; never resolves once every sender is gone.
async fn wait_for_shutdown(rx: &mut broadcast::Receiver<()>) {
    match rx.recv().await {
        Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {}
        Err(broadcast::error::RecvError::Closed) => future::pending::<()>().await,
    }
}
