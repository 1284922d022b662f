//! # Outbound Notifier
//!
//! One-way messages to the firm's external logging endpoint whenever a
//! client file or a notarization record is created.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command (client add / pjs add)                                         │
//! │       │  handle.notify(Notification::client_created(&client))           │
//! │       │  try_send: full queue or stopped worker → warn!, dropped        │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────┐                                        │
//! │  │  mpsc queue (capacity N)    │                                        │
//! │  └──────────────┬──────────────┘                                        │
//! │                 ▼                                                       │
//! │  Notifier::run (tokio task)                                             │
//! │       │  POST endpoint, body = JSON                                     │
//! │       ├── 2xx            → debug!                                       │
//! │       ├── other status   → warn!                                        │
//! │       └── transport error→ warn!   (no retry)                           │
//! │                                                                         │
//! │  shutdown(): close queue, worker drains what is queued, then exits      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use hma_core::{Client, Money, PjsRecord};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::NotifyConfig;
use crate::error::{SyncError, SyncResult};

// =============================================================================
// Payloads
// =============================================================================

/// Message sent to the logging endpoint.
///
/// ```json
/// {"type":"GUAMAN","name":"ALI","detail":"FASAKH","balance":2500}
/// {"type":"PJS","id":"…","date":"2025-03-14","name":"…","detail":"…","amount":80}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// A new client file with its opening fee.
    #[serde(rename = "GUAMAN")]
    ClientCreated {
        name: String,
        detail: String,
        balance: Money,
    },

    /// A new notarization record.
    #[serde(rename = "PJS")]
    NotarizationRecorded {
        id: String,
        date: NaiveDate,
        name: String,
        detail: String,
        amount: Money,
    },
}

impl Notification {
    pub fn client_created(client: &Client) -> Self {
        Notification::ClientCreated {
            name: client.name.clone(),
            detail: client.detail.clone(),
            balance: client.balance(),
        }
    }

    pub fn pjs_recorded(record: &PjsRecord) -> Self {
        Notification::NotarizationRecorded {
            id: record.id.clone(),
            date: record.date,
            name: record.name.clone(),
            detail: record.detail.clone(),
            amount: record.amount,
        }
    }

    /// Wire tag, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::ClientCreated { .. } => "GUAMAN",
            Notification::NotarizationRecorded { .. } => "PJS",
        }
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Sending side of the notifier. Dropping it also stops the worker once the
/// queue is empty.
#[derive(Debug)]
pub struct NotifierHandle {
    tx: Option<mpsc::Sender<Notification>>,
    worker: Option<JoinHandle<()>>,
}

impl NotifierHandle {
    /// A handle that discards everything.
    pub fn disabled() -> Self {
        NotifierHandle {
            tx: None,
            worker: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Queues a notification without waiting. Returns whether it was queued.
    pub fn notify(&self, notification: Notification) -> bool {
        let Some(tx) = &self.tx else {
            debug!(kind = notification.kind(), "Notifications disabled, dropping");
            return false;
        };

        match tx.try_send(notification) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(n)) => {
                warn!(kind = n.kind(), "Notification queue full, dropping");
                false
            }
            Err(mpsc::error::TrySendError::Closed(n)) => {
                warn!(kind = n.kind(), "Notifier stopped, dropping");
                false
            }
        }
    }

    /// Closes the queue and waits for the worker to finish what is queued.
    pub async fn shutdown(mut self) -> SyncResult<()> {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            worker
                .await
                .map_err(|e| SyncError::ChannelError(format!("Notifier task failed: {}", e)))?;
        }
        Ok(())
    }
}

// =============================================================================
// Worker
// =============================================================================

/// Background task posting queued notifications.
#[derive(Debug)]
pub struct Notifier {
    client: reqwest::Client,
    endpoint: Url,
    rx: mpsc::Receiver<Notification>,
}

impl Notifier {
    /// Builds the worker and its handle. The worker does nothing until
    /// [`run`](Self::run) is polled.
    pub fn new(config: &NotifyConfig) -> SyncResult<(Self, NotifierHandle)> {
        let endpoint = config
            .endpoint_url()?
            .ok_or_else(|| SyncError::InvalidConfig("notify.endpoint is not set".into()))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));

        let notifier = Notifier {
            client,
            endpoint,
            rx,
        };
        let handle = NotifierHandle {
            tx: Some(tx),
            worker: None,
        };

        Ok((notifier, handle))
    }

    /// Starts the worker on the current tokio runtime.
    ///
    /// Returns a disabled handle when notifications are switched off, have
    /// no endpoint, or the worker cannot be built.
    pub fn spawn(config: &NotifyConfig) -> NotifierHandle {
        if !config.is_active() {
            debug!("Outbound notifications disabled");
            return NotifierHandle::disabled();
        }

        match Notifier::new(config) {
            Ok((notifier, mut handle)) => {
                handle.worker = Some(tokio::spawn(notifier.run()));
                handle
            }
            Err(e) => {
                error!(error = %e, "Failed to start notifier, notifications disabled");
                NotifierHandle::disabled()
            }
        }
    }

    /// Posts notifications until every sender is gone and the queue is empty.
    pub async fn run(mut self) {
        info!(endpoint = %self.endpoint, "Notifier starting");

        while let Some(notification) = self.rx.recv().await {
            self.deliver(&notification).await;
        }

        info!("Notifier stopped");
    }

    async fn deliver(&self, notification: &Notification) {
        let result = self
            .client
            .post(self.endpoint.clone())
            .json(notification)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!(kind = notification.kind(), status = %response.status(), "Notification sent");
            }
            Ok(response) => {
                warn!(
                    kind = notification.kind(),
                    status = %response.status(),
                    "Notification endpoint rejected payload"
                );
            }
            Err(e) => {
                warn!(kind = notification.kind(), error = %e, "Notification not delivered");
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hma_core::LedgerEntry;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_client_payload_shape() {
        let client = Client {
            id: "c-1".into(),
            name: "ALI".into(),
            detail: "FASAKH".into(),
            ledger: vec![LedgerEntry {
                date: date(),
                desc: hma_core::FEE_DESCRIPTION.into(),
                amt: Money::from_ringgit(2500),
            }],
        };

        let json = serde_json::to_value(Notification::client_created(&client)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "GUAMAN",
                "name": "ALI",
                "detail": "FASAKH",
                "balance": 2500
            })
        );
    }

    #[test]
    fn test_pjs_payload_shape() {
        let record = PjsRecord {
            id: "p-1".into(),
            date: date(),
            name: "SITI".into(),
            detail: "SD".into(),
            amount: Money::from_sen(8050),
        };

        let json = serde_json::to_value(Notification::pjs_recorded(&record)).unwrap();
        assert_eq!(json["type"], "PJS");
        assert_eq!(json["id"], "p-1");
        assert_eq!(json["date"], "2025-03-14");
        assert_eq!(json["amount"], 80.5);
    }

    #[tokio::test]
    async fn test_disabled_handle_drops() {
        let handle = Notifier::spawn(&NotifyConfig::default());
        assert!(!handle.is_enabled());

        let record = PjsRecord {
            id: "p-1".into(),
            date: date(),
            name: "X".into(),
            detail: String::new(),
            amount: Money::zero(),
        };
        assert!(!handle.notify(Notification::pjs_recorded(&record)));
        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_blocking() {
        let mut config = NotifyConfig::with_endpoint("http://127.0.0.1:9/");
        config.queue_capacity = 1;

        // Worker never runs, so the queue stays full.
        let (_notifier, handle) = Notifier::new(&config).unwrap();
        let n = Notification::ClientCreated {
            name: "A".into(),
            detail: String::new(),
            balance: Money::zero(),
        };

        assert!(handle.notify(n.clone()));
        assert!(!handle.notify(n));
    }

    #[test]
    fn test_missing_endpoint_is_config_error() {
        let err = Notifier::new(&NotifyConfig::default()).unwrap_err();
        assert!(err.is_config_error());
    }
}
