use crate::types::{JobRecord, Result};
use crate::JobAggregator;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayPhase {
    /// Nothing has been fetched yet.
    Idle,
    Fetching,
    Succeeded(Vec<JobRecord>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySnapshot {
    pub generation: u64,
    pub phase: DisplayPhase,
}

impl DisplaySnapshot {
    /// Records to show; a failed or pending cycle shows none.
    pub fn records(&self) -> &[JobRecord] {
        match &self.phase {
            DisplayPhase::Succeeded(records) => records.as_slice(),
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            DisplayPhase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Proof that a fetch cycle was started; only the latest one may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTicket {
    generation: u64,
}

impl CycleTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The single display slot, guarded by a generation counter so a slow,
/// superseded fetch cycle cannot overwrite a newer result.
pub struct DisplayState {
    latest: AtomicU64,
    slot: RwLock<DisplaySnapshot>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
            slot: RwLock::new(DisplaySnapshot {
                generation: 0,
                phase: DisplayPhase::Idle,
            }),
        }
    }

    pub async fn begin_cycle(&self) -> CycleTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let mut slot = self.slot.write().await;
        // A newer cycle may already hold the slot.
        if generation > slot.generation {
            *slot = DisplaySnapshot {
                generation,
                phase: DisplayPhase::Fetching,
            };
        }
        debug!("Started fetch cycle {}", generation);
        CycleTicket { generation }
    }

    /// Returns false when the ticket was superseded and the result dropped.
    pub async fn publish(&self, ticket: CycleTicket, result: Result<Vec<JobRecord>>) -> bool {
        let mut slot = self.slot.write().await;
        let latest = self.latest.load(Ordering::SeqCst);
        if ticket.generation != latest || ticket.generation < slot.generation {
            debug!(
                "Discarding result of stale fetch cycle {} (latest {})",
                ticket.generation, latest
            );
            return false;
        }

        let phase = match result {
            Ok(records) => {
                info!("Fetch cycle {} published {} records", ticket.generation, records.len());
                DisplayPhase::Succeeded(records)
            }
            Err(e) => {
                error!("Fetch cycle {} failed: {}", ticket.generation, e);
                DisplayPhase::Failed(e.to_string())
            }
        };

        *slot = DisplaySnapshot {
            generation: ticket.generation,
            phase,
        };
        true
    }

    pub async fn snapshot(&self) -> DisplaySnapshot {
        self.slot.read().await.clone()
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// Aggregator plus display state: one `refresh` is one fetch cycle.
#[derive(Clone)]
pub struct Dashboard {
    aggregator: Arc<JobAggregator>,
    state: Arc<DisplayState>,
}

impl Dashboard {
    pub fn new(aggregator: Arc<JobAggregator>) -> Self {
        Self {
            aggregator,
            state: Arc::new(DisplayState::new()),
        }
    }

    pub fn state(&self) -> Arc<DisplayState> {
        self.state.clone()
    }

    pub async fn refresh(&self) -> DisplaySnapshot {
        let ticket = self.state.begin_cycle().await;
        let result = self.aggregator.aggregate().await;
        self.state.publish(ticket, result).await;
        self.state.snapshot().await
    }
}
