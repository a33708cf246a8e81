//! Admission Controller
//!
//! Per-client sliding-window request gate, checked before any scan work.
//!
//! # Algorithm
//! For each call: drop the client's timestamps older than the window; if the
//! remaining count has reached the limit, reject with the time until the
//! oldest one expires; otherwise record now and admit.
//!
//! # Concurrency
//! Windows live in a sharded `DashMap`, so checks for unrelated clients only
//! contend when they hash to the same shard. Idle clients are evicted lazily
//! every [`SWEEP_EVERY_CHECKS`] checks and by the periodic sweeper task.
//!
//! State is in-memory only and resets on restart.

pub mod client;
pub mod clock;

pub use client::{client_id_from_headers, UNKNOWN_CLIENT};
pub use clock::{Clock, ManualClock, SystemClock};

use dashmap::DashMap;
use serde::Serialize;
use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::debug;

/// Checks between opportunistic idle-client sweeps
pub const SWEEP_EVERY_CHECKS: u64 = 1024;

/// Limit and window length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionPolicy {
    pub max_requests: NonZeroU32,
    pub window: Duration,
}

impl Default for AdmissionPolicy {
    /// 10 requests per 60 seconds
    fn default() -> Self {
        Self {
            max_requests: NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN),
            window: Duration::from_secs(60),
        }
    }
}

/// Outcome of one admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionDecision {
    pub allowed: bool,
    /// Zero when admitted; at least one when rejected
    pub retry_after_seconds: u64,
}

impl AdmissionDecision {
    fn admitted() -> Self {
        Self {
            allowed: true,
            retry_after_seconds: 0,
        }
    }

    fn rejected(retry_after_seconds: u64) -> Self {
        Self {
            allowed: false,
            retry_after_seconds,
        }
    }
}

/// Sliding-window admission state, owned by the application state
#[derive(Debug)]
pub struct AdmissionController {
    policy: AdmissionPolicy,
    clock: Arc<dyn Clock>,
    windows: DashMap<String, VecDeque<Instant>>,
    checks_since_sweep: AtomicU64,
}

impl AdmissionController {
    pub fn new(policy: AdmissionPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    pub fn with_clock(policy: AdmissionPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            windows: DashMap::new(),
            checks_since_sweep: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> AdmissionPolicy {
        self.policy
    }

    /// Admit or reject one request from `client_id`
    pub fn check(&self, client_id: &str) -> AdmissionDecision {
        let now = self.clock.now();

        let decision = {
            // Guard holds only this client's shard lock
            let mut window = self.windows.entry(client_id.to_string()).or_default();
            purge_expired(&mut window, now, self.policy.window);

            if window.len() >= self.policy.max_requests.get() as usize {
                let oldest = window.front().copied().unwrap_or(now);
                let expires_in = (oldest + self.policy.window).saturating_duration_since(now);
                AdmissionDecision::rejected(retry_after_secs(expires_in))
            } else {
                window.push_back(now);
                AdmissionDecision::admitted()
            }
        };

        // Sweep after the entry guard is dropped; retain locks every shard
        let checks = self.checks_since_sweep.fetch_add(1, Ordering::Relaxed) + 1;
        if checks >= SWEEP_EVERY_CHECKS {
            self.checks_since_sweep.store(0, Ordering::Relaxed);
            self.evict_idle();
        }

        decision
    }

    /// Drop clients with no timestamps left in the window; returns how many
    pub fn evict_idle(&self) -> usize {
        let now = self.clock.now();
        let window = self.policy.window;
        let before = self.windows.len();

        self.windows.retain(|_, timestamps| {
            purge_expired(timestamps, now, window);
            !timestamps.is_empty()
        });

        let evicted = before.saturating_sub(self.windows.len());
        if evicted > 0 {
            debug!(evicted, remaining = self.windows.len(), "Evicted idle admission windows");
        }
        evicted
    }

    /// Number of clients currently holding a window
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Run [`evict_idle`](Self::evict_idle) every `every` until the task is aborted
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                controller.evict_idle();
            }
        })
    }
}

fn purge_expired(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(oldest) = timestamps.front() {
        if now.saturating_duration_since(*oldest) >= window {
            timestamps.pop_front();
        } else {
            break;
        }
    }
}

/// Whole seconds, rounded up, never zero
fn retry_after_secs(remaining: Duration) -> u64 {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    secs.max(1)
}
