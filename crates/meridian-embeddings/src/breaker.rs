//! Per-provider circuit breakers.
//!
//! `Closed` admits every call and counts failures; reaching the threshold
//! opens the circuit. `Open` refuses calls until the reset timeout has
//! elapsed since the last failure, then admits exactly one trial call in
//! `HalfOpen`. The trial's outcome closes or re-opens the circuit.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use meridian_core::config::BreakerConfig;
use meridian_core::ProviderId;
use meridian_observability::tracing_setup::events;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;

/// Circuit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitStatus {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::HalfOpen => "half_open",
        }
    }
}

impl fmt::Display for CircuitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of one breaker, for health reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerSnapshot {
    pub provider: ProviderId,
    pub status: CircuitStatus,
    pub failure_count: u32,
    pub last_failure_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct BreakerState {
    status: CircuitStatus,
    failure_count: u32,
    last_failure: Option<Instant>,
    last_failure_at: Option<DateTime<Utc>>,
    trial_in_flight: bool,
}

impl Default for BreakerState {
    fn default() -> Self {
        Self {
            status: CircuitStatus::Closed,
            failure_count: 0,
            last_failure: None,
            last_failure_at: None,
            trial_in_flight: false,
        }
    }
}

/// Health gate for a single provider.
#[derive(Debug)]
pub struct CircuitBreaker {
    provider: ProviderId,
    failure_threshold: u32,
    reset_timeout: Duration,
    state: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(provider: ProviderId, config: &BreakerConfig) -> Self {
        Self::with_settings(
            provider,
            config.failure_threshold,
            Duration::from_millis(config.reset_timeout_ms),
        )
    }

    pub fn with_settings(provider: ProviderId, failure_threshold: u32, reset_timeout: Duration) -> Self {
        Self {
            provider,
            failure_threshold: failure_threshold.max(1),
            reset_timeout,
            state: Mutex::new(BreakerState::default()),
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    /// Ask to make a call. `None` means the circuit refuses it.
    ///
    /// An `Open` circuit whose reset timeout has elapsed moves to `HalfOpen`
    /// and hands out the single trial permit.
    pub fn try_acquire(&self) -> Option<CallPermit<'_>> {
        let mut state = self.lock();
        match state.status {
            CircuitStatus::Closed => Some(CallPermit::new(self, false)),
            CircuitStatus::Open => {
                let cooled_down = state
                    .last_failure
                    .map_or(true, |at| at.elapsed() >= self.reset_timeout);
                if !cooled_down {
                    return None;
                }
                self.transition(&mut state, CircuitStatus::HalfOpen);
                state.trial_in_flight = true;
                Some(CallPermit::new(self, true))
            }
            CircuitStatus::HalfOpen if state.trial_in_flight => None,
            CircuitStatus::HalfOpen => {
                state.trial_in_flight = true;
                Some(CallPermit::new(self, true))
            }
        }
    }

    /// Record a successful call.
    pub fn record_success(&self) {
        let mut state = self.lock();
        match state.status {
            CircuitStatus::Closed => state.failure_count = 0,
            CircuitStatus::HalfOpen => {
                state.failure_count = 0;
                state.trial_in_flight = false;
                self.transition(&mut state, CircuitStatus::Closed);
            }
            // A call admitted before the circuit opened finished late.
            CircuitStatus::Open => {
                debug!(provider = %self.provider, "ignoring success reported while circuit is open");
            }
        }
    }

    /// Record a failed call.
    pub fn record_failure(&self) {
        let mut state = self.lock();
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure = Some(Instant::now());
        state.last_failure_at = Some(Utc::now());
        match state.status {
            CircuitStatus::Closed if state.failure_count >= self.failure_threshold => {
                self.transition(&mut state, CircuitStatus::Open);
            }
            CircuitStatus::HalfOpen => {
                state.trial_in_flight = false;
                self.transition(&mut state, CircuitStatus::Open);
            }
            _ => {}
        }
    }

    /// An unsettled trial permit was dropped: re-open with a fresh clock.
    fn abandon_trial(&self) {
        let mut state = self.lock();
        if state.status == CircuitStatus::HalfOpen && state.trial_in_flight {
            state.trial_in_flight = false;
            state.last_failure = Some(Instant::now());
            self.transition(&mut state, CircuitStatus::Open);
        }
    }

    pub fn status(&self) -> CircuitStatus {
        self.lock().status
    }

    pub fn failure_count(&self) -> u32 {
        self.lock().failure_count
    }

    pub fn snapshot(&self) -> BreakerSnapshot {
        let state = self.lock();
        BreakerSnapshot {
            provider: self.provider,
            status: state.status,
            failure_count: state.failure_count,
            last_failure_at: state.last_failure_at,
        }
    }

    /// Return to `Closed` with no recorded failures.
    pub fn reset(&self) {
        let mut state = self.lock();
        if state.status != CircuitStatus::Closed {
            self.transition(&mut state, CircuitStatus::Closed);
        }
        *state = BreakerState::default();
    }

    fn transition(&self, state: &mut BreakerState, to: CircuitStatus) {
        events::breaker_transition(self.provider, state.status.as_str(), to.as_str(), state.failure_count);
        state.status = to;
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Admission granted by [`CircuitBreaker::try_acquire`].
///
/// Settle it with [`succeed`](Self::succeed) or [`fail`](Self::fail).
/// Dropping an unsettled trial permit re-opens the circuit.
#[must_use = "a permit must be settled with succeed() or fail()"]
#[derive(Debug)]
pub struct CallPermit<'a> {
    breaker: &'a CircuitBreaker,
    trial: bool,
    settled: bool,
}

impl<'a> CallPermit<'a> {
    fn new(breaker: &'a CircuitBreaker, trial: bool) -> Self {
        Self {
            breaker,
            trial,
            settled: false,
        }
    }

    /// Whether this is the single half-open trial call.
    pub fn is_trial(&self) -> bool {
        self.trial
    }

    pub fn succeed(mut self) {
        self.settled = true;
        self.breaker.record_success();
    }

    pub fn fail(mut self) {
        self.settled = true;
        self.breaker.record_failure();
    }
}

impl Drop for CallPermit<'_> {
    fn drop(&mut self) {
        if self.trial && !self.settled {
            self.breaker.abandon_trial();
        }
    }
}

/// One breaker per provider identity, alive for the life of the registry.
#[derive(Debug)]
pub struct BreakerRegistry {
    remote: CircuitBreaker,
    local: CircuitBreaker,
}

impl BreakerRegistry {
    pub fn new(config: &BreakerConfig) -> Self {
        Self {
            remote: CircuitBreaker::new(ProviderId::Remote, config),
            local: CircuitBreaker::new(ProviderId::Local, config),
        }
    }

    pub fn get(&self, id: ProviderId) -> &CircuitBreaker {
        match id {
            ProviderId::Remote => &self.remote,
            ProviderId::Local => &self.local,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CircuitBreaker> {
        ProviderId::ALL.into_iter().map(move |id| self.get(id))
    }

    pub fn snapshots(&self) -> Vec<BreakerSnapshot> {
        self.iter().map(CircuitBreaker::snapshot).collect()
    }

    pub fn reset_all(&self) {
        self.iter().for_each(CircuitBreaker::reset);
    }
}
