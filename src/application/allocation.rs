//! Bounded allocation engine.
//!
//! Owns the user's starting weights and liquidity target and enforces their
//! bounds under rapid, interleaved input: single steps from button presses
//! and repeating steps from press-and-hold timers.
//!
//! All mutable state, including the timer registry, lives behind one lock.
//! Every step recomputes its guard from the state it holds the lock on, and
//! a timer only steps while its own registration is still present, so a
//! `stop_continuous` or `initialize` that has returned can never be followed
//! by a stray tick.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::domain::allocation::{Allocation, MAX_TOTAL};
use crate::domain::error::DomainError;
use crate::domain::{LiquidityFactor, LiquidityStep, Ticker, WeightsMap};

/// Default delay between repeated steps while a control is held.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(150);

/// Which way a weight control moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Increase,
    Decrease,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }
}

/// Engine tuning, usually built from the `[allocation]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub step_interval: Duration,
    pub initial_liquidity: LiquidityFactor,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            step_interval: DEFAULT_STEP_INTERVAL,
            initial_liquidity: LiquidityFactor::default(),
        }
    }
}

type TimerKey = (Ticker, Direction);

struct Timer {
    id: u64,
    handle: JoinHandle<()>,
}

struct EngineState {
    allocation: Allocation,
    liquidity: LiquidityFactor,
    timers: HashMap<TimerKey, Timer>,
    next_timer_id: u64,
}

impl EngineState {
    fn apply(&mut self, ticker: &Ticker, direction: Direction) -> bool {
        let changed = match direction {
            Direction::Increase => self.allocation.increment_once(ticker),
            Direction::Decrease => self.allocation.decrement_once(ticker),
        };
        trace!(
            ticker = %ticker,
            direction = direction.as_str(),
            changed,
            total = self.allocation.total(),
            "Allocation step"
        );
        changed
    }

    fn is_full(&self) -> bool {
        self.allocation.total() >= MAX_TOTAL
    }

    fn owns_timer(&self, key: &TimerKey, id: u64) -> bool {
        self.timers.get(key).is_some_and(|t| t.id == id)
    }

    fn abort_all_timers(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.handle.abort();
        }
    }
}

/// Weights and liquidity target with bounded, timer-driven stepping.
///
/// Invariants, at every observable instant:
/// - each weight is `>= 0`;
/// - the weights sum to at most 100;
/// - the liquidity factor is within `0..=100`.
///
/// Continuous stepping spawns tokio tasks, so [`start_continuous`] must be
/// called from within a tokio runtime.
///
/// [`start_continuous`]: AllocationEngine::start_continuous
pub struct AllocationEngine {
    state: Arc<Mutex<EngineState>>,
    step_interval: Duration,
}

impl AllocationEngine {
    #[must_use]
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            state: Arc::new(Mutex::new(EngineState {
                allocation: Allocation::default(),
                liquidity: settings.initial_liquidity,
                timers: HashMap::new(),
                next_timer_id: 0,
            })),
            step_interval: settings.step_interval,
        }
    }

    /// Reset every weight to zero for a new asset set.
    ///
    /// Cancels all running timers; previous allocations are discarded.
    pub fn initialize<I, T>(&self, tickers: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Ticker>,
    {
        let allocation = Allocation::zeroed(tickers);
        let mut state = self.state.lock();
        let cancelled = state.timers.len();
        state.abort_all_timers();
        state.allocation = allocation;
        debug!(
            assets = state.allocation.iter().count(),
            cancelled_timers = cancelled,
            "Allocation initialized"
        );
    }

    /// Add one percent to `ticker` if the total is below 100.
    pub fn increment_once(&self, ticker: &Ticker) -> bool {
        self.state.lock().apply(ticker, Direction::Increase)
    }

    /// Remove one percent from `ticker` if it is above zero.
    pub fn decrement_once(&self, ticker: &Ticker) -> bool {
        self.state.lock().apply(ticker, Direction::Decrease)
    }

    /// Step once now, then keep stepping every interval until stopped.
    ///
    /// Increments stop on their own once the total reaches 100. Starting a
    /// control that is already running replaces its timer.
    pub fn start_continuous(&self, ticker: &Ticker, direction: Direction) {
        let mut state = self.state.lock();
        state.apply(ticker, direction);

        let key = (ticker.clone(), direction);
        if let Some(previous) = state.timers.remove(&key) {
            previous.handle.abort();
        }
        if direction == Direction::Increase && state.is_full() {
            debug!(ticker = %ticker, "Allocation full, not repeating");
            return;
        }

        let id = state.next_timer_id;
        state.next_timer_id += 1;

        // The task cannot observe the registry before this lock is released,
        // so registering after the spawn is safe.
        let handle = tokio::spawn(run_timer(
            Arc::clone(&self.state),
            key.clone(),
            id,
            self.step_interval,
        ));
        state.timers.insert(key, Timer { id, handle });
        debug!(
            ticker = %ticker,
            direction = direction.as_str(),
            timer_id = id,
            "Continuous stepping started"
        );
    }

    /// Cancel the repeating step for (`ticker`, `direction`), if any.
    pub fn stop_continuous(&self, ticker: &Ticker, direction: Direction) {
        let removed = self.state.lock().timers.remove(&(ticker.clone(), direction));
        if let Some(timer) = removed {
            timer.handle.abort();
            debug!(
                ticker = %ticker,
                direction = direction.as_str(),
                timer_id = timer.id,
                "Continuous stepping stopped"
            );
        }
    }

    /// Whether a repeating step is registered for (`ticker`, `direction`).
    #[must_use]
    pub fn is_continuous_active(&self, ticker: &Ticker, direction: Direction) -> bool {
        self.state
            .lock()
            .timers
            .contains_key(&(ticker.clone(), direction))
    }

    /// Move the liquidity factor by `step`, all or nothing.
    ///
    /// Returns whether the factor changed.
    pub fn step_liquidity(&self, step: LiquidityStep) -> bool {
        let mut state = self.state.lock();
        match state.liquidity.checked_step(step) {
            Some(next) => {
                state.liquidity = next;
                trace!(delta = step.delta(), liquidity = %next, "Liquidity step");
                true
            }
            None => {
                trace!(
                    delta = step.delta(),
                    liquidity = %state.liquidity,
                    "Liquidity step out of bounds"
                );
                false
            }
        }
    }

    /// Move the liquidity factor by a raw delta of ±1, ±5 or ±10.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidLiquidityStep`] for any other delta.
    pub fn set_liquidity_factor(&self, delta: i32) -> Result<bool, DomainError> {
        let step = LiquidityStep::try_from(delta)?;
        Ok(self.step_liquidity(step))
    }

    #[must_use]
    pub fn liquidity_factor(&self) -> LiquidityFactor {
        self.state.lock().liquidity
    }

    /// Snapshot of the current weights.
    #[must_use]
    pub fn weights(&self) -> WeightsMap {
        self.state.lock().allocation.to_weights()
    }

    #[must_use]
    pub fn weight(&self, ticker: &Ticker) -> Option<u32> {
        self.state.lock().allocation.get(ticker)
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.state.lock().allocation.total()
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.state.lock().allocation.remaining()
    }

    /// Whether the + controls are enabled.
    #[must_use]
    pub fn can_increment(&self) -> bool {
        !self.state.lock().is_full()
    }

    /// Whether the − control for `ticker` is enabled.
    #[must_use]
    pub fn can_decrement(&self, ticker: &Ticker) -> bool {
        self.weight(ticker).is_some_and(|w| w > 0)
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

impl Drop for AllocationEngine {
    fn drop(&mut self) {
        self.state.lock().abort_all_timers();
    }
}

async fn run_timer(state: Arc<Mutex<EngineState>>, key: TimerKey, id: u64, period: Duration) {
    let mut ticks = interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticks.tick().await;

        let mut state = state.lock();
        if !state.owns_timer(&key, id) {
            return;
        }
        let (ticker, direction) = &key;
        state.apply(ticker, *direction);

        if *direction == Direction::Increase && state.is_full() {
            state.timers.remove(&key);
            debug!(ticker = %ticker, timer_id = id, "Allocation full, continuous increment stopped");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Ticker {
        Ticker::from(s)
    }

    fn engine() -> AllocationEngine {
        let engine = AllocationEngine::default();
        engine.initialize(["A", "B", "C"]);
        engine
    }

    #[test]
    fn hundred_increments_fill_one_asset() {
        let engine = engine();
        for _ in 0..100 {
            engine.increment_once(&t("A"));
        }

        assert_eq!(engine.weight(&t("A")), Some(100));
        assert!(!engine.increment_once(&t("B")));
        assert_eq!(engine.weight(&t("B")), Some(0));
        assert!(!engine.can_increment());
    }

    #[test]
    fn initialize_discards_previous_weights() {
        let engine = engine();
        engine.increment_once(&t("A"));
        engine.initialize(["B", "D"]);

        assert_eq!(engine.weight(&t("A")), None);
        assert_eq!(engine.total(), 0);
        assert_eq!(engine.remaining(), 100);
    }

    #[test]
    fn liquidity_rejects_whole_step() {
        let engine = AllocationEngine::new(EngineSettings {
            initial_liquidity: LiquidityFactor::saturating(3),
            ..EngineSettings::default()
        });

        assert_eq!(engine.set_liquidity_factor(-5), Ok(false));
        assert_eq!(engine.liquidity_factor().value(), 3);
        assert_eq!(engine.set_liquidity_factor(10), Ok(true));
        assert_eq!(engine.liquidity_factor().value(), 13);
        assert!(engine.set_liquidity_factor(3).is_err());
    }

    #[test]
    fn stop_without_timer_is_noop() {
        let engine = engine();
        engine.stop_continuous(&t("A"), Direction::Increase);
        assert!(!engine.is_continuous_active(&t("A"), Direction::Increase));
    }

    #[test]
    fn decrement_control_tracks_weight() {
        let engine = engine();
        assert!(!engine.can_decrement(&t("A")));
        engine.increment_once(&t("A"));
        assert!(engine.can_decrement(&t("A")));
        assert!(!engine.can_decrement(&t("Z")));
    }

    #[tokio::test(start_paused = true)]
    async fn continuous_increment_steps_every_interval() {
        let engine = engine();
        engine.start_continuous(&t("A"), Direction::Increase);
        assert_eq!(engine.weight(&t("A")), Some(1));

        tokio::time::sleep(Duration::from_millis(151)).await;
        assert_eq!(engine.weight(&t("A")), Some(2));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(engine.weight(&t("A")), Some(4));

        engine.stop_continuous(&t("A"), Direction::Increase);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(engine.weight(&t("A")), Some(4));
    }

    #[tokio::test(start_paused = true)]
    async fn continuous_increment_stops_itself_at_cap() {
        let engine = engine();
        for _ in 0..98 {
            engine.increment_once(&t("B"));
        }

        engine.start_continuous(&t("A"), Direction::Increase);
        assert_eq!(engine.total(), 99);
        assert!(engine.is_continuous_active(&t("A"), Direction::Increase));

        tokio::time::sleep(Duration::from_millis(151)).await;
        assert_eq!(engine.total(), 100);
        assert!(!engine.is_continuous_active(&t("A"), Direction::Increase));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(engine.total(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn continuous_decrement_floors_at_zero() {
        let engine = engine();
        for _ in 0..3 {
            engine.increment_once(&t("A"));
        }

        engine.start_continuous(&t("A"), Direction::Decrease);
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert_eq!(engine.weight(&t("A")), Some(0));
        // Decrements have no auto-stop; the control stays held.
        assert!(engine.is_continuous_active(&t("A"), Direction::Decrease));
        engine.stop_continuous(&t("A"), Direction::Decrease);
        assert!(!engine.is_continuous_active(&t("A"), Direction::Decrease));
    }

    #[tokio::test(start_paused = true)]
    async fn initialize_cancels_running_timers() {
        let engine = engine();
        engine.start_continuous(&t("A"), Direction::Increase);
        engine.initialize(["A", "B"]);
        assert!(!engine.is_continuous_active(&t("A"), Direction::Increase));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(engine.total(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_a_control_replaces_its_timer() {
        let engine = engine();
        engine.start_continuous(&t("A"), Direction::Increase);
        engine.start_continuous(&t("A"), Direction::Increase);
        assert_eq!(engine.weight(&t("A")), Some(2));

        tokio::time::sleep(Duration::from_millis(151)).await;
        // One timer ticking, not two.
        assert_eq!(engine.weight(&t("A")), Some(3));
    }
}
