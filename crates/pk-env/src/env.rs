//! The `Env` trait and the parking decision process.

use std::fmt;

use pk_core::{DwellMean, Kinematics, LotConfig, PkError, PkResult, SimRng, Slot};
use pk_sim::{AssignOutcome, Session, SessionBuilder, SimResult};
use tracing::{debug, info};

use crate::encode::{encode_state, state_size};
use crate::reward::{INVALID_ACTION_PENALTY, shaped_reward};

/// Default period, in simulated seconds, of the time feature.
pub const DEFAULT_TIME_WINDOW: f64 = 100.0;

// ── Env ───────────────────────────────────────────────────────────────────────

/// Step/reset interface for an external decision-maker.
///
/// Each call to [`step`](Env::step) applies one action, advances the
/// simulation by one tick and returns the new state vector, the reward and
/// whether the episode has terminated.
pub trait Env {
    /// Start a fresh episode and return its initial state.
    fn reset(&mut self) -> Vec<f32>;

    /// Apply `action` and advance one tick.
    fn step(&mut self, action: usize) -> Step;

    /// The current state vector.
    fn state(&self) -> Vec<f32>;

    /// Actions that would currently be accepted.
    fn available_actions(&self) -> Vec<usize>;

    /// Length of every state vector.
    fn state_size(&self) -> usize;

    /// Number of distinct actions.
    fn action_size(&self) -> usize;
}

/// The result of one [`Env::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub state:  Vec<f32>,
    pub reward: f64,
    pub done:   bool,
    pub info:   StepInfo,
}

/// Bookkeeping returned alongside each step.  Nothing here is needed to
/// drive subsequent steps.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StepInfo {
    pub occupancy_percent: f64,
    pub parked:            u64,
    pub failed:            u64,
    /// Session-level ±1 reward counter.
    pub total_reward:      i64,
    /// Sum of shaped step rewards since the last reset.
    pub episode_return:    f64,
}

// ── EnvConfig ─────────────────────────────────────────────────────────────────

/// Configuration of a [`ParkingEnv`].
#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig {
    pub lot:         LotConfig,
    /// Period of the time feature in the state vector.
    pub time_window: f64,
}

impl Default for EnvConfig {
    /// One tick per step and one simulated second per tick; vehicles park
    /// the instant they are assigned and each draws its mean dwell from
    /// `5..=20`.
    fn default() -> Self {
        Self {
            lot: LotConfig {
                dwell: DwellMean::Uniform { min: 5, max: 20 },
                kinematics: Kinematics::Instant,
                tick_secs: 1.0,
                ..LotConfig::default()
            },
            time_window: DEFAULT_TIME_WINDOW,
        }
    }
}

impl EnvConfig {
    /// Default configuration for a `rows × cols` lot with the given cap.
    pub fn new(rows: usize, cols: usize, max_cars_per_episode: u32) -> Self {
        let mut config = Self::default();
        config.lot.rows = rows;
        config.lot.cols = cols;
        config.lot.max_cars_per_episode = max_cars_per_episode;
        config
    }

    pub fn validate(&self) -> PkResult<()> {
        self.lot.validate()?;
        if !(self.time_window > 0.0) {
            return Err(PkError::Config(format!(
                "time_window must be positive, got {}",
                self.time_window
            )));
        }
        Ok(())
    }
}

// ── ParkingEnv ────────────────────────────────────────────────────────────────

/// A parking session driven one assignment per step.
///
/// Before the first [`reset`](Env::reset) there is no session: `state()` is
/// all zeros, no actions are available and `step` is a terminal no-op.
///
/// Every episode gets its own random stream derived from `lot.seed`, so a
/// freshly constructed env replays the same sequence of episodes.
///
/// # Panics
///
/// `reset` and `step` panic if the session reports a bookkeeping defect;
/// such an error never results from any action a caller can supply.
pub struct ParkingEnv {
    config:         EnvConfig,
    rng:            SimRng,
    episodes:       u64,
    session:        Option<Session>,
    episode_return: f64,
}

impl ParkingEnv {
    pub fn new(config: EnvConfig) -> PkResult<Self> {
        config.validate()?;
        let rng = SimRng::new(config.lot.seed);
        Ok(Self { config, rng, episodes: 0, session: None, episode_return: 0.0 })
    }

    #[inline]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// The current episode's session, once [`reset`](Env::reset) has run.
    #[inline]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Episodes started so far.
    #[inline]
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    #[inline]
    pub fn episode_return(&self) -> f64 {
        self.episode_return
    }

    /// `true` when a vehicle is waiting for a slot decision.
    pub fn has_pending(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.pending().is_some())
    }

    fn info(&self) -> StepInfo {
        match &self.session {
            Some(session) => {
                let m = session.metrics();
                StepInfo {
                    occupancy_percent: session.grid().occupancy_percent(),
                    parked:            m.parked,
                    failed:            m.failed,
                    total_reward:      m.reward,
                    episode_return:    self.episode_return,
                }
            }
            None => StepInfo::default(),
        }
    }

    fn terminal(&self) -> Step {
        Step { state: self.state(), reward: 0.0, done: true, info: self.info() }
    }
}

impl Env for ParkingEnv {
    fn reset(&mut self) -> Vec<f32> {
        self.episodes += 1;
        let rng = self.rng.child(self.episodes);
        let mut session = kernel(SessionBuilder::new(self.config.lot.clone()).rng(rng).build());
        session.spawn_next();
        self.session = Some(session);
        self.episode_return = 0.0;
        self.state()
    }

    fn step(&mut self, action: usize) -> Step {
        let Some(session) = self.session.as_mut() else {
            return self.terminal();
        };
        if session.pending().is_none() {
            return self.terminal();
        }

        let cols = session.grid().cols();
        let slot = Slot::from_index(action, cols);
        let row_occupied = if session.grid().contains(slot) {
            session.grid().row_occupancy(slot.row)
        } else {
            0
        };

        let reward = match kernel(session.attempt_assign(slot)) {
            AssignOutcome::Assigned { .. } => shaped_reward(slot.col, cols, row_occupied),
            AssignOutcome::Rejected(reason) => {
                debug!(action, ?reason, "invalid action");
                INVALID_ACTION_PENALTY
            }
        };

        kernel(session.tick());
        let done = session.spawn_next().is_none();
        self.episode_return += reward;

        if done {
            let m = session.metrics();
            info!(
                episode = self.episodes,
                parked = m.parked,
                failed = m.failed,
                episode_return = self.episode_return,
                "episode done"
            );
        }

        Step { state: self.state(), reward, done, info: self.info() }
    }

    fn state(&self) -> Vec<f32> {
        match &self.session {
            Some(session) => encode_state(session, self.config.time_window),
            None => vec![0.0; self.state_size()],
        }
    }

    fn available_actions(&self) -> Vec<usize> {
        let Some(session) = &self.session else { return Vec::new() };
        let cols = session.grid().cols();
        session.grid().free_slots().into_iter().map(|s| s.index(cols)).collect()
    }

    fn state_size(&self) -> usize {
        state_size(self.config.lot.rows, self.config.lot.cols)
    }

    fn action_size(&self) -> usize {
        self.config.lot.slot_count()
    }
}

impl fmt::Display for ParkingEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(session) = &self.session else {
            return writeln!(f, "Not started");
        };
        writeln!(f, "Time: {}, Cars processed: {}", session.now(), session.spawned())?;
        writeln!(f, "Occupancy: {:.1}%", session.grid().occupancy_percent())?;
        writeln!(f, "Parking lot:")?;
        write!(f, "{}", session.grid())
    }
}

/// Unwrap a kernel result; an `Err` here is a kernel defect.
fn kernel<T>(result: SimResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("parking kernel defect: {e}"),
    }
}
