//! The stochastic arrival process.
//!
//! Inter-arrival gaps are exponential with mean `mean_interarrival`.  The
//! process keeps one accumulated timer and one pre-drawn gap; a spawn is due
//! once the timer reaches the gap, regardless of history.  After each spawn
//! the timer resets and a fresh gap is drawn.
//!
//! Each vehicle's dwell is uniform over `[mean/2, mean*3/2]` with integer
//! bounds, the mean itself optionally drawn per vehicle (see
//! [`DwellMean`]).  The process stops producing vehicles once
//! `max_cars_per_episode` have been spawned.

use pk_core::{DwellMean, LotConfig, SimRng};

#[derive(Debug, Clone)]
pub struct ArrivalProcess {
    mean_interarrival: f64,
    dwell:             DwellMean,
    cap:               u32,
    spawned:           u32,
    timer:             f64,
    next_gap:          f64,
}

impl ArrivalProcess {
    /// Create the process and draw the first gap from `rng`.
    pub fn new(config: &LotConfig, rng: &mut SimRng) -> Self {
        Self {
            mean_interarrival: config.mean_interarrival,
            dwell:             config.dwell,
            cap:               config.max_cars_per_episode,
            spawned:           0,
            timer:             0.0,
            next_gap:          rng.exponential(config.mean_interarrival),
        }
    }

    /// Vehicles produced so far.
    #[inline]
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    #[inline]
    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// `true` once the spawn cap has been reached.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.spawned >= self.cap
    }

    /// Add `dt` simulated seconds to the arrival timer.
    #[inline]
    pub fn accumulate(&mut self, dt: f64) {
        self.timer += dt;
    }

    /// `true` when the current gap has elapsed and the cap allows a spawn.
    #[inline]
    pub fn is_due(&self) -> bool {
        !self.is_exhausted() && self.timer >= self.next_gap
    }

    /// Reset the timer and draw the next gap.
    pub fn rearm(&mut self, rng: &mut SimRng) {
        self.timer = 0.0;
        self.next_gap = rng.exponential(self.mean_interarrival);
    }

    /// Draw a dwell duration for a new vehicle and count it against the cap.
    ///
    /// Returns `None` (drawing nothing) once the cap is reached.
    pub fn next_dwell(&mut self, rng: &mut SimRng) -> Option<f64> {
        if self.is_exhausted() {
            return None;
        }
        let mean = match self.dwell {
            DwellMean::Fixed(mean) => mean,
            DwellMean::Uniform { min, max } => rng.gen_range(min..=max),
        };
        let duration = sample_dwell(mean, rng);
        self.spawned += 1;
        Some(duration as f64)
    }
}

/// Uniform integer dwell in `[mean/2, mean*3/2]`, both ends inclusive.
///
/// Computed in `u64`, so every `u32` mean is valid.
pub fn sample_dwell(mean: u32, rng: &mut SimRng) -> u64 {
    let mean = u64::from(mean);
    rng.gen_range(mean / 2..=mean * 3 / 2)
}
