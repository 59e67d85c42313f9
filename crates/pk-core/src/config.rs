//! Session configuration.
//!
//! Every parameter is a plain scalar fixed for a session's lifetime.  No file
//! format is mandated; with the `serde` feature applications can load a
//! `LotConfig` from whatever format they like.

use crate::{PkError, PkResult};

// ── DwellMean ─────────────────────────────────────────────────────────────────

/// How the mean dwell duration is chosen for each vehicle.
///
/// The duration itself is always drawn uniformly from
/// `[mean/2, mean*3/2]` (integer bounds, inclusive).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DwellMean {
    /// Every vehicle uses the same mean.
    Fixed(u32),
    /// Each vehicle first draws its mean uniformly from `min..=max`.
    Uniform { min: u32, max: u32 },
}

impl Default for DwellMean {
    fn default() -> Self {
        DwellMean::Fixed(10)
    }
}

// ── Kinematics ────────────────────────────────────────────────────────────────

/// How assigned vehicles reach (and leave) their slot.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kinematics {
    /// Vehicles appear in their slot the moment they are assigned and vanish
    /// the tick their dwell elapses.  Used by the decision process.
    Instant,
    /// Vehicles follow straight-line waypoint routes at `speed` units/tick.
    Waypoints { speed: f64 },
}

impl Default for Kinematics {
    fn default() -> Self {
        Kinematics::Waypoints { speed: 4.0 }
    }
}

// ── LotConfig ─────────────────────────────────────────────────────────────────

/// Top-level session configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LotConfig {
    pub rows: usize,
    pub cols: usize,

    /// Hard cap on vehicles spawned per session.
    pub max_cars_per_episode: u32,

    /// Mean of the exponential inter-arrival gap, in simulated seconds.
    pub mean_interarrival: f64,

    pub dwell: DwellMean,

    pub kinematics: Kinematics,

    /// Simulated seconds per tick.  Default: 1/30 (one animation frame).
    pub tick_secs: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            rows:                    5,
            cols:                    10,
            max_cars_per_episode:    50,
            mean_interarrival:       3.0,
            dwell:                   DwellMean::default(),
            kinematics:              Kinematics::default(),
            tick_secs:               1.0 / 30.0,
            seed:                    42,
            snapshot_interval_ticks: 1,
        }
    }
}

impl LotConfig {
    /// Number of slots in the grid.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Reject configurations the kernel cannot run.
    pub fn validate(&self) -> PkResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(PkError::Config(format!(
                "grid must have at least one slot, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !(self.mean_interarrival > 0.0) {
            return Err(PkError::Config(format!(
                "mean_interarrival must be positive, got {}",
                self.mean_interarrival
            )));
        }
        if !(self.tick_secs > 0.0) {
            return Err(PkError::Config(format!(
                "tick_secs must be positive, got {}",
                self.tick_secs
            )));
        }
        match self.dwell {
            DwellMean::Fixed(0) => {
                return Err(PkError::Config("dwell mean must be positive".into()));
            }
            DwellMean::Uniform { min, max } if min == 0 || min > max => {
                return Err(PkError::Config(format!(
                    "dwell mean range must satisfy 0 < min <= max, got {min}..={max}"
                )));
            }
            _ => {}
        }
        if let Kinematics::Waypoints { speed } = self.kinematics {
            if !(speed > 0.0) {
                return Err(PkError::Config(format!("speed must be positive, got {speed}")));
            }
        }
        Ok(())
    }
}
